use crate::policy::Policy;
use resguard_types::{Provider, Resource};

pub fn resource(id: &str, resource_type: &str) -> Resource {
    Resource::new(Provider::Azure, resource_type, id, id, "eastus")
}

pub fn aws_resource(id: &str, resource_type: &str) -> Resource {
    Resource::new(Provider::Aws, resource_type, id, id, "us-east-1")
}

pub fn policy(name: &str, resource_type: &str, condition: &str) -> Policy {
    Policy::new(name, resource_type, condition).expect("test policy pattern is valid")
}
