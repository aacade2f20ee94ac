//! The canonical catalog entry produced by scanners.
//!
//! A [`Resource`] is an immutable value once a scanner hands it over, with one exception: the
//! estimated monthly cost may be corrected, and doing so always recomputes [`Severity`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Azure,
    Aws,
    Gcp,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Azure => "azure",
            Provider::Aws => "aws",
            Provider::Gcp => "gcp",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a scanner flagged the resource as wasteful.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    #[default]
    Orphaned,
    Idle,
    Zombie,
    Unattached,
    Empty,
    Oversized,
}

impl ResourceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceStatus::Orphaned => "orphaned",
            ResourceStatus::Idle => "idle",
            ResourceStatus::Zombie => "zombie",
            ResourceStatus::Unattached => "unattached",
            ResourceStatus::Empty => "empty",
            ResourceStatus::Oversized => "oversized",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cost-waste severity. Variants are declared from least to most severe so `Ord` follows impact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Threshold table: `>= 100` critical, `>= 50` high, `>= 10` medium, `> 0` low, otherwise info.
    pub fn from_monthly_cost(cost: f64) -> Self {
        if cost >= 100.0 {
            Severity::Critical
        } else if cost >= 50.0 {
            Severity::High
        } else if cost >= 10.0 {
            Severity::Medium
        } else if cost > 0.0 {
            Severity::Low
        } else {
            Severity::Info
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified representation of a wasteful or orphaned cloud resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResourceRecord")]
pub struct Resource {
    // Identity
    pub provider: Provider,
    pub resource_type: String,
    /// Globally unique key; also the dependency graph node id.
    pub resource_id: String,
    pub name: String,
    pub region: String,

    // Ownership
    pub account_id: String,
    pub account_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,

    // State and metrics
    pub status: ResourceStatus,
    pub size_gb: f64,
    estimated_monthly_cost: f64,
    severity: Severity,
    pub age_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_time: Option<String>,

    // Metadata
    pub tags: BTreeMap<String, String>,
    pub metadata: BTreeMap<String, JsonValue>,

    // Dependency hints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_resource_id: Option<String>,
    pub dependent_resource_ids: Vec<String>,
}

impl Resource {
    pub fn new(
        provider: Provider,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        name: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            name: name.into(),
            region: region.into(),
            account_id: String::new(),
            account_name: String::new(),
            resource_group: None,
            status: ResourceStatus::default(),
            size_gb: 0.0,
            estimated_monthly_cost: 0.0,
            severity: Severity::Info,
            age_days: 0,
            created_time: None,
            last_used_time: None,
            tags: BTreeMap::new(),
            metadata: BTreeMap::new(),
            source_resource_id: None,
            dependent_resource_ids: Vec::new(),
        }
    }

    pub fn estimated_monthly_cost(&self) -> f64 {
        self.estimated_monthly_cost
    }

    /// Always derived from the last cost set; there is no independent setter.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn set_estimated_monthly_cost(&mut self, cost: f64) {
        self.estimated_monthly_cost = cost;
        self.severity = Severity::from_monthly_cost(cost);
    }

    pub fn with_estimated_monthly_cost(mut self, cost: f64) -> Self {
        self.set_estimated_monthly_cost(cost);
        self
    }

    pub fn with_status(mut self, status: ResourceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_age_days(mut self, age_days: u32) -> Self {
        self.age_days = age_days;
        self
    }

    pub fn with_size_gb(mut self, size_gb: f64) -> Self {
        self.size_gb = size_gb;
        self
    }

    pub fn with_account(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.account_id = id.into();
        self.account_name = name.into();
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_source(mut self, source_resource_id: impl Into<String>) -> Self {
        self.source_resource_id = Some(source_resource_id.into());
        self
    }

    /// `"{provider}_{resource_type}"`, e.g. `azure_snapshot`.
    pub fn composite_type(&self) -> String {
        format!("{}_{}", self.provider, self.resource_type)
    }
}

/// Wire form accepted from scanners. Any `severity` present on input is ignored.
#[derive(Deserialize)]
struct ResourceRecord {
    provider: Provider,
    resource_type: String,
    resource_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default, alias = "subscription_or_account")]
    account_id: String,
    #[serde(default, alias = "subscription_name")]
    account_name: String,
    #[serde(default)]
    resource_group: Option<String>,
    #[serde(default)]
    status: ResourceStatus,
    #[serde(default)]
    size_gb: f64,
    #[serde(default)]
    estimated_monthly_cost: f64,
    #[serde(default)]
    age_days: u32,
    #[serde(default)]
    created_time: Option<String>,
    #[serde(default)]
    last_used_time: Option<String>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    #[serde(default)]
    metadata: BTreeMap<String, JsonValue>,
    #[serde(default)]
    source_resource_id: Option<String>,
    #[serde(default, alias = "dependent_resources")]
    dependent_resource_ids: Vec<String>,
}

impl From<ResourceRecord> for Resource {
    fn from(r: ResourceRecord) -> Self {
        let mut resource = Resource {
            provider: r.provider,
            resource_type: r.resource_type,
            resource_id: r.resource_id,
            name: r.name,
            region: r.region,
            account_id: r.account_id,
            account_name: r.account_name,
            resource_group: r.resource_group.filter(|g| !g.is_empty()),
            status: r.status,
            size_gb: r.size_gb,
            estimated_monthly_cost: 0.0,
            severity: Severity::Info,
            age_days: r.age_days,
            created_time: r.created_time.filter(|t| !t.is_empty()),
            last_used_time: r.last_used_time.filter(|t| !t.is_empty()),
            tags: r.tags,
            metadata: r.metadata,
            source_resource_id: r.source_resource_id.filter(|s| !s.is_empty()),
            dependent_resource_ids: r
                .dependent_resource_ids
                .into_iter()
                .filter(|d| !d.is_empty())
                .collect(),
        };
        resource.set_estimated_monthly_cost(r.estimated_monthly_cost);
        resource
    }
}
