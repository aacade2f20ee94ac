//! Embeddable governance engine: catalog entries, the dependency graph, the condition
//! evaluator, and the policy engine with its deletion gate.
//!
//! ```
//! use resguard::{Action, DependencyGraph, GateConfig, Policy, PolicyEngine, Provider, Resource};
//!
//! let disk = Resource::new(Provider::Azure, "disk", "disk-1", "data", "eastus")
//!     .with_estimated_monthly_cost(60.0);
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_resource(&disk);
//! graph.add_edge("vm-1", "disk-1");
//!
//! let mut engine = PolicyEngine::new();
//! let policy = Policy::new("purge", "azure_disk", "orphaned == true")
//!     .expect("valid glob")
//!     .with_action(Action::Delete);
//! engine.add(policy);
//!
//! let resources = vec![disk];
//! let result = engine.evaluate(&resources);
//! let decisions = resguard::decide_all(&result, &graph, &GateConfig::default());
//! assert_eq!(decisions[0].state, resguard::DecisionState::BlockedByDependency);
//! ```

#![forbid(unsafe_code)]

pub use resguard_domain::{
    Condition, Decision, DeletionImpact, DeletionVerdict, DependencyGraph, GateConfig, GraphNode,
    NodeLookup, Policy, PolicyEngine, PolicyError, PolicyEvalResult, PolicyMatch,
    ResourceTypeMatcher, TransitionError, Value, decide, decide_all, resolve_path,
};
pub use resguard_types::{Action, DecisionState, Provider, Resource, ResourceStatus, Severity};
