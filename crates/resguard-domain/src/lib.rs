//! Pure governance evaluation (no IO).
//!
//! Input: resources and policies constructed elsewhere.
//! Output: matches, graph safety verdicts, and gated decisions.

#![forbid(unsafe_code)]

pub mod condition;
pub mod engine;
pub mod fingerprint;
pub mod gate;
pub mod graph;
pub mod policy;
pub mod report;
pub mod value;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use condition::Condition;
pub use engine::{PolicyEngine, PolicyEvalResult, PolicyMatch};
pub use gate::{
    Decision, GateConfig, Transition, TransitionError, decide, decide_all, transitions_from,
};
pub use graph::{DeletionImpact, DeletionVerdict, DependencyGraph, GraphNode, NodeLookup};
pub use policy::{Policy, PolicyError, ResourceTypeMatcher};
pub use value::{Value, resolve_path};
