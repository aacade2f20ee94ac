//! Stable DTOs and IDs used across the resguard workspace.
//!
//! This crate is intentionally boring:
//! - the canonical, provider-agnostic resource catalog entry
//! - the scanner inventory document
//! - data types for the emitted governance report
//! - stable string IDs for actions and decision states
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod action;
pub mod explain;
pub mod ids;
pub mod inventory;
pub mod receipt;
pub mod resource;

pub use action::Action;
pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use inventory::{DependencyEdge, Inventory, InventorySummary};
pub use receipt::{
    DecisionRecord, DecisionState, GovernanceReport, GovernanceSummary, ImpactRecord,
    ResourceRef, RunMeta, SCHEMA_REPORT_V1, SafetyStatus, ToolMeta,
};
pub use resource::{Provider, Resource, ResourceStatus, Severity};
