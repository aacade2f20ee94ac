//! Use case orchestration for resguard.
//!
//! This crate provides the application layer: use cases that coordinate the settings, repo, and
//! domain layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod config;
mod explain;
mod govern;
mod impact;
mod render;
mod validate;

pub use config::{load_config_text, resolve_from_text};
pub use explain::{ExplainOutput, GateRole, Topic, render_explain, run_explain};
pub use govern::{GovernInput, GovernOutput, report_exit_code, run_govern};
pub use impact::{ImpactInput, run_impact, run_orphans};
pub use render::{format_orphans, serialize_impact, serialize_report, write_report};
pub use validate::{ValidateOutput, format_validation, run_validate};
