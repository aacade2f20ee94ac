//! Repository adapters: discover and load rule files, read scanner inventories.
//!
//! This crate is allowed to do filesystem IO. It should not talk to cloud providers;
//! inventories are produced by external scanners and handed over as files.

#![forbid(unsafe_code)]

mod discover;
mod inventory;
mod load;

pub use discover::discover_rule_files;
pub use inventory::{build_graph, parse_inventory, read_inventory};
pub use load::{FileOutcome, FileReport, LoadSummary, load, load_policies};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    /// Parse arbitrary text as a rule file.
    ///
    /// Returns the number of policies on success, `Err(...)` otherwise. **Never panics**.
    pub fn parse_rule_file(text: &str) -> anyhow::Result<usize> {
        Ok(resguard_settings::parse_policies(text)?.len())
    }

    /// Parse arbitrary text as an inventory and build its graph.
    ///
    /// Returns the node count on success. **Never panics**.
    pub fn parse_inventory(text: &str) -> anyhow::Result<usize> {
        let inv = super::parse_inventory(text)?;
        Ok(super::build_graph(&inv, true).node_count())
    }
}
