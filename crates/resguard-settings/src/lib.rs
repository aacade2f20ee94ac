//! Rule-file and config parsing, plus profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves documents provided as strings.

#![forbid(unsafe_code)]

mod error;
mod model;
mod presets;
mod resolve;

pub use error::ConfigError;
pub use model::{GateSection, GovernConfigV1, GraphSection, PoliciesSection, PolicyEntry, PolicyFileV1};
pub use presets::{PROFILES, preset};
pub use resolve::{Overrides, ResolvedConfig, parse_log_level, resolve_policy};

use resguard_domain::Policy;

/// Parse a rule file (YAML, or JSON as a YAML subset) into its typed model.
///
/// A document without a top-level `policies` key is [`ConfigError::MissingPolicies`].
pub fn parse_policy_file(input: &str) -> Result<PolicyFileV1, ConfigError> {
    if input.trim().is_empty() {
        return Err(ConfigError::MissingPolicies);
    }
    let doc: serde_yaml::Value = serde_yaml::from_str(input)?;
    let has_key = doc
        .as_mapping()
        .is_some_and(|m| m.contains_key("policies"));
    if !has_key {
        return Err(ConfigError::MissingPolicies);
    }
    Ok(serde_yaml::from_value(doc)?)
}

/// Parse and resolve a whole rule file. All-or-nothing: one bad policy fails the file.
///
/// Disabled policies are returned too; the engine drops them on insertion.
pub fn parse_policies(input: &str) -> Result<Vec<Policy>, ConfigError> {
    let file = parse_policy_file(input)?;
    file.policies.iter().map(resolve_policy).collect()
}

/// Parse `resguard.yaml` into a typed model.
pub fn parse_config_yaml(input: &str) -> Result<GovernConfigV1, ConfigError> {
    if input.trim().is_empty() {
        return Ok(GovernConfigV1::default());
    }
    Ok(serde_yaml::from_str(input)?)
}

/// Resolve the effective config: CLI overrides, then the config file, then the preset.
pub fn resolve_config(
    cfg: GovernConfigV1,
    overrides: Overrides,
) -> Result<ResolvedConfig, ConfigError> {
    resolve::resolve_config(cfg, overrides)
}
