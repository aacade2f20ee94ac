use resguard_domain::GateConfig;
use resguard_types::Action;
use resguard_types::ids::{PROFILE_CAUTIOUS, PROFILE_STANDARD};

use crate::error::ConfigError;
use crate::resolve::ResolvedConfig;

pub const PROFILES: &[&str] = &[PROFILE_STANDARD, PROFILE_CAUTIOUS];

/// Preset profiles are opinionated defaults.
///
/// Both start in dry-run mode. `cautious` additionally treats `stop` as destructive.
pub fn preset(profile: &str) -> Result<ResolvedConfig, ConfigError> {
    match profile {
        PROFILE_STANDARD => Ok(standard_profile()),
        PROFILE_CAUTIOUS => Ok(cautious_profile()),
        other => Err(ConfigError::UnknownProfile(other.to_string())),
    }
}

pub(crate) fn standard_profile() -> ResolvedConfig {
    ResolvedConfig {
        profile: PROFILE_STANDARD.to_string(),
        dry_run: true,
        log_level: "info".to_string(),
        policy_paths: vec!["policies".to_string()],
        gate: GateConfig::default(),
        derive_hint_edges: true,
    }
}

fn cautious_profile() -> ResolvedConfig {
    ResolvedConfig {
        profile: PROFILE_CAUTIOUS.to_string(),
        gate: GateConfig::new([Action::Delete, Action::Archive, Action::Stop]),
        ..standard_profile()
    }
}
