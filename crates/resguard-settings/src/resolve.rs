use resguard_domain::{Condition, GateConfig, Policy, ResourceTypeMatcher};
use resguard_types::ids::PROFILE_STANDARD;
use resguard_types::{Action, Severity};

use crate::error::ConfigError;
use crate::model::{GovernConfigV1, PolicyEntry};
use crate::presets;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub dry_run: Option<bool>,
    pub log_level: Option<String>,
    /// Non-empty replaces the configured paths.
    pub policy_paths: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub profile: String,
    pub dry_run: bool,
    pub log_level: String,
    pub policy_paths: Vec<String>,
    pub gate: GateConfig,
    pub derive_hint_edges: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        presets::standard_profile()
    }
}

pub fn resolve_config(
    cfg: GovernConfigV1,
    overrides: Overrides,
) -> Result<ResolvedConfig, ConfigError> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| PROFILE_STANDARD.to_string());

    let mut resolved = presets::preset(&profile)?;

    if let Some(dry_run) = overrides.dry_run.or(cfg.dry_run) {
        resolved.dry_run = dry_run;
    }

    if let Some(level) = overrides.log_level.as_deref().or(cfg.log_level.as_deref()) {
        resolved.log_level = parse_log_level(level)?.to_string();
    }

    if !overrides.policy_paths.is_empty() {
        resolved.policy_paths = overrides.policy_paths.clone();
    } else if let Some(paths) = cfg.policies.paths {
        resolved.policy_paths = paths;
    }

    if let Some(actions) = cfg.gate.destructive_actions.as_deref() {
        let parsed = actions
            .iter()
            .map(|a| Action::parse(a).ok_or_else(|| ConfigError::UnknownDestructiveAction(a.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        resolved.gate = GateConfig::new(parsed);
    }

    if let Some(derive) = cfg.graph.derive_hint_edges {
        resolved.derive_hint_edges = derive;
    }

    Ok(resolved)
}

/// Turn a rule-file entry into a domain policy.
pub fn resolve_policy(entry: &PolicyEntry) -> Result<Policy, ConfigError> {
    let action = Action::parse(&entry.action).ok_or_else(|| ConfigError::UnknownAction {
        policy: entry.name.clone(),
        value: entry.action.clone(),
    })?;
    let severity = parse_severity(&entry.severity).ok_or_else(|| ConfigError::UnknownSeverity {
        policy: entry.name.clone(),
        value: entry.severity.clone(),
    })?;
    let resource_type = ResourceTypeMatcher::parse(&entry.resource_type).map_err(|source| {
        ConfigError::InvalidResourceType {
            policy: entry.name.clone(),
            source,
        }
    })?;

    Ok(Policy {
        name: entry.name.clone(),
        resource_type,
        condition: Condition::parse(&entry.condition),
        action,
        approval_required: entry.approval_required,
        schedule: entry.schedule.clone(),
        notification: entry.notification.clone(),
        description: entry.description.clone(),
        severity,
        enabled: entry.enabled,
    })
}

fn parse_severity(v: &str) -> Option<Severity> {
    match v.trim().to_ascii_lowercase().as_str() {
        "info" => Some(Severity::Info),
        "low" => Some(Severity::Low),
        "medium" => Some(Severity::Medium),
        "high" => Some(Severity::High),
        "critical" => Some(Severity::Critical),
        _ => None,
    }
}

pub fn parse_log_level(v: &str) -> Result<&'static str, ConfigError> {
    match v.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        _ => Err(ConfigError::UnknownLogLevel(v.to_string())),
    }
}
