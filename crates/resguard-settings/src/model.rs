use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A policy rule file: a top-level `policies` list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyFileV1 {
    #[serde(default)]
    pub policies: Vec<PolicyEntry>,
}

/// One policy as written in a rule file. Every field has a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyEntry {
    #[serde(default = "default_name")]
    pub name: String,

    /// `all`, `*`, an exact type (`snapshot`, `azure_snapshot`) or a glob (`aws_*`).
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Empty means the policy never matches.
    #[serde(default)]
    pub condition: String,

    /// `alert` | `delete` | `tag` | `stop` | `archive`.
    #[serde(default = "default_action")]
    pub action: String,

    /// Cron expression. Carried through, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,

    #[serde(default)]
    pub approval_required: bool,

    /// Notification endpoint. Carried through, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,

    #[serde(default)]
    pub description: String,

    /// `info` | `low` | `medium` | `high` | `critical`.
    #[serde(default = "default_severity")]
    pub severity: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_resource_type() -> String {
    "all".to_string()
}

fn default_action() -> String {
    "alert".to_string()
}

fn default_severity() -> String {
    "medium".to_string()
}

fn default_enabled() -> bool {
    true
}

/// `resguard.yaml` schema v1.
///
/// This is a *user-facing* config model: every key is optional and unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GovernConfigV1 {
    /// `standard` (default) or `cautious`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Recorded in the report so the Executor knows whether to act.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,

    /// `trace` | `debug` | `info` | `warn` | `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(default)]
    pub policies: PoliciesSection,

    #[serde(default)]
    pub gate: GateSection,

    #[serde(default)]
    pub graph: GraphSection,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PoliciesSection {
    /// Rule files or directories, loaded in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GateSection {
    /// Actions that must pass the dependency check. Replaces the preset list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destructive_actions: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphSection {
    /// Derive edges from `source_resource_id` and `dependent_resource_ids`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derive_hint_edges: Option<bool>,
}
