use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use time::OffsetDateTime;

use crate::action::Action;
use crate::ids;
use crate::resource::{Provider, Severity};

/// Stable schema identifier for governance reports.
pub const SCHEMA_REPORT_V1: &str = "resguard.report.v1";

/// Where a policy match ended up after the gate.
///
/// `BlockedByDependency`, `Executed` and `Rejected` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DecisionState {
    AutoExecutable,
    PendingApproval,
    BlockedByDependency,
    Executed,
    Rejected,
}

impl DecisionState {
    pub const ALL: [DecisionState; 5] = [
        DecisionState::AutoExecutable,
        DecisionState::PendingApproval,
        DecisionState::BlockedByDependency,
        DecisionState::Executed,
        DecisionState::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DecisionState::AutoExecutable => ids::STATE_AUTO_EXECUTABLE,
            DecisionState::PendingApproval => ids::STATE_PENDING_APPROVAL,
            DecisionState::BlockedByDependency => ids::STATE_BLOCKED_BY_DEPENDENCY,
            DecisionState::Executed => ids::STATE_EXECUTED,
            DecisionState::Rejected => ids::STATE_REJECTED,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DecisionState::BlockedByDependency | DecisionState::Executed | DecisionState::Rejected
        )
    }
}

impl fmt::Display for DecisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Graph safety verdict as recorded in a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SafetyStatus {
    Safe,
    /// The id was never registered in the graph; treated as safe.
    Unknown,
    Blocked,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImpactRecord {
    pub status: SafetyStatus,
    pub direct_dependents: Vec<String>,
    pub transitive_dependents: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceRef {
    pub resource_id: String,
    pub provider: Provider,
    pub resource_type: String,
    pub name: String,
    pub region: String,
    pub estimated_monthly_cost: f64,
    pub severity: Severity,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DecisionRecord {
    /// sha256 over `policy + resource_id + action`; stable across runs.
    pub fingerprint: String,
    pub policy: String,
    pub policy_severity: Severity,
    pub resource: ResourceRef,
    pub action: Action,
    pub approval_required: bool,
    pub state: DecisionState,
    /// Present for destructive actions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety: Option<ImpactRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub ended_at: OffsetDateTime,
    pub duration_ms: u64,
    pub dry_run: bool,
    pub profile: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GovernanceSummary {
    pub policies: u32,
    pub resources: u32,
    pub matches: u32,
    pub by_action: BTreeMap<String, u32>,
    pub by_state: BTreeMap<String, u32>,
    /// Monthly cost of resources whose destructive decision is auto-executable.
    pub estimated_monthly_savings: f64,
}

/// The envelope handed to the Executor/Reporter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GovernanceReport {
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub summary: GovernanceSummary,
    pub decisions: Vec<DecisionRecord>,
}

impl GovernanceReport {
    pub fn has_blocked(&self) -> bool {
        self.decisions
            .iter()
            .any(|d| d.state == DecisionState::BlockedByDependency)
    }
}
