//! The governance gate: turns policy matches into decisions.
//!
//! ```text
//! match
//!   ├─ approval_required ───────────► PendingApproval ─┬ approve ─► AutoExecutable
//!   │                                                  │             or BlockedByDependency
//!   │                                                  └ reject ──► Rejected
//!   ├─ destructive with dependents ─► BlockedByDependency
//!   └─ otherwise ───────────────────► AutoExecutable ── mark_executed ─► Executed
//! ```
//!
//! Blocked decisions are reported, never dropped.

use resguard_types::{Action, DecisionState};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::info;

use crate::engine::{PolicyEvalResult, PolicyMatch};
use crate::fingerprint::decision_fingerprint;
use crate::graph::{DeletionImpact, DeletionVerdict, DependencyGraph};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateConfig {
    /// Actions that must pass the dependency check.
    pub destructive_actions: BTreeSet<Action>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            destructive_actions: [Action::Delete, Action::Archive].into_iter().collect(),
        }
    }
}

impl GateConfig {
    pub fn new(destructive_actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            destructive_actions: destructive_actions.into_iter().collect(),
        }
    }

    pub fn is_destructive(&self, action: Action) -> bool {
        self.destructive_actions.contains(&action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {transition} a decision that is {from}")]
pub struct TransitionError {
    pub from: DecisionState,
    pub transition: &'static str,
}

/// A named move out of one decision state, with every state it can land in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub name: &'static str,
    pub to: &'static [DecisionState],
}

const FROM_PENDING: &[Transition] = &[
    Transition {
        name: "approve",
        to: &[
            DecisionState::AutoExecutable,
            DecisionState::BlockedByDependency,
        ],
    },
    Transition {
        name: "reject",
        to: &[DecisionState::Rejected],
    },
];

const FROM_AUTO: &[Transition] = &[Transition {
    name: "execute",
    to: &[DecisionState::Executed],
}];

/// Transitions a decision in `state` accepts. Terminal states accept none.
pub fn transitions_from(state: DecisionState) -> &'static [Transition] {
    match state {
        DecisionState::PendingApproval => FROM_PENDING,
        DecisionState::AutoExecutable => FROM_AUTO,
        DecisionState::BlockedByDependency | DecisionState::Executed | DecisionState::Rejected => {
            &[]
        }
    }
}

#[derive(Clone, Debug)]
pub struct Decision<'a> {
    pub matched: PolicyMatch<'a>,
    pub state: DecisionState,
    pub destructive: bool,
    /// Only computed for destructive actions.
    pub verdict: Option<DeletionVerdict>,
    pub impact: Option<DeletionImpact>,
    pub fingerprint: String,
}

impl Decision<'_> {
    fn blocked_by_graph(&self) -> bool {
        self.verdict.as_ref().is_some_and(|v| !v.is_safe())
    }

    /// Pending decisions become auto-executable, unless the graph reported dependents.
    pub fn approve(&mut self) -> Result<DecisionState, TransitionError> {
        if self.state != DecisionState::PendingApproval {
            return Err(TransitionError {
                from: self.state,
                transition: "approve",
            });
        }
        self.state = if self.blocked_by_graph() {
            DecisionState::BlockedByDependency
        } else {
            DecisionState::AutoExecutable
        };
        Ok(self.state)
    }

    pub fn reject(&mut self) -> Result<DecisionState, TransitionError> {
        if self.state != DecisionState::PendingApproval {
            return Err(TransitionError {
                from: self.state,
                transition: "reject",
            });
        }
        self.state = DecisionState::Rejected;
        Ok(self.state)
    }

    pub fn mark_executed(&mut self) -> Result<DecisionState, TransitionError> {
        if self.state != DecisionState::AutoExecutable {
            return Err(TransitionError {
                from: self.state,
                transition: "execute",
            });
        }
        self.state = DecisionState::Executed;
        Ok(self.state)
    }
}

/// Classify one match. Destructive actions consult the graph before anything else is decided.
pub fn decide<'a>(
    matched: PolicyMatch<'a>,
    graph: &DependencyGraph,
    gate: &GateConfig,
) -> Decision<'a> {
    let resource_id = matched.resource.resource_id.as_str();
    let destructive = gate.is_destructive(matched.action);

    let (safe, verdict, impact) = if destructive {
        (
            graph.is_safe_to_delete(resource_id),
            Some(graph.deletion_verdict(resource_id)),
            Some(graph.deletion_impact(resource_id)),
        )
    } else {
        (true, None, None)
    };

    let state = if matched.approval_required {
        DecisionState::PendingApproval
    } else if !safe {
        info!(
            policy = %matched.policy.name,
            resource_id,
            action = %matched.action,
            "destructive action blocked by dependents"
        );
        DecisionState::BlockedByDependency
    } else {
        DecisionState::AutoExecutable
    };

    Decision {
        fingerprint: decision_fingerprint(&matched.policy.name, resource_id, matched.action),
        matched,
        state,
        destructive,
        verdict,
        impact,
    }
}

/// Classify every match, keeping evaluation order.
pub fn decide_all<'a>(
    result: &PolicyEvalResult<'a>,
    graph: &DependencyGraph,
    gate: &GateConfig,
) -> Vec<Decision<'a>> {
    result
        .matches
        .iter()
        .map(|m| decide(*m, graph, gate))
        .collect()
}
