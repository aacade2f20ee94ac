//! The `explain` use case.
//!
//! Resolves an identifier to an action or a decision state and reports how the gate treats it
//! under the active profile, next to the registry's remediation text.

use resguard_domain::{GateConfig, Transition, transitions_from};
use resguard_settings::ResolvedConfig;
use resguard_types::explain::{self, Explanation};
use resguard_types::{Action, DecisionState};

/// What an identifier names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topic {
    Action(Action),
    State(DecisionState),
}

impl Topic {
    /// Case-insensitive. States also accept `-` in place of `_`.
    pub fn parse(identifier: &str) -> Option<Self> {
        if let Some(action) = Action::parse(identifier) {
            return Some(Topic::Action(action));
        }
        let wanted = identifier.trim().replace('-', "_");
        DecisionState::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(&wanted))
            .map(Topic::State)
    }

    pub fn id(self) -> &'static str {
        match self {
            Topic::Action(a) => a.as_str(),
            Topic::State(s) => s.as_str(),
        }
    }
}

/// How the gate handles a topic under one profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateRole {
    /// Matches with this action go through the dependency check.
    Destructive { profile: String },
    NonDestructive { profile: String },
    /// Moves a decision can still make from this state. Empty for terminal states.
    Transitions(&'static [Transition]),
}

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found {
        topic: Topic,
        role: GateRole,
        explanation: Explanation,
    },
    Unknown {
        identifier: String,
        /// Known ids containing the identifier; every id when none do.
        suggestions: Vec<&'static str>,
    },
}

impl ExplainOutput {
    pub fn exit_code(&self) -> i32 {
        match self {
            ExplainOutput::Found { .. } => 0,
            ExplainOutput::Unknown { .. } => 1,
        }
    }
}

pub fn run_explain(identifier: &str, resolved: &ResolvedConfig) -> ExplainOutput {
    let found = Topic::parse(identifier)
        .and_then(|topic| explain::lookup_explanation(topic.id()).map(|exp| (topic, exp)));

    match found {
        Some((topic, explanation)) => ExplainOutput::Found {
            topic,
            role: gate_role(topic, &resolved.gate, &resolved.profile),
            explanation,
        },
        None => ExplainOutput::Unknown {
            identifier: identifier.to_string(),
            suggestions: suggestions(identifier),
        },
    }
}

fn gate_role(topic: Topic, gate: &GateConfig, profile: &str) -> GateRole {
    let profile = profile.to_string();
    match topic {
        Topic::Action(action) if gate.is_destructive(action) => GateRole::Destructive { profile },
        Topic::Action(_) => GateRole::NonDestructive { profile },
        Topic::State(state) => GateRole::Transitions(transitions_from(state)),
    }
}

fn suggestions(identifier: &str) -> Vec<&'static str> {
    let needle = identifier.trim().to_ascii_lowercase().replace('-', "_");
    let known = explain::all_actions()
        .iter()
        .chain(explain::all_states())
        .copied();
    let close: Vec<&'static str> = if needle.is_empty() {
        Vec::new()
    } else {
        known.clone().filter(|id| id.contains(&needle)).collect()
    };
    if close.is_empty() { known.collect() } else { close }
}

/// Render an explain result for the terminal.
pub fn render_explain(output: &ExplainOutput) -> String {
    match output {
        ExplainOutput::Found {
            topic,
            role,
            explanation,
        } => render_found(*topic, role, explanation),
        ExplainOutput::Unknown {
            identifier,
            suggestions,
        } => format!(
            "resguard: no action or decision state named {identifier:?}\nknown: {}\n",
            suggestions.join(", ")
        ),
    }
}

fn render_found(topic: Topic, role: &GateRole, exp: &Explanation) -> String {
    let kind = match topic {
        Topic::Action(_) => "action",
        Topic::State(_) => "decision state",
    };
    let mut out = format!("{} ({kind}): {}\n\n", topic.id(), exp.title);
    out.push_str(exp.description);
    out.push_str("\n\n");

    match role {
        GateRole::Destructive { profile } => out.push_str(&format!(
            "Gate: destructive under profile {profile:?}; the dependency graph must show no \
             dependents before it can run.\n"
        )),
        GateRole::NonDestructive { profile } => out.push_str(&format!(
            "Gate: not destructive under profile {profile:?}; the dependency graph is not \
             consulted.\n"
        )),
        GateRole::Transitions([]) => out.push_str("Gate: terminal, no further transitions.\n"),
        GateRole::Transitions(moves) => {
            out.push_str("Gate transitions:\n");
            for t in moves.iter() {
                let to: Vec<&str> = t.to.iter().map(|s| s.as_str()).collect();
                out.push_str(&format!("  {} -> {}\n", t.name, to.join(" | ")));
            }
        }
    }

    out.push_str("\nWhat to do:\n");
    out.push_str(&indent(exp.remediation, 2));
    out.push_str("\nRule file before:\n");
    out.push_str(&indent(exp.examples.before, 4));
    out.push_str("Rule file after:\n");
    out.push_str(&indent(exp.examples.after, 4));
    out
}

fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines().fold(String::new(), |mut out, line| {
        if !line.is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
        out.push('\n');
        out
    })
}
