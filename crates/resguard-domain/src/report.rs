use resguard_types::{
    DecisionRecord, DecisionState, GovernanceSummary, ImpactRecord, ResourceRef, SafetyStatus,
};
use std::collections::{BTreeMap, BTreeSet};

use crate::engine::PolicyEvalResult;
use crate::gate::Decision;
use crate::graph::DeletionVerdict;

pub fn decision_record(decision: &Decision<'_>) -> DecisionRecord {
    let m = &decision.matched;
    let safety = match (&decision.verdict, &decision.impact) {
        (Some(verdict), Some(impact)) => Some(ImpactRecord {
            status: match verdict {
                DeletionVerdict::UnknownNode => SafetyStatus::Unknown,
                DeletionVerdict::Safe => SafetyStatus::Safe,
                DeletionVerdict::Blocked { .. } => SafetyStatus::Blocked,
            },
            direct_dependents: impact.direct_dependents.clone(),
            transitive_dependents: impact.transitive_dependents.clone(),
        }),
        _ => None,
    };

    DecisionRecord {
        fingerprint: decision.fingerprint.clone(),
        policy: m.policy.name.clone(),
        policy_severity: m.policy.severity,
        resource: ResourceRef {
            resource_id: m.resource.resource_id.clone(),
            provider: m.resource.provider,
            resource_type: m.resource.resource_type.clone(),
            name: m.resource.name.clone(),
            region: m.resource.region.clone(),
            estimated_monthly_cost: m.resource.estimated_monthly_cost(),
            severity: m.resource.severity(),
        },
        action: m.action,
        approval_required: m.approval_required,
        state: decision.state,
        safety,
    }
}

/// Counts and savings for the report header.
///
/// Savings only count auto-executable destructive decisions, once per resource.
pub fn summarize(result: &PolicyEvalResult<'_>, decisions: &[Decision<'_>]) -> GovernanceSummary {
    let by_action = result
        .actions_by_type()
        .into_iter()
        .map(|(action, n)| (action.as_str().to_string(), n as u32))
        .collect();

    let mut by_state: BTreeMap<String, u32> = BTreeMap::new();
    let mut saved: BTreeSet<&str> = BTreeSet::new();
    let mut savings = 0.0;
    for d in decisions {
        *by_state.entry(d.state.as_str().to_string()).or_insert(0) += 1;
        if d.destructive
            && d.state == DecisionState::AutoExecutable
            && saved.insert(d.matched.resource.resource_id.as_str())
        {
            savings += d.matched.resource.estimated_monthly_cost();
        }
    }

    GovernanceSummary {
        policies: result.total_policies as u32,
        resources: result.total_resources as u32,
        matches: result.match_count() as u32,
        by_action,
        by_state,
        estimated_monthly_savings: savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PolicyEngine;
    use crate::gate::{GateConfig, decide_all};
    use crate::graph::DependencyGraph;
    use crate::test_support::{policy, resource};
    use resguard_types::Action;

    #[test]
    fn savings_count_each_resource_once() {
        let mut engine = PolicyEngine::new();
        engine.add(policy("del", "all", "age_days > 0").with_action(Action::Delete));
        engine.add(policy("arch", "all", "age_days > 0").with_action(Action::Archive));
        engine.add(policy("alert", "all", "age_days > 0"));
        let resources = vec![
            resource("a", "disk")
                .with_age_days(1)
                .with_estimated_monthly_cost(40.0),
            resource("b", "disk")
                .with_age_days(1)
                .with_estimated_monthly_cost(2.5),
        ];
        let result = engine.evaluate(&resources);
        let decisions = decide_all(&result, &DependencyGraph::new(), &GateConfig::default());
        let summary = summarize(&result, &decisions);

        assert_eq!(summary.matches, 6);
        assert_eq!(summary.estimated_monthly_savings, 42.5);
        assert_eq!(summary.by_action.get("delete"), Some(&2));
        assert_eq!(summary.by_state.get("auto_executable"), Some(&6));
    }

    #[test]
    fn record_maps_verdict_to_safety_status() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("vm", "disk");

        let mut engine = PolicyEngine::new();
        engine.add(policy("del", "all", "age_days > 0").with_action(Action::Delete));
        let resources = vec![
            resource("disk", "disk").with_age_days(1),
            resource("other", "disk").with_age_days(1),
        ];
        let result = engine.evaluate(&resources);
        let decisions = decide_all(&result, &graph, &GateConfig::default());

        let blocked = decision_record(&decisions[0]);
        assert_eq!(blocked.state, DecisionState::BlockedByDependency);
        let safety = blocked.safety.expect("destructive carries safety");
        assert_eq!(safety.status, SafetyStatus::Blocked);
        assert_eq!(safety.direct_dependents, vec!["vm"]);

        let unknown = decision_record(&decisions[1]);
        assert_eq!(
            unknown.safety.map(|s| s.status),
            Some(SafetyStatus::Unknown)
        );
    }
}
