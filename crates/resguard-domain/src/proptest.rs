//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Severity derivation from cost
//! - Graph safety and cascade analysis
//! - Evaluation order determinism
//! - Condition parsing never panicking

use crate::condition::{Condition, evaluate};
use crate::engine::PolicyEngine;
use crate::graph::{DependencyGraph, GraphNode, NodeLookup};
use crate::test_support::{policy, resource};
use proptest::prelude::*;
use resguard_types::{Resource, Severity};
use std::collections::BTreeSet;

// ============================================================================
// Strategies
// ============================================================================

fn arb_node_id() -> impl Strategy<Value = String> {
    (0u8..12).prop_map(|n| format!("n{}", n))
}

/// Random edge lists over a small id space, so cycles and diamonds show up often.
fn arb_edges() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((arb_node_id(), arb_node_id()), 0..30)
}

fn arb_cost() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(10.0),
        Just(50.0),
        Just(100.0),
        -100.0f64..1000.0,
    ]
}

fn build_graph(edges: &[(String, String)], registered: &[String]) -> DependencyGraph {
    let mut g = DependencyGraph::new();
    for id in registered {
        g.add_node(GraphNode::new(id.clone()));
    }
    for (a, b) in edges {
        g.add_edge(a, b);
    }
    g
}

fn expected_severity(cost: f64) -> Severity {
    if cost >= 100.0 {
        Severity::Critical
    } else if cost >= 50.0 {
        Severity::High
    } else if cost >= 10.0 {
        Severity::Medium
    } else if cost > 0.0 {
        Severity::Low
    } else {
        Severity::Info
    }
}

// ============================================================================
// Catalog
// ============================================================================

proptest! {
    /// Severity always tracks the last cost set, however many times it changes.
    #[test]
    fn severity_tracks_last_cost(costs in prop::collection::vec(arb_cost(), 1..8)) {
        let mut r: Resource = resource("r", "disk");
        for c in &costs {
            r.set_estimated_monthly_cost(*c);
        }
        let last = costs[costs.len() - 1];
        prop_assert_eq!(r.severity(), expected_severity(last));
        prop_assert_eq!(r.severity(), Severity::from_monthly_cost(last));
    }
}

// ============================================================================
// Graph
// ============================================================================

proptest! {
    /// Ids never touched by add_node/add_edge are safe.
    #[test]
    fn untouched_ids_are_safe(edges in arb_edges()) {
        let g = build_graph(&edges, &[]);
        prop_assert!(g.is_safe_to_delete("never-added"));
        prop_assert_eq!(g.lookup("never-added"), NodeLookup::Unknown);
    }

    /// Impact: direct equals get_dependents, transitive is disjoint from direct and duplicate-free.
    #[test]
    fn impact_invariants(edges in arb_edges(), target in arb_node_id()) {
        let g = build_graph(&edges, &[]);
        let impact = g.deletion_impact(&target);

        prop_assert_eq!(&impact.direct_dependents, &g.get_dependents(&target));
        prop_assert_eq!(impact.safe, impact.direct_dependents.is_empty());
        prop_assert_eq!(impact.safe, g.is_safe_to_delete(&target));

        let direct: BTreeSet<&String> = impact.direct_dependents.iter().collect();
        let transitive: BTreeSet<&String> = impact.transitive_dependents.iter().collect();
        prop_assert_eq!(transitive.len(), impact.transitive_dependents.len());
        prop_assert!(direct.is_disjoint(&transitive));
    }

    /// Every transitive dependent really reaches the target over dependency edges.
    #[test]
    fn transitive_dependents_reach_target(edges in arb_edges(), target in arb_node_id()) {
        let g = build_graph(&edges, &[]);
        for id in g.deletion_impact(&target).transitive_dependents {
            let mut seen = BTreeSet::new();
            let mut stack = vec![id.clone()];
            let mut reached = false;
            while let Some(cur) = stack.pop() {
                if !seen.insert(cur.clone()) {
                    continue;
                }
                for dep in g.get_dependencies(&cur) {
                    if dep == target {
                        reached = true;
                    }
                    stack.push(dep);
                }
            }
            prop_assert!(reached, "{} does not reach {}", id, target);
        }
    }

    /// A node is orphaned iff one of its dependencies was never registered.
    #[test]
    fn orphans_point_at_unregistered(
        edges in arb_edges(),
        registered in prop::collection::vec(arb_node_id(), 0..12),
    ) {
        let g = build_graph(&edges, &registered);
        let registered: BTreeSet<&String> = registered.iter().collect();
        let orphans: BTreeSet<String> = g.get_orphaned_nodes().into_iter().collect();

        let expected: BTreeSet<String> = edges
            .iter()
            .filter(|(_, dep)| !registered.contains(dep))
            .map(|(a, _)| a.clone())
            .collect();
        prop_assert_eq!(orphans, expected);
    }

    /// Duplicate edges never inflate the edge count.
    #[test]
    fn edge_count_counts_distinct_pairs(edges in arb_edges()) {
        let g = build_graph(&edges, &[]);
        let distinct: BTreeSet<&(String, String)> = edges.iter().collect();
        prop_assert_eq!(g.edge_count(), distinct.len());
    }
}

// ============================================================================
// Evaluation
// ============================================================================

proptest! {
    /// Matches come out policy-major, then in resource input order.
    #[test]
    fn evaluation_order_is_policy_major(
        thresholds in prop::collection::vec(0u32..100, 1..5),
        ages in prop::collection::vec(0u32..100, 0..8),
    ) {
        let mut engine = PolicyEngine::new();
        for (i, t) in thresholds.iter().enumerate() {
            engine.add(policy(&format!("p{}", i), "all", &format!("age_days > {}", t)));
        }
        let resources: Vec<Resource> = ages
            .iter()
            .enumerate()
            .map(|(i, a)| resource(&format!("r{}", i), "disk").with_age_days(*a))
            .collect();

        let result = engine.evaluate(&resources);

        let mut expected = Vec::new();
        for (pi, t) in thresholds.iter().enumerate() {
            for (ri, a) in ages.iter().enumerate() {
                if a > t {
                    expected.push((format!("p{}", pi), format!("r{}", ri)));
                }
            }
        }
        let actual: Vec<(String, String)> = result
            .matches
            .iter()
            .map(|m| (m.policy.name.clone(), m.resource.resource_id.clone()))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// Arbitrary condition text never panics.
    #[test]
    fn condition_parsing_never_panics(text in ".{0,80}") {
        let r = resource("r", "disk").with_tag("owner", "x");
        let _ = evaluate(&text, &r);
        let _ = Condition::parse(&text).clauses().len();
    }

    /// A conjunction holds iff each of its clauses holds alone.
    #[test]
    fn conjunction_is_all_of_clauses(a in 0u32..60, b in 0u32..60, age in 0u32..60) {
        let r = resource("r", "disk").with_age_days(age);
        let left = format!("age_days > {}", a);
        let right = format!("age_days <= {}", b);
        let both = format!("{} AND {}", left, right);
        prop_assert_eq!(evaluate(&both, &r), evaluate(&left, &r) && evaluate(&right, &r));
    }
}
