//! The document a scanner hands over at the start of a governance cycle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::resource::{Resource, Severity};

/// An observed "depends-on" relationship: `dependent_id` cannot survive without `dependency_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub dependent_id: String,
    pub dependency_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub edges: Vec<DependencyEdge>,
}

impl Inventory {
    pub fn summary(&self) -> InventorySummary {
        InventorySummary::from_resources(&self.resources)
    }
}

/// Cost totals across a resource list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_resources: usize,
    pub total_size_gb: f64,
    pub total_monthly_cost: f64,
    pub annual_savings: f64,
    pub by_severity: BTreeMap<Severity, usize>,
}

impl InventorySummary {
    pub fn from_resources(resources: &[Resource]) -> Self {
        let mut summary = InventorySummary {
            total_resources: resources.len(),
            ..InventorySummary::default()
        };
        for r in resources {
            summary.total_size_gb += r.size_gb;
            summary.total_monthly_cost += r.estimated_monthly_cost();
            *summary.by_severity.entry(r.severity()).or_insert(0) += 1;
        }
        summary.annual_savings = summary.total_monthly_cost * 12.0;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Provider;

    #[test]
    fn summary_totals_and_severity_counts() {
        let resources = vec![
            Resource::new(Provider::Azure, "disk", "d1", "d1", "eastus")
                .with_estimated_monthly_cost(120.0)
                .with_size_gb(256.0),
            Resource::new(Provider::Azure, "snapshot", "s1", "s1", "eastus")
                .with_estimated_monthly_cost(5.0)
                .with_size_gb(64.0),
            Resource::new(Provider::Aws, "eip", "e1", "e1", "us-east-1")
                .with_estimated_monthly_cost(3.0),
        ];

        let s = InventorySummary::from_resources(&resources);
        assert_eq!(s.total_resources, 3);
        assert_eq!(s.total_size_gb, 320.0);
        assert_eq!(s.total_monthly_cost, 128.0);
        assert_eq!(s.annual_savings, 1536.0);
        assert_eq!(s.by_severity.get(&Severity::Critical), Some(&1));
        assert_eq!(s.by_severity.get(&Severity::Low), Some(&2));
        assert_eq!(s.by_severity.get(&Severity::High), None);
    }

    #[test]
    fn inventory_accepts_missing_sections() {
        let inv: Inventory = serde_json::from_str("{}").expect("parse");
        assert!(inv.resources.is_empty());
        assert!(inv.edges.is_empty());
        assert_eq!(inv.summary().total_resources, 0);
    }
}
