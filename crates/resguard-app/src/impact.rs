//! Graph queries over an inventory: deletion impact and dangling dependencies.

use anyhow::Context;
use camino::Utf8Path;
use resguard_domain::{DeletionImpact, DependencyGraph};

#[derive(Clone, Copy, Debug)]
pub struct ImpactInput<'a> {
    pub inventory_path: &'a Utf8Path,
    pub derive_hint_edges: bool,
}

fn graph_for(input: ImpactInput<'_>) -> anyhow::Result<DependencyGraph> {
    let inventory = resguard_repo::read_inventory(input.inventory_path)
        .with_context(|| format!("read inventory: {}", input.inventory_path))?;
    Ok(resguard_repo::build_graph(&inventory, input.derive_hint_edges))
}

/// What would break if `resource_id` were removed.
pub fn run_impact(input: ImpactInput<'_>, resource_id: &str) -> anyhow::Result<DeletionImpact> {
    Ok(graph_for(input)?.deletion_impact(resource_id))
}

/// Nodes that depend on something the scanner never reported.
pub fn run_orphans(input: ImpactInput<'_>) -> anyhow::Result<Vec<String>> {
    Ok(graph_for(input)?.get_orphaned_nodes())
}
