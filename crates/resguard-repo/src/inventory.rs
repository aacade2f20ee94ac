use anyhow::Context;
use camino::Utf8Path;
use resguard_domain::DependencyGraph;
use resguard_types::Inventory;
use tracing::debug;

/// Read a scanner inventory document (JSON).
pub fn read_inventory(path: &Utf8Path) -> anyhow::Result<Inventory> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    parse_inventory(&text).with_context(|| format!("parse {}", path))
}

pub fn parse_inventory(text: &str) -> anyhow::Result<Inventory> {
    let inventory: Inventory = serde_json::from_str(text)?;
    Ok(inventory)
}

/// Build the dependency graph for one governance cycle.
///
/// Every resource is registered first, then scanner-observed edges are added. With
/// `derive_hints`, each resource also gets `resource -> source_resource_id` and
/// `dependent -> resource` edges from its own dependency hints.
pub fn build_graph(inventory: &Inventory, derive_hints: bool) -> DependencyGraph {
    let mut graph = DependencyGraph::new();

    for resource in &inventory.resources {
        graph.add_resource(resource);
    }

    for edge in &inventory.edges {
        graph.add_edge(&edge.dependent_id, &edge.dependency_id);
    }

    if derive_hints {
        for resource in &inventory.resources {
            if let Some(source) = resource.source_resource_id.as_deref() {
                graph.add_edge(&resource.resource_id, source);
            }
            for dependent in &resource.dependent_resource_ids {
                graph.add_edge(dependent, &resource.resource_id);
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "dependency graph built"
    );
    graph
}
