//! Lineage graph data structure
//!
//! Directed multigraph over qualified object names. Nodes are created the
//! first time an edge references them; parallel edges between the same pair
//! of nodes are appended, one per observation, never collapsed.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Kind of a lineage edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    /// Declared dependency, a view reading from a relation
    Direct,

    /// Observed dependency, reconstructed from a mutating statement
    QueryBased,
}

impl EdgeKind {
    /// String form used in the persisted `lineage_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Direct => "DIRECT",
            EdgeKind::QueryBased => "QUERY_BASED",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Attributes carried by one lineage edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeInfo {
    /// How the edge was observed
    pub kind: EdgeKind,

    /// Identifier of the statement that produced the edge, for query-based
    /// edges
    pub query_id: Option<String>,
}

/// Lineage graph over qualified object names
pub struct LineageGraph {
    graph: DiGraph<String, EdgeInfo>,
    name_to_node: HashMap<String, NodeIndex>,
}

impl LineageGraph {
    /// Create a new empty lineage graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_to_node: HashMap::new(),
        }
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.name_to_node.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.name_to_node.insert(name.to_string(), idx);
        idx
    }

    /// Add an edge, creating either endpoint if it is not yet known
    pub fn add_edge(&mut self, source: &str, target: &str, edge: EdgeInfo) {
        let from = self.ensure_node(source);
        let to = self.ensure_node(target);
        self.graph.add_edge(from, to, edge);
    }

    /// Returns true if the name is a node in the graph
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_node.contains_key(name)
    }

    /// Unique immediate upstream neighbors of a node
    ///
    /// An unknown name yields an empty list, never an error.
    pub fn upstream(&self, name: &str) -> Vec<String> {
        self.neighbors(name, Direction::Incoming)
    }

    /// Unique immediate downstream neighbors of a node
    pub fn downstream(&self, name: &str) -> Vec<String> {
        self.neighbors(name, Direction::Outgoing)
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<String> {
        let idx = match self.name_to_node.get(name) {
            Some(&idx) => idx,
            None => {
                warn!(table = %name, "table not found in lineage graph");
                return Vec::new();
            }
        };

        // Parallel edges repeat the neighbor once per edge; collect through
        // a set to report each neighbor once.
        let unique: BTreeSet<String> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].clone())
            .collect();
        unique.into_iter().collect()
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Total number of edges, parallel edges counted individually
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Snapshot of the graph for serialization
    pub fn export(&self) -> GraphExport {
        let nodes = self
            .graph
            .node_indices()
            .map(|idx| self.graph[idx].clone())
            .collect();
        let edges = self
            .graph
            .edge_references()
            .map(|edge| EdgeExport {
                source: self.graph[edge.source()].clone(),
                target: self.graph[edge.target()].clone(),
                kind: edge.weight().kind,
                query_id: edge.weight().query_id.clone(),
            })
            .collect();
        GraphExport { nodes, edges }
    }
}

impl Default for LineageGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable snapshot of a lineage graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphExport {
    /// Node names in insertion order
    pub nodes: Vec<String>,

    /// Every edge, including parallel observations
    pub edges: Vec<EdgeExport>,
}

/// One edge in an exported graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeExport {
    /// Source node name
    pub source: String,

    /// Target node name
    pub target: String,

    /// How the edge was observed
    pub kind: EdgeKind,

    /// Statement identifier for query-based edges
    pub query_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct() -> EdgeInfo {
        EdgeInfo {
            kind: EdgeKind::Direct,
            query_id: None,
        }
    }

    #[test]
    fn test_graph_starts_empty() {
        let graph = LineageGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_creates_nodes() {
        let mut graph = LineageGraph::new();
        graph.add_edge("db.raw.events", "db.mart.daily", direct());

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains("db.raw.events"));
        assert!(graph.contains("db.mart.daily"));
    }

    #[test]
    fn test_parallel_edges_are_appended() {
        let mut graph = LineageGraph::new();
        graph.add_edge("db.raw.events", "db.mart.daily", direct());
        graph.add_edge(
            "db.raw.events",
            "db.mart.daily",
            EdgeInfo {
                kind: EdgeKind::QueryBased,
                query_id: Some("q-1".to_string()),
            },
        );

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        // Neighbor listings stay unique even with parallel edges.
        assert_eq!(graph.upstream("db.mart.daily"), vec!["db.raw.events"]);
    }

    #[test]
    fn test_neighbor_directions() {
        let mut graph = LineageGraph::new();
        graph.add_edge("a.b.source", "a.b.middle", direct());
        graph.add_edge("a.b.middle", "a.b.sink", direct());

        assert_eq!(graph.upstream("a.b.middle"), vec!["a.b.source"]);
        assert_eq!(graph.downstream("a.b.middle"), vec!["a.b.sink"]);
        assert!(graph.upstream("a.b.source").is_empty());
        assert!(graph.downstream("a.b.sink").is_empty());
    }

    #[test]
    fn test_mixed_kind_ancestors_are_all_listed() {
        let mut graph = LineageGraph::new();
        graph.add_edge("db.raw.orders", "db.mart.daily", direct());
        graph.add_edge(
            "db.stage.orders",
            "db.mart.daily",
            EdgeInfo {
                kind: EdgeKind::QueryBased,
                query_id: Some("q-3".to_string()),
            },
        );

        assert_eq!(
            graph.upstream("db.mart.daily"),
            vec!["db.raw.orders", "db.stage.orders"]
        );
        assert_eq!(graph.downstream("db.raw.orders"), vec!["db.mart.daily"]);
    }

    #[test]
    fn test_unknown_node_yields_empty() {
        let graph = LineageGraph::new();
        assert!(graph.upstream("nowhere.at.all").is_empty());
        assert!(graph.downstream("nowhere.at.all").is_empty());
    }

    #[test]
    fn test_export_snapshot() {
        let mut graph = LineageGraph::new();
        graph.add_edge(
            "db.raw.events",
            "db.mart.daily",
            EdgeInfo {
                kind: EdgeKind::QueryBased,
                query_id: Some("q-7".to_string()),
            },
        );

        let export = graph.export();
        assert_eq!(export.nodes, vec!["db.raw.events", "db.mart.daily"]);
        assert_eq!(export.edges.len(), 1);
        assert_eq!(export.edges[0].source, "db.raw.events");
        assert_eq!(export.edges[0].kind, EdgeKind::QueryBased);
        assert_eq!(export.edges[0].query_id.as_deref(), Some("q-7"));

        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["edges"][0]["kind"], "QUERY_BASED");
    }
}
