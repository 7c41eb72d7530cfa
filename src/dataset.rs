//! Named node and edge lists that can be turned into a graph.

use crate::error::Result;
use crate::graph::{Bayesian, Graph};
use crate::models::EdgeKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A graph described by node names and `(from, to)` name pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<(String, String)>,
}

impl Dataset {
    /// Credit-worthiness dependencies used as the sample Bayesian network
    pub fn credit_worthiness() -> Self {
        const NODES: [&str; 8] = [
            "income",
            "payment_history",
            "age",
            "debt_income",
            "assets",
            "reliability",
            "future_income",
            "credit_worthy",
        ];
        const EDGES: [(&str, &str); 10] = [
            ("income", "future_income"),
            ("income", "assets"),
            ("payment_history", "reliability"),
            ("age", "payment_history"),
            ("age", "reliability"),
            ("debt_income", "payment_history"),
            ("debt_income", "credit_worthy"),
            ("assets", "future_income"),
            ("reliability", "credit_worthy"),
            ("future_income", "credit_worthy"),
        ];

        Self {
            name: "credit_worthiness".to_string(),
            nodes: NODES.iter().map(|n| n.to_string()).collect(),
            edges: EDGES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let dataset = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            nodes = dataset.nodes.len(),
            edges = dataset.edges.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Build a graph: all nodes in order, then each edge by name
    pub fn build<K: EdgeKind>(&self) -> Result<Graph<K>> {
        let mut graph = Graph::new(self.name.as_str());
        for name in &self.nodes {
            graph.build_node(name.as_str());
        }
        for (from, to) in &self.edges {
            graph.build_edge(from, to)?;
        }
        Ok(graph)
    }
}

/// A freshly built credit-worthiness network
pub fn credit_worthiness_graph() -> Result<Bayesian> {
    Dataset::credit_worthiness().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::DirectedAcyclicGraph;
    use crate::models::{NodeId, Undirected};

    fn head_names(g: &DirectedAcyclicGraph) -> Vec<&str> {
        g.head_nodes()
            .into_iter()
            .filter_map(|id| g.node_name(id))
            .collect()
    }

    #[test]
    fn test_head_nodes() {
        let g = credit_worthiness_graph().unwrap();

        assert_eq!(g.node_count(), 8);
        assert_eq!(g.edge_count(), 10);
        assert_eq!(head_names(&g), vec!["income", "age", "debt_income"]);
    }

    #[test]
    fn test_valid() {
        let mut g = credit_worthiness_graph().unwrap();
        assert!(g.is_valid());

        g.build_edge("reliability", "debt_income").unwrap();
        assert!(!g.is_valid());
    }

    #[test]
    fn test_sorted_order_respects_every_edge() {
        let g = credit_worthiness_graph().unwrap();
        let outcome = g.topological_sort();
        let order = outcome.order().unwrap();

        assert_eq!(order.len(), g.node_count());
        let position = |id: NodeId| order.iter().position(|n| *n == id).unwrap();
        for edge in g.edges() {
            assert!(position(edge.start().unwrap()) < position(edge.end().unwrap()));
        }
    }

    #[test]
    fn test_directed_filtering() {
        let g = credit_worthiness_graph().unwrap();

        for edge in g.edges() {
            let [a, b] = edge.nodes();
            assert!(g.outgoing_edges(a).contains(&edge.id()));
            assert!(g.incoming_edges(b).contains(&edge.id()));
            assert!(!g.incoming_edges(a).contains(&edge.id()));
            assert!(!g.outgoing_edges(b).contains(&edge.id()));
        }
    }

    #[test]
    fn test_lookup_round_trip() {
        let dataset = Dataset::credit_worthiness();
        let g = credit_worthiness_graph().unwrap();

        for (index, name) in dataset.nodes.iter().enumerate() {
            let id = g.find_node(name).unwrap();
            assert_eq!(id.index(), index);
            assert_eq!(g.node_name(id), Some(name.as_str()));
        }
        assert!(matches!(
            g.find_node("shoe_size"),
            Err(GraphError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_cycle_path_reported() {
        let mut g = credit_worthiness_graph().unwrap();
        let pending = crate::graph::would_create_cycle(&g, "reliability", "debt_income")
            .unwrap()
            .unwrap();
        assert_eq!(
            pending.format(&g),
            "reliability → debt_income → payment_history → reliability"
        );

        g.build_edge("reliability", "debt_income").unwrap();
        let found = crate::graph::find_cycle(&g).unwrap();
        assert_eq!(
            found.format(&g),
            "payment_history → reliability → debt_income → payment_history"
        );
    }

    #[test]
    fn test_undirected_build() {
        let g: Graph<Undirected> = Dataset::credit_worthiness().build().unwrap();
        assert!(!g.is_directed());
        assert!(g.edges().iter().all(|e| e.start().is_none()));
    }

    #[test]
    fn test_json_round_trip_and_errors() {
        let json = r#"{"name": "tiny", "nodes": ["a", "b"], "edges": [["a", "b"]]}"#;
        let dataset = Dataset::from_json(json).unwrap();
        assert_eq!(dataset.edges, vec![("a".to_string(), "b".to_string())]);
        assert_eq!(Dataset::from_json(&dataset.to_json().unwrap()).unwrap(), dataset);

        let no_edges = Dataset::from_json(r#"{"name": "solo", "nodes": ["a"]}"#).unwrap();
        assert!(no_edges.build::<crate::models::Directed>().unwrap().is_valid());

        assert!(matches!(
            Dataset::from_json("{not json"),
            Err(GraphError::Json(_))
        ));

        let dangling = Dataset::from_json(r#"{"name": "x", "nodes": ["a"], "edges": [["a", "b"]]}"#)
            .unwrap();
        assert!(matches!(
            dangling.build::<crate::models::Directed>(),
            Err(GraphError::NodeNotFound(ref key)) if key == "b"
        ));
    }
}
