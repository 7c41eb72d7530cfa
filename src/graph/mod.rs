//! Graph engine: construction, lookup, topological sorting and cycle detection.

pub mod cycle;
pub mod topology;

pub use cycle::{CyclePath, find_cycle, would_create_cycle};
pub use topology::{SortOutcome, topological_sort};

use crate::error::{GraphError, Result};
use crate::models::{Directed, Edge, EdgeId, EdgeKind, Node, NodeId, NodeKey, Undirected};
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Source of graph ids, so handles from one graph never resolve in another
static NEXT_GRAPH_ID: AtomicUsize = AtomicUsize::new(0);

/// A graph of named nodes whose edge variant is fixed by `K`
///
/// Nodes and edges are kept in insertion order and addressed through the
/// handles returned by [`Graph::build_node`] and [`Graph::build_edge`].
/// Every edge is registered on both of its endpoints.
#[derive(Debug, Clone)]
pub struct Graph<K: EdgeKind = Undirected> {
    id: usize,
    name: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    kind: PhantomData<K>,
}

/// A directed graph whose acyclicity is checked on demand
pub type DirectedAcyclicGraph = Graph<Directed>;

/// Bayesian networks carry no structure beyond a DAG's
pub type Bayesian = DirectedAcyclicGraph;

impl<K: EdgeKind> Graph<K> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
            kind: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_directed(&self) -> bool {
        K::DIRECTED
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The node behind a handle issued by this graph
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if id.graph() != self.id {
            return None;
        }
        self.nodes.get(id.index())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        if id.graph() != self.id {
            return None;
        }
        self.edges.get(id.index())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Name of a node, or `None` for a handle from another graph
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(Node::name)
    }

    /// Create a node and return its handle
    pub fn build_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId::new(self.id, self.nodes.len());
        let node = Node::new(id, name.into());
        debug!(graph = %self.name, node = %id, name = node.name(), "built node");
        self.nodes.push(node);
        id
    }

    /// Resolve a handle or a name to a node of this graph
    ///
    /// Names resolve to the first node built under that name.
    pub fn find_node<'a>(&self, key: impl Into<NodeKey<'a>>) -> Result<NodeId> {
        let key = key.into();
        let found = match key {
            NodeKey::Id(id) => self.node(id).map(Node::id),
            NodeKey::Name(name) => self.nodes.iter().find(|n| n.name() == name).map(Node::id),
        };
        found.ok_or_else(|| GraphError::NodeNotFound(key.to_string()))
    }

    /// Connect two nodes, each given as a handle or a name
    ///
    /// Directed graphs build an edge from `n1` to `n2`.
    pub fn build_edge<'a, 'b>(
        &mut self,
        n1: impl Into<NodeKey<'a>>,
        n2: impl Into<NodeKey<'b>>,
    ) -> Result<EdgeId> {
        let node_1 = self.find_node(n1)?;
        let node_2 = self.find_node(n2)?;

        let id = EdgeId::new(self.id, self.edges.len());
        let edge = Edge::new(id, node_1, node_2, K::DIRECTED);
        let self_loop = edge.is_self_loop();
        self.edges.push(edge);

        self.attach(node_1, id);
        // A self-loop is listed once on its only endpoint
        if !self_loop {
            self.attach(node_2, id);
        }

        debug!(
            graph = %self.name,
            edge = %id,
            from = %node_1,
            to = %node_2,
            directed = K::DIRECTED,
            "built edge"
        );
        Ok(id)
    }

    /// First edge of `node` leading to `neighbor`, in incidence order
    pub fn edge_to(&self, node: NodeId, neighbor: NodeId) -> Option<EdgeId> {
        self.incident(node)
            .find(|edge| edge.destination(node) == Some(neighbor))
            .map(Edge::id)
    }

    fn attach(&mut self, node: NodeId, edge: EdgeId) {
        if node.graph() != self.id {
            return;
        }
        if let Some(node) = self.nodes.get_mut(node.index()) {
            node.add_edge(edge);
        }
    }

    fn incident(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.node(node)
            .map(Node::edges)
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.edge(*id))
    }
}

impl Graph<Directed> {
    /// Edges of `node` that end at it
    pub fn incoming_edges(&self, node: NodeId) -> Vec<EdgeId> {
        self.incident(node)
            .filter(|edge| edge.end() == Some(node))
            .map(Edge::id)
            .collect()
    }

    /// Edges of `node` that start at it
    pub fn outgoing_edges(&self, node: NodeId) -> Vec<EdgeId> {
        self.incident(node)
            .filter(|edge| edge.start() == Some(node))
            .map(Edge::id)
            .collect()
    }
}

impl<K: EdgeKind> fmt::Display for Graph<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, arrow) = if K::DIRECTED {
            ("directed", "->")
        } else {
            ("undirected", "--")
        };
        writeln!(
            f,
            "{} ({kind}, {} nodes, {} edges)",
            self.name,
            self.nodes.len(),
            self.edges.len()
        )?;
        for edge in &self.edges {
            let [a, b] = edge.nodes();
            writeln!(
                f,
                "  {} {arrow} {}",
                self.node_name(a).unwrap_or("?"),
                self.node_name(b).unwrap_or("?")
            )?;
        }
        Ok(())
    }
}
