use std::fmt;

/// Stable handle of a node, assigned by the owning graph at creation
///
/// A handle only resolves in the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    graph: usize,
    index: usize,
}

impl NodeId {
    pub(crate) fn new(graph: usize, index: usize) -> Self {
        Self { graph, index }
    }

    pub(crate) fn graph(&self) -> usize {
        self.graph
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Stable handle of an edge, assigned by the owning graph at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    graph: usize,
    index: usize,
}

impl EdgeId {
    pub(crate) fn new(graph: usize, index: usize) -> Self {
        Self { graph, index }
    }

    pub(crate) fn graph(&self) -> usize {
        self.graph
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.index)
    }
}

/// Edge variant a graph builds
pub trait EdgeKind: fmt::Debug + Clone + Copy + Default {
    const DIRECTED: bool;
}

/// Marker for graphs whose edges have no direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Undirected;

impl EdgeKind for Undirected {
    const DIRECTED: bool = false;
}

/// Marker for graphs whose edges point from `start` to `end`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directed;

impl EdgeKind for Directed {
    const DIRECTED: bool = true;
}

/// A named vertex in the graph
///
/// Two nodes with the same name are still distinct; identity is the [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    name: String,
    edges: Vec<EdgeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String) -> Self {
        Self {
            id,
            name,
            edges: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Incident edges in the order they were attached
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Attach an incident edge. The caller guarantees this node is one of its endpoints.
    pub(crate) fn add_edge(&mut self, edge: EdgeId) {
        self.edges.push(edge);
    }
}

/// A connection between exactly two nodes
///
/// Directed edges keep the endpoint pair in construction order: the first
/// node is `start`, the second is `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    id: EdgeId,
    nodes: [NodeId; 2],
    directed: bool,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, node_1: NodeId, node_2: NodeId, directed: bool) -> Self {
        Self {
            id,
            nodes: [node_1, node_2],
            directed,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn nodes(&self) -> [NodeId; 2] {
        self.nodes
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn start(&self) -> Option<NodeId> {
        self.directed.then_some(self.nodes[0])
    }

    pub fn end(&self) -> Option<NodeId> {
        self.directed.then_some(self.nodes[1])
    }

    pub fn is_self_loop(&self) -> bool {
        self.nodes[0] == self.nodes[1]
    }

    /// The endpoint opposite `from`, or `None` when `from` is not an endpoint
    pub fn destination(&self, from: NodeId) -> Option<NodeId> {
        match self.nodes {
            [a, b] if a == from => Some(b),
            [a, b] if b == from => Some(a),
            _ => None,
        }
    }
}

/// Lookup key accepted by [`crate::Graph::find_node`]: a handle or a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKey<'a> {
    Id(NodeId),
    Name(&'a str),
}

impl fmt::Display for NodeKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Id(id) => write!(f, "{id}"),
            NodeKey::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<NodeId> for NodeKey<'_> {
    fn from(id: NodeId) -> Self {
        NodeKey::Id(id)
    }
}

impl<'a> From<&'a str> for NodeKey<'a> {
    fn from(name: &'a str) -> Self {
        NodeKey::Name(name)
    }
}

impl<'a> From<&'a String> for NodeKey<'a> {
    fn from(name: &'a String) -> Self {
        NodeKey::Name(name.as_str())
    }
}
