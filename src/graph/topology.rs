//! Topological sorting using Kahn's algorithm.

use super::Graph;
use crate::models::{Directed, Edge, EdgeId, NodeId};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, trace};

/// Result of a topological sort
///
/// A cycle is an ordinary outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOutcome {
    /// Every edge points from an earlier node to a later one
    Sorted(Vec<NodeId>),
    /// Some edges could never be processed because they sit on or behind a cycle
    Cyclic {
        /// Nodes that could be ordered before the walk got stuck
        partial: Vec<NodeId>,
        /// Edges never processed, in insertion order
        unprocessed: Vec<EdgeId>,
    },
}

impl SortOutcome {
    pub fn is_acyclic(&self) -> bool {
        matches!(self, SortOutcome::Sorted(_))
    }

    /// The full order, if the graph is acyclic
    pub fn order(&self) -> Option<&[NodeId]> {
        match self {
            SortOutcome::Sorted(order) => Some(order),
            SortOutcome::Cyclic { .. } => None,
        }
    }

    pub fn unprocessed_edges(&self) -> &[EdgeId] {
        match self {
            SortOutcome::Sorted(_) => &[],
            SortOutcome::Cyclic { unprocessed, .. } => unprocessed,
        }
    }
}

/// Sort the nodes of a directed graph so every edge points forward
///
/// Starts from the head nodes in insertion order and releases a node once
/// all of its incoming edges have been processed. Edges left unprocessed
/// when the queue runs dry mean the graph has a cycle.
pub fn topological_sort(graph: &Graph<Directed>) -> SortOutcome {
    let mut to_sort: VecDeque<NodeId> = graph.head_nodes().into();
    let mut processed: HashSet<EdgeId> = HashSet::with_capacity(graph.edge_count());
    let mut sorted: Vec<NodeId> = Vec::with_capacity(graph.node_count());

    while let Some(n) = to_sort.pop_front() {
        sorted.push(n);

        for edge_id in graph.outgoing_edges(n) {
            processed.insert(edge_id);
            let Some(m) = graph.edge(edge_id).and_then(Edge::end) else {
                continue;
            };
            let ready = graph
                .incoming_edges(m)
                .iter()
                .all(|incoming| processed.contains(incoming));
            if ready {
                trace!(node = %m, via = %edge_id, "node released");
                to_sort.push_back(m);
            }
        }
    }

    let unprocessed: Vec<EdgeId> = graph
        .edges()
        .iter()
        .map(Edge::id)
        .filter(|id| !processed.contains(id))
        .collect();

    if unprocessed.is_empty() {
        debug!(graph = graph.name(), nodes = sorted.len(), "graph is acyclic");
        SortOutcome::Sorted(sorted)
    } else {
        debug!(
            graph = graph.name(),
            unprocessed = unprocessed.len(),
            "graph contains a cycle"
        );
        SortOutcome::Cyclic {
            partial: sorted,
            unprocessed,
        }
    }
}

impl Graph<Directed> {
    /// Nodes without incoming edges, in insertion order
    pub fn head_nodes(&self) -> Vec<NodeId> {
        self.nodes()
            .iter()
            .filter(|node| {
                !node
                    .edges()
                    .iter()
                    .filter_map(|id| self.edge(*id))
                    .any(|edge| edge.end() == Some(node.id()))
            })
            .map(|node| node.id())
            .collect()
    }

    pub fn topological_sort(&self) -> SortOutcome {
        topological_sort(self)
    }

    pub fn is_acyclic(&self) -> bool {
        self.topological_sort().is_acyclic()
    }

    pub fn is_valid(&self) -> bool {
        self.is_acyclic()
    }
}
