//! Cycle detection in directed graphs.

use super::Graph;
use crate::Result;
use crate::models::{Directed, Edge, EdgeId, NodeId, NodeKey};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A path of nodes that returns to where it started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclePath {
    pub path: Vec<NodeId>,
}

impl CyclePath {
    pub fn new(path: Vec<NodeId>) -> Self {
        Self { path }
    }

    /// Format the cycle with node names, e.g. `a → b → a`
    pub fn format(&self, graph: &Graph<Directed>) -> String {
        self.path
            .iter()
            .map(|id| graph.node_name(*id).map_or_else(|| id.to_string(), str::to_string))
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnPath,
    Done,
}

/// A node on the DFS path and how far its outgoing edges have been walked
#[derive(Debug)]
struct Frame {
    node: NodeId,
    outgoing: Vec<EdgeId>,
    next: usize,
}

impl Frame {
    fn new(graph: &Graph<Directed>, node: NodeId) -> Self {
        Self {
            node,
            outgoing: graph.outgoing_edges(node),
            next: 0,
        }
    }

    /// Advance to the end of the next outgoing edge, or `None` when exhausted
    fn next_target(&mut self, graph: &Graph<Directed>) -> Option<Option<NodeId>> {
        let edge_id = *self.outgoing.get(self.next)?;
        self.next += 1;
        Some(graph.edge(edge_id).and_then(Edge::end))
    }
}

/// Find one cycle in the graph, if any
///
/// Walks outgoing edges depth-first from every node in insertion order. The
/// path lives on an explicit stack, so long chains cannot exhaust the call stack.
pub fn find_cycle(graph: &Graph<Directed>) -> Option<CyclePath> {
    let mut marks: HashMap<NodeId, Mark> = HashMap::with_capacity(graph.node_count());
    let mut stack: Vec<Frame> = Vec::new();

    for root in graph.nodes() {
        if marks.contains_key(&root.id()) {
            continue;
        }
        marks.insert(root.id(), Mark::OnPath);
        stack.push(Frame::new(graph, root.id()));

        while let Some(frame) = stack.last_mut() {
            let Some(target) = frame.next_target(graph) else {
                marks.insert(frame.node, Mark::Done);
                stack.pop();
                continue;
            };
            let Some(next) = target else {
                continue;
            };

            match marks.get(&next) {
                Some(Mark::OnPath) => {
                    // Close the cycle from where `next` entered the path
                    let start = stack.iter().position(|f| f.node == next).unwrap_or(0);
                    let mut cycle: Vec<NodeId> = stack[start..].iter().map(|f| f.node).collect();
                    cycle.push(next);
                    debug!(graph = graph.name(), length = cycle.len(), "found cycle");
                    return Some(CyclePath::new(cycle));
                }
                Some(Mark::Done) => {}
                None => {
                    marks.insert(next, Mark::OnPath);
                    stack.push(Frame::new(graph, next));
                }
            }
        }
    }

    None
}

/// Check whether adding an edge `from -> to` would close a cycle
///
/// Returns the cycle the new edge would create, starting and ending at `from`.
/// Lookup failures are errors; an existing cycle elsewhere is ignored.
pub fn would_create_cycle<'a, 'b>(
    graph: &Graph<Directed>,
    from: impl Into<NodeKey<'a>>,
    to: impl Into<NodeKey<'b>>,
) -> Result<Option<CyclePath>> {
    let from = graph.find_node(from)?;
    let to = graph.find_node(to)?;

    // The new edge closes a cycle if `from` is already reachable from `to`
    let found = find_path(graph, to, from).map(|path| {
        let mut cycle = vec![from];
        cycle.extend(path);
        CyclePath::new(cycle)
    });

    Ok(found)
}

/// DFS to find a path from `start` to `target`, both included
fn find_path(graph: &Graph<Directed>, start: NodeId, target: NodeId) -> Option<Vec<NodeId>> {
    if start == target {
        return Some(vec![start]);
    }

    let mut visited: HashSet<NodeId> = HashSet::from([start]);
    let mut stack: Vec<Frame> = vec![Frame::new(graph, start)];

    while let Some(frame) = stack.last_mut() {
        let Some(target_of_edge) = frame.next_target(graph) else {
            stack.pop();
            continue;
        };
        let Some(next) = target_of_edge else {
            continue;
        };

        if next == target {
            let mut path: Vec<NodeId> = stack.iter().map(|f| f.node).collect();
            path.push(next);
            return Some(path);
        }
        if visited.insert(next) {
            stack.push(Frame::new(graph, next));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::DirectedAcyclicGraph;

    fn dag(nodes: &[&str], edges: &[(&str, &str)]) -> DirectedAcyclicGraph {
        let mut g = DirectedAcyclicGraph::new("test");
        for name in nodes {
            g.build_node(*name);
        }
        for (from, to) in edges {
            g.build_edge(*from, *to).unwrap();
        }
        g
    }

    #[test]
    fn test_find_cycle_none() {
        let g = dag(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("a", "c")]);
        assert!(find_cycle(&g).is_none());
    }

    #[test]
    fn test_find_cycle_found() {
        let g = dag(
            &["start", "a", "b", "c"],
            &[("start", "a"), ("a", "b"), ("b", "c"), ("c", "a")],
        );

        let cycle = find_cycle(&g).unwrap();
        assert_eq!(cycle.format(&g), "a → b → c → a");
    }

    #[test]
    fn test_find_cycle_self_loop() {
        let g = dag(&["a"], &[("a", "a")]);

        let cycle = find_cycle(&g).unwrap();
        assert_eq!(cycle.format(&g), "a → a");
    }

    #[test]
    fn test_long_chain_does_not_exhaust_the_stack() {
        const LEN: usize = 100_000;
        let mut g = DirectedAcyclicGraph::new("chain");
        let ids: Vec<NodeId> = (0..LEN).map(|i| g.build_node(format!("n{i}"))).collect();
        for pair in ids.windows(2) {
            g.build_edge(pair[0], pair[1]).unwrap();
        }

        assert!(g.is_valid());
        assert!(find_cycle(&g).is_none());

        let closing = would_create_cycle(&g, ids[LEN - 1], ids[0]).unwrap().unwrap();
        assert_eq!(closing.path.len(), LEN + 1);
        assert_eq!(closing.path.first(), Some(&ids[LEN - 1]));
        assert_eq!(closing.path.last(), Some(&ids[LEN - 1]));

        g.build_edge(ids[LEN - 1], ids[0]).unwrap();
        let cycle = find_cycle(&g).unwrap();
        assert_eq!(cycle.path.len(), LEN + 1);
        assert_eq!(cycle.path.first(), Some(&ids[0]));
    }

    #[test]
    fn test_would_create_cycle_found() {
        // 1 -> 2 -> 3, adding 3 -> 1 closes 3 -> 1 -> 2 -> 3
        let g = dag(&["1", "2", "3"], &[("1", "2"), ("2", "3")]);

        let cycle = would_create_cycle(&g, "3", "1").unwrap().unwrap();
        assert_eq!(cycle.format(&g), "3 → 1 → 2 → 3");
    }

    #[test]
    fn test_would_create_cycle_none() {
        let g = dag(&["1", "2", "3", "4"], &[("1", "2"), ("2", "3")]);

        assert!(would_create_cycle(&g, "4", "1").unwrap().is_none());
        assert!(would_create_cycle(&g, "1", "3").unwrap().is_none());
        assert!(g.is_valid());
    }

    #[test]
    fn test_would_create_cycle_immediate_and_self() {
        let g = dag(&["a", "b"], &[("a", "b")]);

        let back = would_create_cycle(&g, "b", "a").unwrap().unwrap();
        assert_eq!(back.format(&g), "b → a → b");

        let own = would_create_cycle(&g, "a", "a").unwrap().unwrap();
        assert_eq!(own.format(&g), "a → a");
    }

    #[test]
    fn test_would_create_cycle_unknown_node() {
        let g = dag(&["a"], &[]);

        let err = would_create_cycle(&g, "a", "missing").unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(ref key) if key == "missing"));
    }
}
