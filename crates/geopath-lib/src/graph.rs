use std::collections::HashMap;

use serde::Serialize;

use crate::geo::{haversine_km, Node, NodeId, Point};

/// Directed arc within the search graph, weighted by geodesic distance in km.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub distance: f64,
}

/// Graph structure used by the search algorithms.
///
/// Nodes keep their insertion order; the linear-scan searches walk them in
/// that order when choosing among equal candidates.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    positions: HashMap<NodeId, usize>,
    adjacency: HashMap<NodeId, Vec<Edge>>,
}

impl Graph {
    /// Assemble a graph from explicit nodes and adjacency lists.
    ///
    /// Lets callers route over shapes other than the waypoint chain. Edges
    /// pointing at unknown nodes are kept but can never be expanded.
    pub fn from_parts(nodes: Vec<Node>, adjacency: HashMap<NodeId, Vec<Edge>>) -> Self {
        let positions = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id, position))
            .collect();
        Self {
            nodes,
            positions,
            adjacency,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.positions.get(&id).map(|&position| &self.nodes[position])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return the outgoing edges for a node.
    pub fn neighbours(&self, node: NodeId) -> &[Edge] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Iterate every directed edge, grouped by source in node order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.nodes
            .iter()
            .flat_map(move |node| self.neighbours(node.id).iter())
    }

    pub fn edge_between(&self, source: NodeId, target: NodeId) -> Option<&Edge> {
        self.neighbours(source)
            .iter()
            .find(|edge| edge.target == target)
    }

    pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.edge_between(source, target).is_some()
    }
}

/// Build the chain graph for an ordered list of waypoints.
///
/// Node `i` links to `i - 1` and `i + 1` only, in both directions. Zero or one
/// point yields a graph without edges.
pub fn build_graph(points: &[Point]) -> Graph {
    let nodes: Vec<Node> = points
        .iter()
        .enumerate()
        .map(|(id, point)| Node::new(id, *point))
        .collect();

    let mut adjacency: HashMap<NodeId, Vec<Edge>> = HashMap::new();
    for pair in nodes.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let distance = haversine_km(current.point(), next.point());

        adjacency.entry(current.id).or_default().push(Edge {
            source: current.id,
            target: next.id,
            distance,
        });
        adjacency.entry(next.id).or_default().push(Edge {
            source: next.id,
            target: current.id,
            distance,
        });
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = adjacency.values().map(Vec::len).sum::<usize>(),
        "built waypoint chain graph"
    );

    Graph::from_parts(nodes, adjacency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single_inputs_have_no_edges() {
        assert!(build_graph(&[]).is_empty());

        let graph = build_graph(&[Point::new(40.0, -74.0)]);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbours(0).is_empty());
    }

    #[test]
    fn neighbours_of_unknown_node_is_empty() {
        let graph = build_graph(&[Point::new(0.0, 0.0), Point::new(0.0, 1.0)]);
        assert!(graph.neighbours(42).is_empty());
        assert!(graph.node(42).is_none());
    }

    #[test]
    fn edges_iterate_in_node_order() {
        let graph = build_graph(&[
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 2.0),
        ]);
        let pairs: Vec<_> = graph.edges().map(|e| (e.source, e.target)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
    }
}
