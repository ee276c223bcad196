use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::geo::{Heuristic, NodeId};
use crate::graph::Graph;
use crate::observer::{SearchObserver, SearchStep};

/// Run Dijkstra's algorithm, choosing the next node by scanning the whole
/// unvisited set.
///
/// Ties resolve to the first candidate in graph node order. The search stops
/// as soon as the goal is visited, or when every remaining node is
/// unreachable.
pub fn find_route_dijkstra(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    observer: &mut dyn SearchObserver,
) -> Option<Vec<NodeId>> {
    if !graph.contains(start) || !graph.contains(goal) {
        return None;
    }

    let mut distances: HashMap<NodeId, f64> = graph
        .nodes()
        .iter()
        .map(|node| (node.id, f64::INFINITY))
        .collect();
    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut unvisited: Vec<NodeId> = graph.nodes().iter().map(|node| node.id).collect();
    let mut visited: HashSet<NodeId> = HashSet::new();

    distances.insert(start, 0.0);
    parents.insert(start, None);

    let mut iteration = 0;
    while !unvisited.is_empty() {
        if observer.is_cancelled() {
            tracing::warn!(iteration, "dijkstra search cancelled");
            return None;
        }

        let mut selected: Option<(usize, f64)> = None;
        for (slot, node) in unvisited.iter().enumerate() {
            let distance = distances[node];
            if distance < selected.map_or(f64::INFINITY, |(_, best)| best) {
                selected = Some((slot, distance));
            }
        }
        // Only infinite distances remain: nothing else is reachable.
        let Some((slot, current_distance)) = selected else {
            break;
        };

        let current = unvisited.remove(slot);
        visited.insert(current);
        iteration += 1;
        observer.on_step(&SearchStep {
            iteration,
            current,
            frontier: unvisited.len(),
        });
        tracing::trace!(node = current, distance = current_distance, "visit");

        if current == goal {
            break;
        }

        for edge in graph.neighbours(current) {
            let next = edge.target;
            if visited.contains(&next) {
                continue;
            }
            let Some(&known) = distances.get(&next) else {
                continue;
            };

            let candidate = current_distance + edge.distance;
            if candidate < known {
                distances.insert(next, candidate);
                parents.insert(next, Some(current));
            }
        }
    }

    reconstruct_path(&parents, start, goal)
}

/// Run A* search, choosing the open node with the lowest `f = g + h` by a
/// linear scan of the open set.
///
/// Returns as soon as the goal is the minimum open node. That is only optimal
/// when `heuristic` never overestimates the remaining cost on `graph`.
pub fn find_route_a_star(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    heuristic: Heuristic,
    observer: &mut dyn SearchObserver,
) -> Option<Vec<NodeId>> {
    if !graph.contains(start) || !graph.contains(goal) {
        return None;
    }

    let mut g_score: HashMap<NodeId, f64> = graph
        .nodes()
        .iter()
        .map(|node| (node.id, f64::INFINITY))
        .collect();
    let mut f_score: HashMap<NodeId, f64> = g_score.clone();
    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut open: Vec<NodeId> = vec![start];

    g_score.insert(start, 0.0);
    f_score.insert(start, heuristic_distance(graph, heuristic, start, goal));
    parents.insert(start, None);

    let mut iteration = 0;
    while !open.is_empty() {
        if observer.is_cancelled() {
            tracing::warn!(iteration, "a* search cancelled");
            return None;
        }

        let mut slot = 0;
        let mut best = f64::INFINITY;
        for (index, node) in open.iter().enumerate() {
            let score = f_score[node];
            if score < best {
                best = score;
                slot = index;
            }
        }

        let current = open.remove(slot);
        iteration += 1;
        observer.on_step(&SearchStep {
            iteration,
            current,
            frontier: open.len(),
        });
        tracing::trace!(node = current, f = best, "expand");

        if current == goal {
            return reconstruct_path(&parents, start, goal);
        }

        let current_score = g_score[&current];
        for edge in graph.neighbours(current) {
            let next = edge.target;
            let Some(&known) = g_score.get(&next) else {
                continue;
            };

            let tentative_g = current_score + edge.distance;
            if tentative_g < known {
                parents.insert(next, Some(current));
                g_score.insert(next, tentative_g);
                f_score.insert(
                    next,
                    tentative_g + heuristic_distance(graph, heuristic, next, goal),
                );
                if !open.contains(&next) {
                    open.push(next);
                }
            }
        }
    }

    None
}

/// Dijkstra's algorithm backed by a binary heap.
///
/// Produces the same distances and paths as [`find_route_dijkstra`]; only the
/// order in which equal-cost nodes are expanded may differ.
pub fn find_route_dijkstra_heap(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    observer: &mut dyn SearchObserver,
) -> Option<Vec<NodeId>> {
    if !graph.contains(start) || !graph.contains(goal) {
        return None;
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0.0));

    let mut iteration = 0;
    while let Some(entry) = queue.pop() {
        if visited.contains(&entry.node) {
            continue;
        }
        let current_distance = match distances.get(&entry.node) {
            Some(distance) if *distance < entry.cost.0 => continue,
            Some(distance) => *distance,
            None => continue,
        };

        if observer.is_cancelled() {
            tracing::warn!(iteration, "dijkstra search cancelled");
            return None;
        }

        visited.insert(entry.node);
        iteration += 1;
        observer.on_step(&SearchStep {
            iteration,
            current: entry.node,
            frontier: queue.len(),
        });

        if entry.node == goal {
            return reconstruct_path(&parents, start, goal);
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            if visited.contains(&next) || !graph.contains(next) {
                continue;
            }

            let next_cost = current_distance + edge.distance;
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, Some(entry.node));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

/// A* search backed by a binary heap ordered on `f = g + h`.
pub fn find_route_a_star_heap(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    heuristic: Heuristic,
    observer: &mut dyn SearchObserver,
) -> Option<Vec<NodeId>> {
    if !graph.contains(start) || !graph.contains(goal) {
        return None;
    }

    let mut g_score: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    g_score.insert(start, 0.0);
    parents.insert(start, None);
    let start_estimate = heuristic_distance(graph, heuristic, start, goal);
    queue.push(AStarEntry::new(start, 0.0, start_estimate));

    let mut iteration = 0;
    while let Some(entry) = queue.pop() {
        let current_score = match g_score.get(&entry.node) {
            Some(score) if *score < entry.cost.0 => continue,
            Some(score) => *score,
            None => continue,
        };

        if observer.is_cancelled() {
            tracing::warn!(iteration, "a* search cancelled");
            return None;
        }

        iteration += 1;
        observer.on_step(&SearchStep {
            iteration,
            current: entry.node,
            frontier: queue.len(),
        });

        if entry.node == goal {
            return reconstruct_path(&parents, start, goal);
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            if !graph.contains(next) {
                continue;
            }

            let tentative_g = current_score + edge.distance;
            if tentative_g < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative_g);
                parents.insert(next, Some(entry.node));
                let estimate = heuristic_distance(graph, heuristic, next, goal);
                queue.push(AStarEntry::new(next, tentative_g, estimate));
            }
        }
    }

    None
}

fn heuristic_distance(graph: &Graph, heuristic: Heuristic, from: NodeId, to: NodeId) -> f64 {
    match (graph.node(from), graph.node(to)) {
        (Some(from), Some(to)) => heuristic.estimate(from, to),
        _ => 0.0,
    }
}

/// Walk predecessor links back from `goal`. Returns `None` unless the walk
/// ends at `start`, so partial chains never leak out as paths.
fn reconstruct_path(
    parents: &HashMap<NodeId, Option<NodeId>>,
    start: NodeId,
    goal: NodeId,
) -> Option<Vec<NodeId>> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();

    (path.first() == Some(&start)).then_some(path)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: NodeId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl AStarEntry {
    fn new(node: NodeId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{Node, Point};
    use crate::graph::{build_graph, Edge};
    use crate::observer::{NoopObserver, StepRecorder};

    fn diamond() -> Graph {
        // 0 -> 1 -> 3 is longer than 0 -> 2 -> 3.
        let nodes = vec![
            Node::new(0, Point::new(0.0, 0.0)),
            Node::new(1, Point::new(1.0, 1.0)),
            Node::new(2, Point::new(-0.1, 1.0)),
            Node::new(3, Point::new(0.0, 2.0)),
        ];
        let edge = |source, target, distance| Edge {
            source,
            target,
            distance,
        };
        let adjacency = HashMap::from([
            (0, vec![edge(0, 1, 5.0), edge(0, 2, 2.0)]),
            (1, vec![edge(1, 3, 1.0)]),
            (2, vec![edge(2, 3, 2.0)]),
            (3, vec![]),
        ]);
        Graph::from_parts(nodes, adjacency)
    }

    #[test]
    fn reconstruct_rejects_walks_that_miss_start() {
        let parents = HashMap::from([(2, Some(1)), (1, None)]);
        assert_eq!(reconstruct_path(&parents, 0, 2), None);
        assert_eq!(reconstruct_path(&parents, 1, 2), Some(vec![1, 2]));
    }

    #[test]
    fn start_equal_goal_yields_single_node() {
        let graph = build_graph(&[Point::new(0.0, 0.0), Point::new(0.0, 1.0)]);
        let mut observer = NoopObserver;
        assert_eq!(
            find_route_dijkstra(&graph, 1, 1, &mut observer),
            Some(vec![1])
        );
        assert_eq!(
            find_route_a_star(&graph, 1, 1, Heuristic::Haversine, &mut observer),
            Some(vec![1])
        );
    }

    #[test]
    fn all_variants_pick_the_cheaper_branch() {
        let graph = diamond();
        let mut observer = NoopObserver;
        let expected = Some(vec![0, 2, 3]);
        assert_eq!(find_route_dijkstra(&graph, 0, 3, &mut observer), expected);
        assert_eq!(
            find_route_dijkstra_heap(&graph, 0, 3, &mut observer),
            expected
        );
        assert_eq!(
            find_route_a_star(&graph, 0, 3, Heuristic::Euclidean, &mut observer),
            expected
        );
        assert_eq!(
            find_route_a_star_heap(&graph, 0, 3, Heuristic::Euclidean, &mut observer),
            expected
        );
    }

    #[test]
    fn dijkstra_stops_once_goal_is_visited() {
        let graph = build_graph(&[
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 2.0),
            Point::new(0.0, 3.0),
        ]);
        let mut recorder = StepRecorder::new();
        let path = find_route_dijkstra(&graph, 0, 1, &mut recorder);
        assert_eq!(path, Some(vec![0, 1]));
        assert_eq!(recorder.expansion_order(), vec![0, 1]);
    }

    #[test]
    fn unknown_endpoints_yield_none() {
        let graph = build_graph(&[Point::new(0.0, 0.0), Point::new(0.0, 1.0)]);
        let mut observer = NoopObserver;
        assert_eq!(find_route_dijkstra(&graph, 0, 9, &mut observer), None);
        assert_eq!(
            find_route_a_star_heap(&graph, 9, 0, Heuristic::Haversine, &mut observer),
            None
        );
    }
}
