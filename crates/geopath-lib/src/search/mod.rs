//! Search entry points over waypoint graphs.
//!
//! This module provides:
//! - [`SearchAlgorithm`] - Supported algorithms (Dijkstra, A*)
//! - [`QueueStrategy`] - How the next node is chosen (linear scan or binary heap)
//! - [`SearchRequest`] - Per-call configuration
//! - [`SearchOutcome`] - Path, total length and the graph that was searched
//! - [`search`] - Main entry point, from waypoints to path
//!
//! # Strategy Pattern
//!
//! Algorithms are encapsulated behind the [`PathPlanner`] trait and picked by
//! [`select_planner`], so the orchestration here never branches on algorithm
//! details.
//!
//! # Example
//!
//! ```
//! use geopath_lib::{search, Point, SearchRequest, SearchAlgorithm};
//!
//! let points = [Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(0.0, 2.0)];
//! let outcome = search(&SearchRequest::new(SearchAlgorithm::AStar), &points)?;
//! assert_eq!(outcome.path_ids(), vec![0, 1, 2]);
//! # Ok::<(), geopath_lib::Error>(())
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, PathPlanner};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::{haversine_km, Heuristic, Node, NodeId, Point};
use crate::graph::{build_graph, Graph};
use crate::observer::{NoopObserver, SearchObserver, SearchStep};

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchAlgorithm {
    /// Dijkstra's algorithm (uniform cost).
    #[default]
    Dijkstra,
    /// A* search (heuristic guided).
    #[serde(rename = "astar")]
    AStar,
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchAlgorithm::Dijkstra => "dijkstra",
            SearchAlgorithm::AStar => "astar",
        };
        f.write_str(value)
    }
}

impl FromStr for SearchAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(SearchAlgorithm::Dijkstra),
            "astar" | "a-star" | "a_star" | "a*" => Ok(SearchAlgorithm::AStar),
            _ => Err(Error::unknown_algorithm(value)),
        }
    }
}

/// How the next node to expand is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueueStrategy {
    /// Scan the whole unvisited/open set each iteration.
    #[default]
    LinearScan,
    /// Keep candidates in a binary min-heap.
    BinaryHeap,
}

impl fmt::Display for QueueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            QueueStrategy::LinearScan => "linear",
            QueueStrategy::BinaryHeap => "heap",
        };
        f.write_str(value)
    }
}

impl FromStr for QueueStrategy {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "linear" | "linear-scan" | "linear_scan" => Ok(QueueStrategy::LinearScan),
            "heap" | "binary-heap" | "binary_heap" => Ok(QueueStrategy::BinaryHeap),
            _ => Err(Error::unknown_queue(value)),
        }
    }
}

/// Per-call search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    pub algorithm: SearchAlgorithm,
    /// Only consulted by A*.
    pub heuristic: Heuristic,
    pub queue: QueueStrategy,
}

impl SearchRequest {
    /// Request with the default haversine heuristic and linear-scan queue.
    pub fn new(algorithm: SearchAlgorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_queue(mut self, queue: QueueStrategy) -> Self {
        self.queue = queue;
        self
    }
}

/// Result of a search over a list of waypoints.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub algorithm: SearchAlgorithm,
    pub heuristic: Heuristic,
    /// Nodes from start to goal inclusive; empty when no path exists.
    pub path: Vec<Node>,
    pub total_distance_km: f64,
    /// Outer-loop iterations the search ran.
    pub iterations: usize,
    /// The graph the search ran on.
    pub graph: Graph,
}

impl SearchOutcome {
    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn path_ids(&self) -> Vec<NodeId> {
        self.path.iter().map(|node| node.id).collect()
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Sum of haversine distances between consecutive nodes, in kilometres.
pub fn path_length(path: &[Node]) -> f64 {
    path.windows(2)
        .map(|pair| haversine_km(pair[0].point(), pair[1].point()))
        .sum()
}

/// Search from the first to the last waypoint.
pub fn search(request: &SearchRequest, points: &[Point]) -> Result<SearchOutcome> {
    search_with_observer(request, points, &mut NoopObserver)
}

/// Search from the first to the last waypoint, reporting every iteration to
/// `observer`.
///
/// Fewer than two points, an unreachable goal and a cancelled search all
/// produce an outcome with an empty path and zero length.
pub fn search_with_observer(
    request: &SearchRequest,
    points: &[Point],
    observer: &mut dyn SearchObserver,
) -> Result<SearchOutcome> {
    for point in points {
        point.validate()?;
    }

    let graph = build_graph(points);
    if points.len() < 2 {
        return Ok(empty_outcome(request, graph, 0));
    }

    let start = 0;
    let goal = points.len() - 1;
    Ok(search_graph(request, graph, start, goal, observer))
}

/// Run a search over a caller-supplied graph.
///
/// Used when the graph does not come from [`build_graph`], e.g. to route over
/// a disconnected or hand-built topology.
pub fn search_graph(
    request: &SearchRequest,
    graph: Graph,
    start: NodeId,
    goal: NodeId,
    observer: &mut dyn SearchObserver,
) -> SearchOutcome {
    let planner = select_planner(request);
    let mut counter = IterationCounter {
        inner: observer,
        iterations: 0,
    };

    let route = planner.find_path(&graph, start, goal, &mut counter);
    let iterations = counter.iterations;

    let Some(route) = route else {
        tracing::debug!(
            algorithm = %request.algorithm,
            start,
            goal,
            iterations,
            "no path found"
        );
        return empty_outcome(request, graph, iterations);
    };

    let path: Vec<Node> = route
        .iter()
        .filter_map(|id| graph.node(*id).copied())
        .collect();
    let total_distance_km = path_length(&path);

    tracing::debug!(
        algorithm = %request.algorithm,
        hops = path.len().saturating_sub(1),
        total_distance_km,
        iterations,
        "search complete"
    );

    SearchOutcome {
        algorithm: request.algorithm,
        heuristic: request.heuristic,
        path,
        total_distance_km,
        iterations,
        graph,
    }
}

/// String-configured entry point for callers that hold names rather than
/// enums.
///
/// Unknown algorithm or heuristic names fail with
/// [`Error::InvalidArgument`].
pub fn search_by_name(
    algorithm: &str,
    points: &[Point],
    heuristic: Option<&str>,
) -> Result<SearchOutcome> {
    let algorithm: SearchAlgorithm = algorithm.parse()?;
    let heuristic = heuristic
        .map(str::parse::<Heuristic>)
        .transpose()?
        .unwrap_or_default();

    search(
        &SearchRequest::new(algorithm).with_heuristic(heuristic),
        points,
    )
}

fn empty_outcome(request: &SearchRequest, graph: Graph, iterations: usize) -> SearchOutcome {
    SearchOutcome {
        algorithm: request.algorithm,
        heuristic: request.heuristic,
        path: Vec::new(),
        total_distance_km: 0.0,
        iterations,
        graph,
    }
}

struct IterationCounter<'a> {
    inner: &'a mut dyn SearchObserver,
    iterations: usize,
}

impl SearchObserver for IterationCounter<'_> {
    fn on_step(&mut self, step: &SearchStep) {
        self.iterations += 1;
        self.inner.on_step(step);
    }

    fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names_parse() {
        assert_eq!("dijkstra".parse::<SearchAlgorithm>(), Ok(SearchAlgorithm::Dijkstra));
        assert_eq!("AStar".parse::<SearchAlgorithm>(), Ok(SearchAlgorithm::AStar));
        assert_eq!("a-star".parse::<SearchAlgorithm>(), Ok(SearchAlgorithm::AStar));
        let error = "bfs".parse::<SearchAlgorithm>().unwrap_err();
        assert!(error.is_invalid_argument());
    }

    #[test]
    fn queue_names_parse() {
        assert_eq!("heap".parse::<QueueStrategy>(), Ok(QueueStrategy::BinaryHeap));
        assert_eq!("linear".parse::<QueueStrategy>(), Ok(QueueStrategy::LinearScan));
        assert!("fibonacci".parse::<QueueStrategy>().is_err());
    }

    #[test]
    fn outcome_hop_count() {
        let graph = build_graph(&[Point::new(0.0, 0.0), Point::new(0.0, 1.0)]);
        let outcome = SearchOutcome {
            algorithm: SearchAlgorithm::Dijkstra,
            heuristic: Heuristic::Haversine,
            path: graph.nodes().to_vec(),
            total_distance_km: 111.0,
            iterations: 2,
            graph,
        };
        assert_eq!(outcome.hop_count(), 1);
        assert_eq!(outcome.path_ids(), vec![0, 1]);
    }

    #[test]
    fn path_length_of_short_paths_is_zero() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[Node::new(0, Point::new(1.0, 1.0))]), 0.0);
    }

    #[test]
    fn request_serialises_with_lowercase_names() {
        let request =
            SearchRequest::new(SearchAlgorithm::AStar).with_queue(QueueStrategy::BinaryHeap);
        let json = serde_json::to_string(&request).expect("serialise");
        assert_eq!(
            json,
            r#"{"algorithm":"astar","heuristic":"haversine","queue":"binary_heap"}"#
        );
    }
}
