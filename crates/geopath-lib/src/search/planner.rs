//! Search strategies behind a common trait.
//!
//! Each algorithm is wrapped in a planner so [`super::search_with_observer`]
//! can dispatch on [`SearchAlgorithm`] without knowing how the search runs.

use crate::geo::{Heuristic, NodeId};
use crate::graph::Graph;
use crate::observer::SearchObserver;
use crate::path::{
    find_route_a_star, find_route_a_star_heap, find_route_dijkstra, find_route_dijkstra_heap,
};

use super::{QueueStrategy, SearchAlgorithm, SearchRequest};

/// Trait for search strategies.
pub trait PathPlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> SearchAlgorithm;

    /// Execute the search on the given graph.
    ///
    /// Returns `Some(path)` if the goal was reached, `None` otherwise.
    fn find_path(
        &self,
        graph: &Graph,
        start: NodeId,
        goal: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Option<Vec<NodeId>>;
}

/// Dijkstra's algorithm planner.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner {
    queue: QueueStrategy,
}

impl DijkstraPlanner {
    pub fn new(queue: QueueStrategy) -> Self {
        Self { queue }
    }
}

impl PathPlanner for DijkstraPlanner {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &Graph,
        start: NodeId,
        goal: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Option<Vec<NodeId>> {
        match self.queue {
            QueueStrategy::LinearScan => find_route_dijkstra(graph, start, goal, observer),
            QueueStrategy::BinaryHeap => find_route_dijkstra_heap(graph, start, goal, observer),
        }
    }
}

/// A* planner guided by a configurable heuristic.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner {
    heuristic: Heuristic,
    queue: QueueStrategy,
}

impl AStarPlanner {
    pub fn new(heuristic: Heuristic, queue: QueueStrategy) -> Self {
        Self { heuristic, queue }
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }
}

impl PathPlanner for AStarPlanner {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &Graph,
        start: NodeId,
        goal: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Option<Vec<NodeId>> {
        match self.queue {
            QueueStrategy::LinearScan => {
                find_route_a_star(graph, start, goal, self.heuristic, observer)
            }
            QueueStrategy::BinaryHeap => {
                find_route_a_star_heap(graph, start, goal, self.heuristic, observer)
            }
        }
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &SearchRequest) -> Box<dyn PathPlanner> {
    match request.algorithm {
        SearchAlgorithm::Dijkstra => Box::new(DijkstraPlanner::new(request.queue)),
        SearchAlgorithm::AStar => Box::new(AStarPlanner::new(request.heuristic, request.queue)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dijkstra_planner_returns_correct_algorithm() {
        let planner = DijkstraPlanner::default();
        assert_eq!(planner.algorithm(), SearchAlgorithm::Dijkstra);
    }

    #[test]
    fn astar_planner_keeps_heuristic() {
        let planner = AStarPlanner::new(Heuristic::Manhattan, QueueStrategy::BinaryHeap);
        assert_eq!(planner.algorithm(), SearchAlgorithm::AStar);
        assert_eq!(planner.heuristic(), Heuristic::Manhattan);
    }

    #[test]
    fn select_planner_chooses_correct_type() {
        let request = SearchRequest::new(SearchAlgorithm::AStar);
        assert_eq!(select_planner(&request).algorithm(), SearchAlgorithm::AStar);

        let request = SearchRequest::default();
        assert_eq!(
            select_planner(&request).algorithm(),
            SearchAlgorithm::Dijkstra
        );
    }
}
