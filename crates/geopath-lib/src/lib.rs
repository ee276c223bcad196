//! Geopath library entry points.
//!
//! This crate turns an ordered list of geographic waypoints into a weighted
//! chain graph and runs Dijkstra or A* over it, using great-circle distance as
//! both edge weight and default heuristic. Higher-level consumers (the CLI, map
//! front-ends) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod graph;
pub mod observer;
pub mod output;
pub mod path;
pub mod search;
pub mod travel;

pub use error::{Error, Result};
pub use geo::{euclidean, haversine_km, manhattan, Heuristic, Node, NodeId, Point, EARTH_RADIUS_KM};
pub use graph::{build_graph, Edge, Graph};
pub use observer::{
    CancellationToken, IterationLimit, NoopObserver, SearchObserver, SearchStep, StepCallback,
    StepDelay, StepRecorder,
};
pub use output::{GraphSummary, PathEndpoint, PathStep, SearchSummary, SummaryRenderMode};
pub use path::{find_route_a_star, find_route_a_star_heap, find_route_dijkstra, find_route_dijkstra_heap};
pub use search::{
    path_length, search, search_by_name, search_graph, search_with_observer, select_planner,
    AStarPlanner, DijkstraPlanner, PathPlanner, QueueStrategy, SearchAlgorithm, SearchOutcome,
    SearchRequest,
};
pub use travel::{estimate_travel_minutes, format_duration, TravelMode};
