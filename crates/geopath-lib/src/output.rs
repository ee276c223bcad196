use std::fmt::Write;

use serde::Serialize;

use crate::geo::{haversine_km, Heuristic, Node, NodeId};
use crate::graph::{Edge, Graph};
use crate::search::{SearchAlgorithm, SearchOutcome};
use crate::travel::{estimate_travel_minutes, format_duration, TravelMode};

/// Presentation style for turning a [`SearchSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryRenderMode {
    PlainText,
    RichText,
    Basic,
}

/// Endpoint of a found path.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PathEndpoint {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

impl From<&Node> for PathEndpoint {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id,
            lat: node.lat,
            lon: node.lon,
        }
    }
}

/// Node visited along a found path.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PathStep {
    pub index: usize,
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    /// Distance from the previous step; absent on the first step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_km: Option<f64>,
}

/// Estimated time to cover the path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TravelEstimate {
    pub mode: TravelMode,
    pub minutes: u64,
    pub display: String,
}

/// Structured representation of a search that higher-level consumers can
/// serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchSummary {
    pub algorithm: SearchAlgorithm,
    pub heuristic: Heuristic,
    pub found: bool,
    pub hops: usize,
    pub total_distance_km: f64,
    pub iterations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<PathEndpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<PathEndpoint>,
    pub steps: Vec<PathStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel: Option<TravelEstimate>,
}

impl SearchSummary {
    /// Convert a [`SearchOutcome`] into a summary with per-leg distances.
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        let steps = outcome
            .path
            .iter()
            .enumerate()
            .map(|(index, node)| PathStep {
                index,
                id: node.id,
                lat: node.lat,
                lon: node.lon,
                leg_km: index
                    .checked_sub(1)
                    .map(|previous| haversine_km(outcome.path[previous].point(), node.point())),
            })
            .collect();

        Self {
            algorithm: outcome.algorithm,
            heuristic: outcome.heuristic,
            found: outcome.is_found(),
            hops: outcome.hop_count(),
            total_distance_km: outcome.total_distance_km,
            iterations: outcome.iterations,
            start: outcome.path.first().map(PathEndpoint::from),
            goal: outcome.path.last().map(PathEndpoint::from),
            steps,
            travel: None,
        }
    }

    /// Attach a travel-time estimate for the total distance.
    pub fn with_travel_mode(mut self, mode: TravelMode) -> Self {
        let minutes = estimate_travel_minutes(self.total_distance_km, mode);
        self.travel = Some(TravelEstimate {
            mode,
            minutes,
            display: format_duration(minutes),
        });
        self
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: SummaryRenderMode) -> String {
        match mode {
            SummaryRenderMode::PlainText => self.render_plain(),
            SummaryRenderMode::RichText => self.render_rich(),
            SummaryRenderMode::Basic => self.render_basic(),
        }
    }

    fn header_algorithm(&self) -> String {
        match self.algorithm {
            SearchAlgorithm::AStar => format!("{}, heuristic: {}", self.algorithm, self.heuristic),
            SearchAlgorithm::Dijkstra => self.algorithm.to_string(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let (Some(start), Some(goal)) = (self.start, self.goal) else {
            let _ = writeln!(
                buffer,
                "No path found (algorithm: {}, {} iterations)",
                self.header_algorithm(),
                self.iterations
            );
            return buffer;
        };

        let _ = writeln!(
            buffer,
            "Path: {} -> {} ({} hops, algorithm: {})",
            start.id,
            goal.id,
            self.hops,
            self.header_algorithm()
        );
        for step in &self.steps {
            match step.leg_km {
                Some(leg) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {:.4}, {:.4} (+{:.2} km)",
                        step.index, step.lat, step.lon, leg
                    );
                }
                None => {
                    let _ = writeln!(buffer, "{:>3}: {:.4}, {:.4}", step.index, step.lat, step.lon);
                }
            }
        }
        let _ = writeln!(buffer, "Total distance: {:.2} km", self.total_distance_km);
        if let Some(travel) = &self.travel {
            let _ = writeln!(buffer, "Estimated time ({}): {}", travel.mode, travel.display);
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        if !self.found {
            let _ = writeln!(
                buffer,
                "**No path found** (algorithm: `{}`)",
                self.header_algorithm()
            );
            return buffer;
        }

        let _ = writeln!(
            buffer,
            "**Path**: {} hops, {:.2} km (algorithm: `{}`)",
            self.hops,
            self.total_distance_km,
            self.header_algorithm()
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "* {:>2}. `{:.4}, {:.4}` (node `{}`)",
                step.index, step.lat, step.lon, step.id
            );
        }
        if let Some(travel) = &self.travel {
            let _ = writeln!(buffer, "\n_Estimated {} time: {}_", travel.mode, travel.display);
        }
        buffer
    }

    fn render_basic(&self) -> String {
        let mut buffer = String::new();
        let len = self.steps.len();
        for (i, step) in self.steps.iter().enumerate() {
            let prefix = if i == 0 {
                '+'
            } else if i + 1 == len {
                '-'
            } else {
                '|'
            };
            let _ = writeln!(buffer, "{} {:.4}, {:.4}", prefix, step.lat, step.lon);
        }
        let _ = writeln!(buffer, "{:.2} km", self.total_distance_km);
        buffer
    }
}

/// Serialisable view of a graph's nodes and directed edges.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphSummary {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphSummary {
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().copied().collect(),
        }
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Graph: {} nodes, {} directed edges",
            self.nodes.len(),
            self.edges.len()
        );
        for node in &self.nodes {
            let _ = writeln!(buffer, "{:>3}: {:.4}, {:.4}", node.id, node.lat, node.lon);
        }
        for edge in &self.edges {
            let _ = writeln!(
                buffer,
                "{} -> {} ({:.2} km)",
                edge.source, edge.target, edge.distance
            );
        }
        buffer
    }
}
