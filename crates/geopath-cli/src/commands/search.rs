//! Search command handler for running Dijkstra/A* over waypoints.

use anyhow::{Context, Result};
use clap::Args;

use geopath_lib::{
    search_with_observer, Heuristic, IterationLimit, QueueStrategy, SearchAlgorithm,
    SearchRequest, SearchStep, SearchSummary, StepCallback, StepDelay, StepRecorder, TravelMode,
};

use geopath_cli::output::{render_summary, OutputFormat};
use geopath_cli::waypoints::WaypointArgs;

/// Arguments for the search command.
#[derive(Debug, Clone, Args)]
pub struct SearchCommandArgs {
    #[command(flatten)]
    pub waypoints: WaypointArgs,
    /// Algorithm to run (`dijkstra` or `astar`).
    #[arg(long, default_value_t = SearchAlgorithm::Dijkstra)]
    pub algorithm: SearchAlgorithm,
    /// Heuristic for A* (`haversine`, `euclidean` or `manhattan`).
    #[arg(long, default_value_t = Heuristic::Haversine)]
    pub heuristic: Heuristic,
    /// Candidate selection (`linear` scan or binary `heap`).
    #[arg(long, default_value_t = QueueStrategy::LinearScan)]
    pub queue: QueueStrategy,
    /// Pause after each expanded node, in milliseconds.
    #[arg(long, default_value_t = 0)]
    pub step_delay_ms: u64,
    /// Give up after this many iterations.
    #[arg(long)]
    pub max_iterations: Option<usize>,
    /// Annotate the result with a travel-time estimate.
    #[arg(long)]
    pub travel_mode: Option<TravelMode>,
    /// Also print the order in which nodes were expanded.
    #[arg(long)]
    pub show_steps: bool,
}

impl SearchCommandArgs {
    /// Convert CLI args to a library [`SearchRequest`].
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest::new(self.algorithm)
            .with_heuristic(self.heuristic)
            .with_queue(self.queue)
    }
}

/// Handle the search subcommand.
pub fn handle_search_command(args: &SearchCommandArgs, format: OutputFormat) -> Result<()> {
    let points = args.waypoints.resolve()?;
    let request = args.to_request();

    let mut recorder = StepRecorder::new();
    let mut observer = (
        (
            StepDelay::from_millis(args.step_delay_ms),
            IterationLimit::new(args.max_iterations.unwrap_or(usize::MAX)),
        ),
        (
            &mut recorder,
            StepCallback(|step: &SearchStep| {
                tracing::debug!(
                    iteration = step.iteration,
                    node = step.current,
                    frontier = step.frontier,
                    "expanded node"
                );
            }),
        ),
    );

    let outcome = search_with_observer(&request, &points, &mut observer)
        .context("search request was rejected")?;
    tracing::info!(
        algorithm = %outcome.algorithm,
        waypoints = points.len(),
        hops = outcome.hop_count(),
        iterations = outcome.iterations,
        "search finished"
    );

    let mut summary = SearchSummary::from_outcome(&outcome);
    if let Some(mode) = args.travel_mode {
        summary = summary.with_travel_mode(mode);
    }

    let expansion = args.show_steps.then_some(recorder.steps.as_slice());
    render_summary(&summary, format, expansion).context("failed to write search output")?;
    Ok(())
}
