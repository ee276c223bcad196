//! Graph command handler: show the chain graph built from waypoints.

use anyhow::{Context, Result};

use geopath_lib::{build_graph, GraphSummary};

use geopath_cli::output::{render_json, OutputFormat};
use geopath_cli::waypoints::WaypointArgs;

/// Handle the graph subcommand.
pub fn handle_graph_command(args: &WaypointArgs, format: OutputFormat) -> Result<()> {
    let points = args.resolve()?;
    for point in &points {
        point.validate()?;
    }

    let summary = GraphSummary::from_graph(&build_graph(&points));
    if format.is_json() {
        render_json(&summary).context("failed to write graph output")?;
    } else {
        print!("{}", summary.render_plain());
    }
    Ok(())
}
