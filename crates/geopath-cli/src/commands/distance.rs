//! Distance command handler: compare two points with one of the distance
//! functions.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use geopath_lib::{Heuristic, Node};

use geopath_cli::output::{render_json, OutputFormat};
use geopath_cli::waypoints::parse_point;

/// Arguments for the distance command.
#[derive(Debug, Clone, Args)]
pub struct DistanceCommandArgs {
    /// First point as `LAT,LON`.
    #[arg(long, allow_hyphen_values = true)]
    pub from: String,
    /// Second point as `LAT,LON`.
    #[arg(long, allow_hyphen_values = true)]
    pub to: String,
    /// Distance function (`haversine`, `euclidean` or `manhattan`).
    #[arg(long, default_value_t = Heuristic::Haversine)]
    pub metric: Heuristic,
}

#[derive(Debug, Serialize)]
struct DistanceReport {
    metric: Heuristic,
    distance: f64,
    unit: &'static str,
}

/// Handle the distance subcommand.
pub fn handle_distance_command(args: &DistanceCommandArgs, format: OutputFormat) -> Result<()> {
    let from = parse_point(&args.from).context("invalid --from")?;
    let to = parse_point(&args.to).context("invalid --to")?;
    from.validate()?;
    to.validate()?;

    let distance = args
        .metric
        .estimate(&Node::new(0, from), &Node::new(1, to));
    let unit = match args.metric {
        Heuristic::Haversine => "km",
        Heuristic::Euclidean | Heuristic::Manhattan => "deg",
    };

    if format.is_json() {
        render_json(&DistanceReport {
            metric: args.metric,
            distance,
            unit,
        })
        .context("failed to write distance output")?;
    } else {
        println!("{} distance: {:.2} {}", args.metric, distance, unit);
    }
    Ok(())
}
