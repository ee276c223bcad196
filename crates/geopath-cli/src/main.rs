mod commands;

use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use geopath_cli::output::{print_footer, OutputFormat};
use geopath_cli::waypoints::WaypointArgs;

use commands::distance::{handle_distance_command, DistanceCommandArgs};
use commands::graph::handle_graph_command;
use commands::search::{handle_search_command, SearchCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Waypoint pathfinding utilities")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Hide the elapsed-time footer on text output.
    #[arg(long, global = true)]
    no_footer: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the shortest path from the first to the last waypoint.
    Search(SearchCommandArgs),
    /// Show the chain graph built from the waypoints.
    Graph(WaypointArgs),
    /// Measure the distance between two points.
    Distance(DistanceCommandArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let started = Instant::now();

    match &cli.command {
        Command::Search(args) => handle_search_command(args, cli.format)?,
        Command::Graph(args) => handle_graph_command(args, cli.format)?,
        Command::Distance(args) => handle_distance_command(args, cli.format)?,
    }

    if cli.format == OutputFormat::Text && !cli.no_footer {
        print_footer(started.elapsed());
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
