//! Waypoint sources for the CLI.
//!
//! Waypoints come either from `--from`/`--via`/`--to` flags or from a JSON or
//! CSV file. JSON files hold an array of `{"lat": .., "lon": ..}` objects or
//! `[lat, lon]` pairs; CSV files need `lat` and `lon` header columns.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Deserialize;

use geopath_lib::Point;

/// Waypoint arguments shared by commands that build a graph.
#[derive(Debug, Clone, Default, Args)]
pub struct WaypointArgs {
    /// Starting point as `LAT,LON`.
    #[arg(long, allow_hyphen_values = true, conflicts_with = "points_file")]
    pub from: Option<String>,
    /// Intermediate waypoint as `LAT,LON`; repeat in travel order.
    #[arg(long, allow_hyphen_values = true, conflicts_with = "points_file")]
    pub via: Vec<String>,
    /// Destination point as `LAT,LON`.
    #[arg(long, allow_hyphen_values = true, conflicts_with = "points_file")]
    pub to: Option<String>,
    /// Read the ordered waypoints from a `.json` or `.csv` file instead.
    #[arg(long)]
    pub points_file: Option<PathBuf>,
}

impl WaypointArgs {
    /// Resolve the arguments into an ordered list of points.
    pub fn resolve(&self) -> Result<Vec<Point>> {
        if let Some(path) = &self.points_file {
            return load_points_file(path);
        }

        let mut points = Vec::with_capacity(self.via.len() + 2);
        if let Some(from) = &self.from {
            points.push(parse_point(from).context("invalid --from")?);
        }
        for via in &self.via {
            points.push(parse_point(via).context("invalid --via")?);
        }
        if let Some(to) = &self.to {
            points.push(parse_point(to).context("invalid --to")?);
        }

        if points.is_empty() {
            bail!("no waypoints given; pass --from/--to or --points-file");
        }
        Ok(points)
    }
}

/// Parse a `LAT,LON` pair.
pub fn parse_point(value: &str) -> Result<Point> {
    let Some((lat, lon)) = value.split_once(',') else {
        bail!("expected LAT,LON but got '{value}'");
    };
    let lat: f64 = lat
        .trim()
        .parse()
        .with_context(|| format!("invalid latitude in '{value}'"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .with_context(|| format!("invalid longitude in '{value}'"))?;
    Ok(Point::new(lat, lon))
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonWaypoint {
    Object { lat: f64, lon: f64 },
    Pair([f64; 2]),
}

impl From<JsonWaypoint> for Point {
    fn from(value: JsonWaypoint) -> Self {
        match value {
            JsonWaypoint::Object { lat, lon } => Point::new(lat, lon),
            JsonWaypoint::Pair([lat, lon]) => Point::new(lat, lon),
        }
    }
}

/// Load waypoints from a JSON or CSV file, chosen by extension.
pub fn load_points_file(path: &Path) -> Result<Vec<Point>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let points = match extension.as_deref() {
        Some("json") => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let records: Vec<JsonWaypoint> = serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse waypoints in {}", path.display()))?;
            records.into_iter().map(Point::from).collect()
        }
        Some("csv") => {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_path(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            reader
                .deserialize::<Point>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| format!("failed to parse waypoints in {}", path.display()))?
        }
        _ => bail!(
            "unsupported waypoint file {}; expected a .json or .csv extension",
            path.display()
        ),
    };

    tracing::debug!(count = points.len(), path = %path.display(), "loaded waypoints");
    Ok(points)
}
