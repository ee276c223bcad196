//! Geographic primitives and the distance functions used as edge weights and
//! A* heuristics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Node identifiers are positions in the input sequence.
pub type NodeId = usize;

/// A geographic location in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Reject non-finite values and coordinates outside the valid ranges.
    pub fn validate(&self) -> Result<()> {
        let finite = self.lat.is_finite() && self.lon.is_finite();
        if !finite
            || !(-90.0..=90.0).contains(&self.lat)
            || !(-180.0..=180.0).contains(&self.lon)
        {
            return Err(Error::invalid_coordinate(self.lat, self.lon));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for Point {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// A point bound to its index in the input sequence.
///
/// `x`/`y` mirror longitude/latitude so planar heuristics can run on the same
/// node without reprojecting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(id: NodeId, point: Point) -> Self {
        Self {
            id,
            lat: point.lat,
            lon: point.lon,
            x: point.lon,
            y: point.lat,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.lat, self.lon)
    }
}

/// Great-circle distance in kilometres between two points.
pub fn haversine_km(a: Point, b: Point) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Straight-line distance on the planar `(x, y)` projection.
pub fn euclidean(a: &Node, b: &Node) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Taxicab distance on the planar `(x, y)` projection.
pub fn manhattan(a: &Node, b: &Node) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Distance estimate used by A* to rank open nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    Euclidean,
    Manhattan,
    /// Geodesic distance in kilometres; matches the edge weight metric.
    #[default]
    Haversine,
}

impl Heuristic {
    pub fn estimate(self, from: &Node, to: &Node) -> f64 {
        match self {
            Heuristic::Euclidean => euclidean(from, to),
            Heuristic::Manhattan => manhattan(from, to),
            Heuristic::Haversine => haversine_km(from.point(), to.point()),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Heuristic::Euclidean => "euclidean",
            Heuristic::Manhattan => "manhattan",
            Heuristic::Haversine => "haversine",
        };
        f.write_str(value)
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Heuristic::Euclidean),
            "manhattan" => Ok(Heuristic::Manhattan),
            "haversine" => Ok(Heuristic::Haversine),
            _ => Err(Error::unknown_heuristic(value)),
        }
    }
}
