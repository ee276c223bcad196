//! Geopath CLI library.
//!
//! This crate provides command-line interface utilities for the waypoint
//! pathfinder: waypoint parsing, terminal styling and output formatting.

pub mod output;
pub mod terminal;
pub mod waypoints;
