//! Integration tests for the geopath CLI.
//!
//! These tests use `assert_cmd` to verify:
//! - search output in text and JSON formats
//! - waypoint loading from JSON and CSV files
//! - argument validation and exit codes

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("geopath-cli").expect("binary exists");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Helper to create a temporary directory holding waypoint files.
struct TestEnv {
    temp_dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
        }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write waypoint file");
        path
    }
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("command runs");
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn search_prints_path_and_total() {
    cli()
        .args([
            "search", "--from", "0,0", "--via", "0,1", "--to", "0,2", "--no-footer",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Path: 0 -> 2 (2 hops, algorithm: dijkstra)",
        ))
        .stdout(predicate::str::contains("Total distance: 222.39 km"));
}

#[test]
fn search_json_reports_node_ids() {
    let json = stdout_json(cli().args([
        "search",
        "--format",
        "json",
        "--algorithm",
        "astar",
        "--from",
        "0,0",
        "--via",
        "0,1",
        "--to",
        "0,2",
    ]));

    assert_eq!(json["algorithm"], "astar");
    assert_eq!(json["heuristic"], "haversine");
    assert_eq!(json["found"], true);
    let ids: Vec<u64> = json["steps"]
        .as_array()
        .expect("steps array")
        .iter()
        .map(|step| step["id"].as_u64().expect("numeric id"))
        .collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert!(json.get("expansion").is_none());
}

#[test]
fn search_json_includes_expansion_when_requested() {
    let json = stdout_json(cli().args([
        "search",
        "--format",
        "json",
        "--show-steps",
        "--queue",
        "heap",
        "--from",
        "10,10",
        "--to",
        "10,11",
    ]));

    let expansion = json["expansion"].as_array().expect("expansion array");
    assert_eq!(expansion.len(), json["iterations"].as_u64().unwrap() as usize);
    assert_eq!(expansion[0]["current"], 0);
}

#[test]
fn search_with_single_point_finds_no_path() {
    cli()
        .args(["search", "--from", "40.0,-74.0", "--no-footer"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("No path found"));
}

#[test]
fn search_accepts_negative_coordinates() {
    cli()
        .args([
            "search",
            "--from",
            "-33.8688,151.2093",
            "--to",
            "-37.8136,144.9631",
            "--format",
            "basic",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ -33.8688, 151.2093"))
        .stdout(predicate::str::contains("- -37.8136, 144.9631"));
}

#[test]
fn search_reads_json_points_file() {
    let env = TestEnv::new();
    let path = env.write(
        "route.json",
        r#"[{"lat": 0.0, "lon": 0.0}, {"lat": 0.0, "lon": 1.0}, [0.0, 2.0]]"#,
    );

    let json = stdout_json(cli().args([
        "search",
        "--format",
        "json",
        "--points-file",
        path.to_str().unwrap(),
    ]));
    assert_eq!(json["hops"], 2);
}

#[test]
fn search_reads_csv_points_file() {
    let env = TestEnv::new();
    let path = env.write("route.csv", "lat,lon\n0,0\n0,1\n0,2\n0,3\n");

    let json = stdout_json(cli().args([
        "search",
        "--format",
        "json",
        "--points-file",
        path.to_str().unwrap(),
    ]));
    assert_eq!(json["hops"], 3);
}

#[test]
fn search_with_travel_mode_prints_estimate() {
    cli()
        .args([
            "search",
            "--from",
            "0,0",
            "--to",
            "0,2",
            "--travel-mode",
            "driving",
            "--no-footer",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated time (driving): 6h 21min"));
}

#[test]
fn iteration_limit_abandons_search() {
    cli()
        .args([
            "search",
            "--from",
            "0,0",
            "--via",
            "0,1",
            "--via",
            "0,2",
            "--to",
            "0,3",
            "--max-iterations",
            "1",
            "--no-footer",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("No path found"));
}

#[test]
fn unknown_algorithm_is_rejected() {
    cli()
        .args(["search", "--algorithm", "bfs", "--from", "0,0", "--to", "0,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown algorithm 'bfs'"));
}

#[test]
fn out_of_range_point_is_rejected() {
    cli()
        .args(["search", "--from", "0,0", "--to", "120,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside latitude"));
}

#[test]
fn missing_waypoints_is_an_error() {
    cli()
        .args(["search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no waypoints"));
}

#[test]
fn points_file_conflicts_with_inline_points() {
    let env = TestEnv::new();
    let path = env.write("route.json", "[]");

    cli()
        .args([
            "search",
            "--from",
            "0,0",
            "--points-file",
            path.to_str().unwrap(),
        ])
        .assert()
        .failure();
}

#[test]
fn graph_json_lists_both_edge_directions() {
    let json = stdout_json(cli().args([
        "graph", "--format", "json", "--from", "0,0", "--via", "0,1", "--to", "0,2",
    ]));

    assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(json["edges"].as_array().unwrap().len(), 4);
    assert_eq!(json["nodes"][1]["x"], 1.0);
}

#[test]
fn graph_text_lists_edges() {
    cli()
        .args(["graph", "--from", "0,0", "--to", "0,1", "--no-footer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Graph: 2 nodes, 2 directed edges"))
        .stdout(predicate::str::contains("0 -> 1 (111.19 km)"));
}

#[test]
fn distance_reports_haversine_km() {
    cli()
        .args(["distance", "--from", "0,0", "--to", "0,1", "--no-footer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("haversine distance: 111.19 km"));
}

#[test]
fn distance_supports_manhattan_metric() {
    let json = stdout_json(cli().args([
        "distance", "--format", "json", "--metric", "manhattan", "--from", "0,0", "--to", "3,4",
    ]));
    assert_eq!(json["distance"], 7.0);
    assert_eq!(json["unit"], "deg");
}

#[test]
fn text_output_prints_footer_by_default() {
    cli()
        .args(["distance", "--from", "0,0", "--to", "0,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed in"));
}
