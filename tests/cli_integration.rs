//! CLI integration tests for geoshapes
//!
//! These tests drive the binary against a temporary data file, checking that
//! commands persist their effects and that IDs stay unique across runs.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary workspace with its own data and config file
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn data_file(&self) -> PathBuf {
        self.dir.path().join("shapes.json")
    }

    fn config_file(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Get a command instance bound to this workspace
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("geoshapes"));
        cmd.arg("--file")
            .arg(self.data_file())
            .arg("--config")
            .arg(self.config_file())
            .env_remove("RUST_LOG");
        cmd
    }

    /// Runs a command with `--format json` and parses stdout
    fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .cmd()
            .args(args)
            .args(["--format", "json"])
            .assert()
            .success();

        let stdout = String::from_utf8_lossy(&output.get_output().stdout);
        serde_json::from_str(&stdout).unwrap()
    }

    fn records(&self) -> Vec<serde_json::Value> {
        let text = fs::read_to_string(self.data_file()).unwrap();
        serde_json::from_str(&text).unwrap()
    }
}

// =============================================================================
// Creation
// =============================================================================

#[test]
fn test_add_persists_shape() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["add", "circle", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created Circle #1"));

    let records = ws.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[0]["name"], "Circle");
    assert_eq!(records[0]["tipo"], "2D");
    assert_eq!(records[0]["radius"], 2.0);
}

#[test]
fn test_add_converts_units_to_meters() {
    let ws = Workspace::new();

    let json = ws.json(&["add", "cube", "50", "--unit", "cm"]);
    assert_eq!(json["unit"], "cm");

    let side = ws.records()[0]["side"].as_f64().unwrap();
    assert!((side - 0.5).abs() < 1e-12);
}

#[test]
fn test_add_rejects_non_positive_dimension() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["add", "square", "-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive"));

    ws.cmd()
        .args(["add", "sphere", "0"])
        .assert()
        .failure();

    assert!(ws.records().is_empty());
}

#[test]
fn test_add_rejects_unknown_type() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["add", "triangle", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shape type"));
}

// =============================================================================
// IDs across runs
// =============================================================================

#[test]
fn test_ids_continue_after_restart() {
    let ws = Workspace::new();

    assert_eq!(ws.json(&["add", "circle", "1"])["id"], 1);
    assert_eq!(ws.json(&["add", "square", "1"])["id"], 2);

    ws.cmd().args(["delete", "2"]).assert().success();

    // The highest remaining ID is 1, so the next one is 2 again
    assert_eq!(ws.json(&["add", "cube", "1"])["id"], 2);
}

#[test]
fn test_ids_follow_hand_edited_file() {
    let ws = Workspace::new();
    fs::write(
        ws.data_file(),
        r#"[{"id": 41, "name": "Sphere", "tipo": "3D", "radius": 1.0}]"#,
    )
    .unwrap();

    assert_eq!(ws.json(&["add", "circle", "1"])["id"], 42);
}

#[test]
fn test_clear_restarts_ids() {
    let ws = Workspace::new();
    ws.cmd().args(["add", "circle", "1"]).assert().success();
    ws.cmd().args(["add", "circle", "2"]).assert().success();

    ws.cmd()
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 shape(s)"));

    assert!(ws.records().is_empty());
    assert_eq!(ws.json(&["add", "sphere", "1"])["id"], 1);
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn test_list_filters_by_type() {
    let ws = Workspace::new();
    ws.cmd().args(["add", "circle", "1"]).assert().success();
    ws.cmd().args(["add", "cube", "1"]).assert().success();
    ws.cmd().args(["add", "circle", "3"]).assert().success();

    let circles = ws.json(&["list", "--type", "CIRCLE"]);
    let ids: Vec<_> = circles
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);

    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cube"))
        .stdout(predicate::str::contains("3 shape(s)"));
}

#[test]
fn test_list_empty() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No shapes stored"));
}

#[test]
fn test_show_displays_metrics() {
    let ws = Workspace::new();
    ws.cmd().args(["add", "square", "3"]).assert().success();

    ws.cmd()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Square (2D)"))
        .stdout(predicate::str::contains("9.00 m²"))
        .stdout(predicate::str::contains("12.00 m"));

    let json = ws.json(&["show", "1"]);
    assert_eq!(json["area"], 9.0);
    assert_eq!(json["perimeter"], 12.0);
}

#[test]
fn test_show_missing_shape_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["show", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Shape not found: 7"));
}

#[test]
fn test_delete_missing_shape_keeps_count() {
    let ws = Workspace::new();
    ws.cmd().args(["add", "circle", "1"]).assert().success();

    ws.cmd().args(["delete", "5"]).assert().failure();

    assert_eq!(ws.json(&["count"])["count"], 1);
}

#[test]
fn test_stats_counts_every_type() {
    let ws = Workspace::new();
    ws.cmd().args(["add", "circle", "1"]).assert().success();
    ws.cmd().args(["add", "cube", "2"]).assert().success();

    let json = ws.json(&["stats"]);
    assert_eq!(
        json["stats"],
        serde_json::json!({"total": 2, "circle": 1, "square": 0, "cube": 1, "sphere": 0})
    );
    assert_eq!(json["summary"]["total_volume"], 8.0);

    ws.cmd()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total shapes: 2"));
}

// =============================================================================
// Files
// =============================================================================

#[test]
fn test_creates_data_file_on_first_run() {
    let ws = Workspace::new();

    ws.cmd().arg("count").assert().success().stdout("0\n");

    assert!(ws.data_file().is_file());
    assert!(ws.records().is_empty());
}

#[test]
fn test_corrupt_file_is_tolerated() {
    let ws = Workspace::new();
    fs::write(ws.data_file(), "{ definitely not json").unwrap();

    ws.cmd().arg("count").assert().success().stdout("0\n");
    assert_eq!(ws.json(&["add", "circle", "1"])["id"], 1);
}

#[test]
fn test_unknown_records_are_skipped() {
    let ws = Workspace::new();
    fs::write(
        ws.data_file(),
        r#"[
            {"id": 1, "name": "Circle", "tipo": "2D", "radius": 1.0},
            {"id": 2, "name": "Hexagon", "tipo": "2D", "side": 1.0}
        ]"#,
    )
    .unwrap();

    assert_eq!(ws.json(&["count"])["count"], 1);
}

#[test]
fn test_export_and_import() {
    let source = Workspace::new();
    source.cmd().args(["add", "circle", "1"]).assert().success();
    source.cmd().args(["add", "sphere", "2"]).assert().success();

    let export_path = source.dir.path().join("out").join("export.json");
    source
        .cmd()
        .arg("export")
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 shape(s)"));

    let target = Workspace::new();
    target
        .cmd()
        .arg("import")
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 shape(s)"));

    assert_eq!(target.records().len(), 2);
    assert_eq!(target.json(&["add", "square", "1"])["id"], 3);
}

#[test]
fn test_import_missing_file_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["import", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_dry_run_leaves_file_untouched() {
    let ws = Workspace::new();
    ws.cmd().args(["add", "circle", "1"]).assert().success();

    ws.cmd().args(["add", "cube", "1", "--dry-run"]).assert().success();
    ws.cmd().args(["clear", "--dry-run"]).assert().success();

    assert_eq!(ws.records().len(), 1);
}

#[test]
fn test_config_disables_auto_save_but_cli_still_flushes() {
    let ws = Workspace::new();
    fs::write(ws.config_file(), "auto_save = false\nprecision = 1\n").unwrap();

    ws.cmd()
        .args(["add", "square", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("area 4.0 m²"));

    assert_eq!(ws.records().len(), 1);
}

#[test]
fn test_no_autosave_flag_flushes_once() {
    let ws = Workspace::new();

    let info = ws.json(&["info", "--no-autosave"]);
    assert_eq!(info["auto_save"], false);

    ws.cmd()
        .args(["add", "sphere", "1", "--no-autosave"])
        .assert()
        .success();
    ws.cmd()
        .args(["--no-autosave", "add", "circle", "2"])
        .assert()
        .success();

    let records = ws.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["id"], 2);
}

#[test]
fn test_failed_save_warns_once() {
    let ws = Workspace::new();
    let blocker = ws.dir.path().join("blocker");
    fs::write(&blocker, "a file, not a directory").unwrap();

    let output = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("geoshapes"))
        .arg("--file")
        .arg(blocker.join("shapes.json"))
        .arg("--config")
        .arg(ws.config_file())
        .env_remove("RUST_LOG")
        .args(["add", "circle", "1"])
        .assert()
        .success()
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("not saved").count(), 1, "stderr: {}", stderr);
    assert!(!stderr.contains("automatic save failed"));
}

#[test]
fn test_exhausted_ids() {
    let ws = Workspace::new();
    fs::write(
        ws.data_file(),
        r#"[{"id": 18446744073709551615, "name": "Cube", "side": 1.0}]"#,
    )
    .unwrap();

    assert!(ws.json(&["info"])["next_id"].is_null());

    ws.cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("IDs exhausted"));

    ws.cmd()
        .args(["add", "circle", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exhausted"));

    assert_eq!(ws.records().len(), 1);
}

#[test]
fn test_info_reports_file() {
    let ws = Workspace::new();
    ws.cmd().args(["add", "circle", "1"]).assert().success();

    let json = ws.json(&["info"]);
    assert_eq!(json["file"]["exists"], true);
    assert_eq!(json["shapes"], 1);
    assert_eq!(json["next_id"], 2);
}

#[test]
fn test_convert_units() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["convert", "12", "in", "cm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12.00 in = 30.48 cm"));

    // Conversion does not need the data file
    assert!(!ws.data_file().exists());
}
