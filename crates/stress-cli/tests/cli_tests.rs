//! End-to-end tests for the `stress` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn stress() -> Command {
    Command::cargo_bin("stress").unwrap()
}

fn sample_config(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    stress().arg("init").arg(&path).arg("--quiet").assert().success();
    path
}

#[test]
fn test_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = sample_config(&dir, "stress.toml");
    assert!(fs::read_to_string(&path).unwrap().contains("[[scenarios]]"));

    stress()
        .arg("init")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    stress().arg("init").arg(&path).arg("--force").assert().success();
}

#[test]
fn test_init_yaml() {
    let dir = TempDir::new().unwrap();
    let path = sample_config(&dir, "stress.yaml");

    stress()
        .args(["scenarios", "--format", "json"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Price Stress\""));
}

#[test]
fn test_scenarios_table() {
    let dir = TempDir::new().unwrap();
    let path = sample_config(&dir, "stress.toml");

    stress()
        .arg("scenarios")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Beta Stress"))
        .stdout(predicate::str::contains("price_vol"))
        .stdout(predicate::str::contains("per underlying"));
}

#[test]
fn test_run_table_with_summary() {
    let dir = TempDir::new().unwrap();
    let path = sample_config(&dir, "stress.toml");

    stress()
        .arg("run")
        .arg(&path)
        .args(["--scenario", "Price Stress", "--summary", "--heatmap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Price Stress"))
        .stdout(predicate::str::contains("AGG_AAPL"))
        .stdout(predicate::str::contains("Max Loss"))
        .stdout(predicate::str::contains("scale:"));
}

#[test]
fn test_run_json() {
    let dir = TempDir::new().unwrap();
    let path = sample_config(&dir, "stress.toml");

    let output = stress()
        .args(["--format", "json", "run"])
        .arg(&path)
        .args(["--scenario", "1-Day EPR"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let scenarios = doc["scenarios"].as_array().unwrap();
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0]["table"]["scenario"], "1-Day EPR");
    assert_eq!(
        scenarios[0]["table"]["columns"],
        serde_json::json!(["-1.000", "-0.500", "0.500", "1.000"])
    );
}

#[test]
fn test_run_output_dir() {
    let dir = TempDir::new().unwrap();
    let path = sample_config(&dir, "stress.toml");
    let out = dir.path().join("out");

    stress()
        .arg("run")
        .arg(&path)
        .arg("--output-dir")
        .arg(&out)
        .arg("--quiet")
        .assert()
        .success();

    let csv = fs::read_to_string(out.join("price_stress.csv")).unwrap();
    let header = csv.lines().next().unwrap();
    assert!(header.starts_with("scenario,underlying,position_id"));
    assert!(header.ends_with("-0.100,-0.050,0.000,0.050,0.100"));
    assert!(out.join("1_day_epr.csv").exists());
    assert!(out.join("time_decay.csv").exists());
}

#[test]
fn test_run_unknown_scenario() {
    let dir = TempDir::new().unwrap();
    let path = sample_config(&dir, "stress.toml");

    stress()
        .arg("run")
        .arg(&path)
        .args(["--scenario", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown scenario: Nope"));
}

#[test]
fn test_run_missing_file() {
    stress()
        .args(["run", "does-not-exist.toml"])
        .assert()
        .failure();
}

#[test]
fn test_price_call() {
    stress()
        .args([
            "--format", "json", "price", "--spot", "100", "--strike", "100", "--vol", "0.2",
            "--dte", "365", "--rate", "0.05",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": 10.45"));
}

#[test]
fn test_price_rejects_negative_vol() {
    stress()
        .args(["price", "--spot", "100", "--strike", "100", "--vol=-0.2", "--dte", "30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid vol"));
}

const TWO_SCENARIOS: &str = r#"
[portfolio]
name = "Slugs"

[[portfolio.positions]]
id = "pos1"
quantity = 100.0
instrument = { type = "equity", symbol = "AAPL", price = 150.0 }

[[scenarios]]
type = "price"
name = "Price Stress"
n_up = 1
n_down = 1

[[scenarios]]
type = "price"
name = "SECOND"
n_up = 2
n_down = 2
"#;

#[test]
fn test_run_output_dir_keeps_colliding_names_apart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("slugs.toml");
    fs::write(&path, TWO_SCENARIOS.replace("SECOND", "price-stress")).unwrap();
    let out = dir.path().join("out");

    stress()
        .arg("run")
        .arg(&path)
        .arg("--output-dir")
        .arg(&out)
        .arg("--quiet")
        .assert()
        .success();

    let mut files: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files, ["price_stress.csv", "price_stress_2.csv"]);

    let first = fs::read_to_string(out.join("price_stress.csv")).unwrap();
    let second = fs::read_to_string(out.join("price_stress_2.csv")).unwrap();
    assert!(first.lines().nth(1).unwrap().starts_with("Price Stress,"));
    assert!(second.lines().nth(1).unwrap().starts_with("price-stress,"));
}

#[test]
fn test_run_rejects_duplicate_scenario_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dup.toml");
    fs::write(&path, TWO_SCENARIOS.replace("SECOND", "Price Stress")).unwrap();

    stress()
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate scenario name: Price Stress"));
}
