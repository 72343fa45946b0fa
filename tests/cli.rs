use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn climstats() -> Command {
    Command::cargo_bin("climstats").unwrap()
}

#[test]
fn prints_demo_table() {
    climstats()
        .args(["--demo", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# values\n"))
        .stdout(predicate::str::contains("# unit: days per week"))
        .stdout(predicate::str::contains("climatology time\tDJF\tMAM\tJJA\tSON"));
}

#[test]
fn prints_single_bar_without_legend_column() {
    climstats()
        .args([
            "--demo",
            "--print",
            "--models",
            "CCSM4",
            "--scenarios",
            "rcp85",
            "--years",
            "2071-2100",
            "--spatial-mean",
            "latlon",
            "--units",
            "year",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# unit: days per avg year"))
        .stdout(predicate::str::contains("CCSM4"))
        .stdout(predicate::str::contains("\n\t"));
}

#[test]
fn prints_ratio_along_models() {
    climstats()
        .args([
            "--demo",
            "--print",
            "--y-axis",
            "ratio",
            "--scenarios",
            "rcp85",
            "--x-axis",
            "models",
            "--spatial-mean",
            "latlon",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# ratio to historical"))
        .stdout(predicate::str::contains("# unit: future/historical"))
        .stdout(predicate::str::contains("models\tCCSM4\tGFDL-CM3\tMIROC5"));
}

#[test]
fn rejects_mixed_climatology_selection() {
    climstats()
        .args(["--demo", "--print", "--clims", "DJF,Jan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid selection"));
}

#[test]
fn rejects_unknown_model() {
    climstats()
        .args(["--demo", "--print", "--models", "NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOPE"));
}

#[test]
fn writes_log_file() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("climstats.log");
    climstats()
        .args(["--demo", "--print", "--log"])
        .arg(&log)
        .assert()
        .success();
    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Starting Climstats"));
}

#[test]
fn missing_file_fails() {
    let dir = tempdir().unwrap();
    climstats()
        .arg(dir.path().join("nope.nc"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn no_input_fails() {
    climstats()
        .arg("--print")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input"));
}
