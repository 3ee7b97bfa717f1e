use std::fs;

use assert_cmd::Command;
use tempfile::tempdir;

const BIN: &str = "filmap";

const CONFIG: &str = "testdata/filmap.hcl";

#[test]
fn test_empty_args() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.assert().failure();
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-h").assert().success();
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-V").assert().success();
}

#[test]
fn test_missing_coordinates() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["2010", "34.05"]).assert().failure();
}

#[test]
fn test_bad_resolver() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["-R", "google", "2010", "34.05", "-118.24"])
        .assert()
        .failure();
}

#[test]
fn test_missing_config() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["-c", "testdata/nope.hcl", "2010", "34.05", "-118.24"])
        .assert()
        .failure();
}

#[test]
fn test_missing_dataset() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("map.html");

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["-c", CONFIG, "-q", "-o"])
        .arg(&out)
        .args(["2010", "34.05", "-118.24", "testdata/nope.list"])
        .assert()
        .failure();
    assert!(!out.exists());
}

#[test]
fn test_negative_radius() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("map.html");

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["-c", CONFIG, "-q", "-r", "-5", "-o"])
        .arg(&out)
        .args(["2010", "34.05", "-118.24"])
        .assert()
        .failure();
    assert!(!out.exists());
}

#[test]
fn test_bad_latitude() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["-c", CONFIG, "-q", "2010", "95.0", "-118.24"])
        .assert()
        .failure();
}

#[test]
fn test_no_output_directory() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["-c", CONFIG, "-q", "-o", "/nonexistent/dir/map.html"])
        .args(["2010", "34.0536909", "-118.242766"])
        .assert()
        .failure();
}

#[test]
fn test_map_with_gazetteer() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("map.html");

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let assert = cmd
        .args(["-c", CONFIG, "-y", "4", "-o"])
        .arg(&out)
        .args(["2010", "34.0536909", "-118.242766"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("Example Film (2010)"));
    assert!(stdout.contains("\"#1 Single\" (2006)"));
    assert!(!stdout.contains("Old Classic"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Films from the year 2010"));
    assert!(html.contains("setView([34.0536909, -118.242766], 15)"));
    assert!(html.contains("Example Film (2010)"));
    assert!(!html.contains("Night Shift"));
}

#[test]
fn test_map_offline_empty() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("map.html");

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["-c", CONFIG, "-q", "-R", "none", "-o"])
        .arg(&out)
        .args(["1920", "-33.86", "151.2"])
        .assert()
        .success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains(r#"id="film-markers">[]</script>"#));
}
