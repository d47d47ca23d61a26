#![forbid(unsafe_code)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn cvmplot(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("cvmplot").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("RUST_LOG")
        .env_remove("CVMPLOT_CONFIG")
        .env_remove("CVMPLOT_LOG_LEVEL")
        .env_remove("CVMPLOT_OUTPUT_DIR")
        .env_remove("CVMPLOT_WIDTH")
        .env_remove("CVMPLOT_HEIGHT");
    cmd
}

#[test]
fn config_show_resolves_env() {
    let dir = tempdir().unwrap();
    cvmplot(dir.path())
        .args(["config", "show"])
        .env("CVMPLOT_WIDTH", "1024")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"width\": 1024"))
        .stdout(predicate::str::contains("\"source\": null"));
}

#[test]
fn config_show_reads_working_dir_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("cvmplot.toml"), "height = 600\n").unwrap();
    cvmplot(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"height\": 600"))
        .stdout(predicate::str::contains("cvmplot.toml"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("custom.toml"), "log_level = \"loud\"\n").unwrap();
    cvmplot(dir.path())
        .args(["--config", "custom.toml", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log_level"));
}

#[test]
fn write_template_creates_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cvmplot.toml");
    cvmplot(dir.path())
        .args(["config", "write-template", "--path"])
        .arg(&path)
        .assert()
        .success();
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[naive_filter]"));
    assert!(contents.contains("[threshold]"));
}

#[test]
fn write_template_refuses_overwrite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cvmplot.toml");
    fs::write(&path, "width = 900\n").unwrap();
    cvmplot(dir.path())
        .args(["config", "write-template"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "width = 900\n");

    cvmplot(dir.path())
        .args(["config", "write-template", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("[scan]"));
}
