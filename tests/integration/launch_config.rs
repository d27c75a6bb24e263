use std::fs;

use tempfile::tempdir;

use crate::common::{fixture, fixtures_dir, launcher};

#[test]
fn config_file_supplies_base_dir() {
    let temp = tempdir().expect("can create temporary directory");
    let config_path = temp.path().join("modlaunch.toml");
    fs::write(
        &config_path,
        format!(
            "[launcher]\nbase_dir = \"{}\"\n",
            fixtures_dir().display()
        ),
    )
    .expect("can write config");

    let output = launcher()
        .arg("--config")
        .arg(&config_path)
        .arg("exit_code.wat")
        .output()
        .expect("launcher process should start");

    assert_eq!(output.status.code(), Some(7), "output: {output:?}");
}

#[test]
fn configured_entry_point_must_be_exported() {
    let output = launcher()
        .env("MODLAUNCH_CONFIG_PATH", fixture("launcher_missing_entry.toml"))
        .arg("--base-dir")
        .arg(fixtures_dir())
        .arg("exit_code.wat")
        .output()
        .expect("launcher process should start");

    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not_exported"), "stderr: {stderr}");
}

#[test]
fn invalid_config_stops_before_loading() {
    let output = launcher()
        .arg("--config")
        .arg(fixture("launcher_relative_preopen.toml"))
        .arg("--base-dir")
        .arg(fixtures_dir())
        .arg("exit_code.wat")
        .output()
        .expect("launcher process should start");

    assert_eq!(output.status.code(), Some(1), "output: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("wasi.preopen_dirs"), "stderr: {stderr}");
}

#[test]
fn entry_flag_overrides_config_file() {
    let output = launcher()
        .arg("--config")
        .arg(fixture("launcher_missing_entry.toml"))
        .arg("--entry")
        .arg("_start")
        .arg("--base-dir")
        .arg(fixtures_dir())
        .arg("exit_code.wat")
        .output()
        .expect("launcher process should start");

    assert_eq!(output.status.code(), Some(7), "output: {output:?}");
}
