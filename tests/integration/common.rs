use std::{
    path::PathBuf,
    process::{Command, Output},
};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_modlaunch");

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture(relative: &str) -> String {
    fixtures_dir().join(relative).display().to_string()
}

/// Command for the launcher with a clean launcher environment.
pub fn launcher() -> Command {
    let mut command = Command::new(BINARY_PATH);
    command
        .env_remove("MODLAUNCH_BASE_DIR")
        .env_remove("MODLAUNCH_CONFIG_PATH")
        .env_remove("RUST_LOG");
    command
}

pub fn run_with_base_dir(args: &[&str]) -> Output {
    launcher()
        .arg("--base-dir")
        .arg(fixtures_dir())
        .args(args)
        .output()
        .expect("launcher process should start")
}

/// The argv buffer `echo_args.wat` writes: every argument NUL-terminated.
pub fn argv_bytes(args: &[&str]) -> Vec<u8> {
    let mut buffer = Vec::new();
    for arg in args {
        buffer.extend_from_slice(arg.as_bytes());
        buffer.push(0);
    }
    buffer
}
