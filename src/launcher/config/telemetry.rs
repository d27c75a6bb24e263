use tracing::{debug, info};

use super::LauncherConfig;
use crate::cli::CONFIG_PATH_ENV;

pub fn log_env_source(path: &std::path::Path, from_env: bool) {
    if from_env {
        info!(
            target: "modlaunch::config",
            path = %path.display(),
            "Loading configuration using MODLAUNCH_CONFIG_PATH environment variable"
        );
    } else {
        debug!(
            target: "modlaunch::config",
            path = %path.display(),
            "Loading configuration from --config"
        );
    }
}

pub fn log_defaults() {
    debug!(
        target: "modlaunch::config",
        env = CONFIG_PATH_ENV,
        "No configuration file given; using built-in defaults"
    );
}

pub fn log_loaded(config: &LauncherConfig) {
    let source = config
        .source_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    info!(
        target: "modlaunch::config",
        path = %source,
        base_dir = ?config.launcher.base_dir,
        entry_point = %config.launcher.entry_point,
        inherit_env = config.wasi.inherit_env,
        preopen_dirs = config.wasi.preopen_dirs.len(),
        "Configuration file loaded successfully"
    );
}
