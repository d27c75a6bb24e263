//! Load and validate the optional launcher configuration file.
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod launcher;
pub mod telemetry;
pub mod wasi;

pub use launcher::{
    parse_launcher_section, LauncherSection, RawLauncherSection, DEFAULT_ENTRY_POINT,
};
pub use wasi::{parse_wasi_section, RawWasiSection, WasiSection};

/// Top-level configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherConfig {
    pub launcher: LauncherSection,
    pub wasi: WasiSection,
    /// `None` when running on built-in defaults.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawLauncherConfig {
    launcher: Option<RawLauncherSection>,
    wasi: Option<RawWasiSection>,
}

impl LauncherConfig {
    /// Load the file picked by the launch profile, or fall back to defaults when none was given.
    pub fn load(path: Option<PathBuf>, from_env: bool) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                telemetry::log_env_source(&path, from_env);
                Self::load_from_path(path)
            }
            None => {
                telemetry::log_defaults();
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "modlaunch::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "modlaunch::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawLauncherConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "modlaunch::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "modlaunch::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawLauncherConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let launcher = parse_launcher_section(raw.launcher, &path)?;
        let wasi = parse_wasi_section(raw.wasi, &path)?;

        Ok(Self {
            launcher,
            wasi,
            source_path: Some(path),
        })
    }
}
