//! LaunchProfile and config path resolution.
use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::lib::paths::absolutize;

pub const CONFIG_PATH_ENV: &str = "MODLAUNCH_CONFIG_PATH";
pub const BASE_DIR_ENV: &str = "MODLAUNCH_BASE_DIR";

/// Where the configuration file path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Cli,
    Env,
    Missing,
}

/// Resolved launch profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchProfile {
    /// Module identifier exactly as given on the command line.
    pub module: String,
    /// Arguments forwarded to the module's entry point.
    pub pass_through: Vec<String>,
    pub base_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub config_source: ConfigSource,
    pub entry_override: Option<String>,
    pub preopen_dirs: Vec<PathBuf>,
}

impl LaunchProfile {
    pub fn config_from_env(&self) -> bool {
        self.config_source == ConfigSource::Env
    }
}

/// Resolve config path in the order: CLI override → env var → none.
pub fn resolve_config_path(
    override_path: Option<PathBuf>,
) -> Result<(Option<PathBuf>, ConfigSource)> {
    let (path, source) = match override_path {
        Some(path) => (path, ConfigSource::Cli),
        None => match env::var_os(CONFIG_PATH_ENV).filter(|value| !value.is_empty()) {
            Some(value) => (PathBuf::from(value), ConfigSource::Env),
            None => return Ok((None, ConfigSource::Missing)),
        },
    };

    Ok((Some(anchor_at_cwd(&path)?), source))
}

/// Make host directories absolute so the module sees them at a stable path.
pub fn resolve_preopen_dirs(dirs: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    dirs.iter().map(|dir| anchor_at_cwd(dir)).collect()
}

fn anchor_at_cwd(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(absolutize(path, &cwd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_config_path_wins() {
        let (path, source) = resolve_config_path(Some(PathBuf::from("/etc/modlaunch.toml")))
            .expect("absolute override resolves");
        assert_eq!(path, Some(PathBuf::from("/etc/modlaunch.toml")));
        assert_eq!(source, ConfigSource::Cli);
    }

    #[test]
    fn relative_preopen_dirs_are_anchored() {
        let cwd = env::current_dir().expect("cwd is readable");
        let dirs = resolve_preopen_dirs(vec![PathBuf::from("data"), PathBuf::from("/srv")])
            .expect("dirs resolve");
        assert_eq!(dirs, vec![cwd.join("data"), PathBuf::from("/srv")]);
    }
}
