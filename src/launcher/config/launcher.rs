use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_ENTRY_POINT: &str = "_start";

/// Module location and entry point settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherSection {
    pub base_dir: Option<PathBuf>,
    pub entry_point: String,
}

impl Default for LauncherSection {
    fn default() -> Self {
        Self {
            base_dir: None,
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawLauncherSection {
    pub base_dir: Option<PathBuf>,
    pub entry_point: Option<String>,
}

pub fn parse_launcher_section(
    raw: Option<RawLauncherSection>,
    path: &Path,
) -> Result<LauncherSection, ConfigError> {
    let launcher_raw = raw.unwrap_or_default();

    let base_dir = launcher_raw.base_dir;
    if let Some(dir) = &base_dir {
        validate_base_dir(dir, path)?;
    }

    let entry_point = launcher_raw
        .entry_point
        .unwrap_or_else(|| DEFAULT_ENTRY_POINT.to_string());
    validate_entry_point(&entry_point, path)?;

    Ok(LauncherSection {
        base_dir,
        entry_point,
    })
}

fn validate_base_dir(dir: &Path, path: &Path) -> Result<(), ConfigError> {
    if dir.as_os_str().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "launcher.base_dir",
            message: "Remove the key or set a directory".into(),
        });
    }
    Ok(())
}

fn validate_entry_point(entry_point: &str, path: &Path) -> Result<(), ConfigError> {
    if entry_point.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "launcher.entry_point",
            message: "Entry point export name must not be blank".into(),
        });
    }
    Ok(())
}
