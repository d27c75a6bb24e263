use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::lib::{errors::ConfigError, paths::is_nonempty_absolute};

/// Capabilities granted to the module through WASI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WasiSection {
    pub inherit_env: bool,
    pub preopen_dirs: Vec<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawWasiSection {
    pub inherit_env: Option<bool>,
    pub preopen_dirs: Option<Vec<PathBuf>>,
}

pub fn parse_wasi_section(
    raw: Option<RawWasiSection>,
    path: &Path,
) -> Result<WasiSection, ConfigError> {
    let wasi_raw = raw.unwrap_or_default();
    let inherit_env = wasi_raw.inherit_env.unwrap_or(false);
    let preopen_dirs = wasi_raw.preopen_dirs.unwrap_or_default();
    validate_preopen_dirs(&preopen_dirs, path)?;

    Ok(WasiSection {
        inherit_env,
        preopen_dirs,
    })
}

fn validate_preopen_dirs(dirs: &[PathBuf], path: &Path) -> Result<(), ConfigError> {
    for entry in dirs {
        if !is_nonempty_absolute(entry) {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "wasi.preopen_dirs",
                message: format!("Only absolute paths are allowed: {}", entry.display()),
            });
        }
    }
    Ok(())
}
