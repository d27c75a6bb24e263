//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

use super::{resolve_config_path, resolve_preopen_dirs, LaunchProfile, BASE_DIR_ENV};

/// Command-line arguments.
///
/// Launcher options must come before `<MODULE>`; everything after it is handed to the
/// module untouched.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "modlaunch",
    author,
    version,
    about = "Load a WebAssembly command module and run it with the given arguments",
    long_about = None
)]
pub struct LaunchArgs {
    /// Directory modules are resolved against (skips install layout inference).
    #[arg(long = "base-dir", env = BASE_DIR_ENV, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,
    /// Path to a launcher config file (overrides MODLAUNCH_CONFIG_PATH).
    #[arg(long = "config", value_name = "PATH")]
    pub config_override: Option<PathBuf>,
    /// Exported function to call instead of the configured entry point.
    #[arg(long = "entry", value_name = "NAME")]
    pub entry_override: Option<String>,
    /// Host directory to expose to the module at the same path (repeatable).
    #[arg(long = "dir", value_name = "DIR")]
    pub preopen_dirs: Vec<PathBuf>,
    /// Module to load, then the arguments forwarded verbatim to it.
    ///
    /// Parsing stops at the first positional, so `--help`, `-V`, and `--` after the
    /// module belong to the module.
    #[arg(
        value_name = "MODULE",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl LaunchArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn into_profile(self) -> Result<LaunchProfile> {
        let mut command = self.command.into_iter();
        let module = command
            .next()
            .filter(|module| !module.trim().is_empty())
            .ok_or_else(|| anyhow!("module identifier must not be empty"))?;
        let pass_through: Vec<String> = command.collect();
        if let Some(entry) = &self.entry_override {
            if entry.trim().is_empty() {
                return Err(anyhow!("--entry must name an exported function"));
            }
        }

        let (config_path, config_source) = resolve_config_path(self.config_override)?;
        let preopen_dirs = resolve_preopen_dirs(self.preopen_dirs)?;

        Ok(LaunchProfile {
            module,
            pass_through,
            base_dir: self.base_dir,
            config_path,
            config_source,
            entry_override: self.entry_override,
            preopen_dirs,
        })
    }
}
