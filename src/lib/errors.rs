use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating the launcher configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures while turning a module identifier into a filesystem path.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Module identifier must not be empty")]
    EmptyModule,
    #[error("Working directory {cwd} has no project root segment")]
    NoProjectRoot { cwd: PathBuf },
    #[error(
        "Launcher directory {launcher_dir} is not installed under {ancestor}; \
         pass --base-dir or set MODLAUNCH_BASE_DIR"
    )]
    LayoutMismatch {
        launcher_dir: PathBuf,
        ancestor: PathBuf,
    },
    #[error("Failed to determine launcher location: {source}")]
    LauncherLocation {
        #[source]
        source: io::Error,
    },
}

/// Failures raised before the module signals readiness.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No module found at {path}")]
    NotFound { path: PathBuf },
    #[error("Failed to compile module {path}: {source:#}")]
    Compile {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("Failed to link module {path}: {source:#}")]
    Link {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("Module {path} does not export entry point `{entry}`")]
    MissingEntryPoint { path: PathBuf, entry: String },
    #[error("Entry point `{entry}` of module {path} must be a function taking and returning nothing")]
    EntryPointSignature { path: PathBuf, entry: String },
    #[error("Loader for {path} stopped before the module was ready: {message}")]
    LoaderAborted { path: PathBuf, message: String },
}

/// Failures raised while calling into a ready module.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("Failed to prepare module context: {source:#}")]
    Context {
        #[source]
        source: anyhow::Error,
    },
    #[error("Module trapped in `{entry}`: {source:?}")]
    Trap {
        entry: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("Module execution stopped unexpectedly: {message}")]
    Aborted { message: String },
}
