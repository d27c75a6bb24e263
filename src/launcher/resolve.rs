//! Turn a module identifier into the path handed to the loader.
//!
//! Absolute identifiers are used as given and an explicit base directory comes next.
//! Without one, the launcher falls back to
//! inferring the library root from the installation layout: the working directory's
//! last segment is taken as the project root marker, and the launcher climbs from its
//! own directory up to the working directory's parent before descending into that
//! marker.
use std::{
    env,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::lib::{
    errors::ResolveError,
    paths::{absolutize, segment_count},
};

/// Where the launcher sits and where it was started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherContext {
    pub launcher_dir: PathBuf,
    pub working_dir: PathBuf,
}

impl LauncherContext {
    pub fn new(launcher_dir: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            launcher_dir: launcher_dir.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Capture the running executable's directory and the process working directory.
    pub fn from_process() -> Result<Self, ResolveError> {
        let exe = env::current_exe().map_err(|source| ResolveError::LauncherLocation { source })?;
        let launcher_dir = exe
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| ResolveError::LauncherLocation {
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} has no parent directory", exe.display()),
                ),
            })?;
        let working_dir =
            env::current_dir().map_err(|source| ResolveError::LauncherLocation { source })?;
        Ok(Self::new(launcher_dir, working_dir))
    }
}

/// How a module path was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Absolute,
    BaseDir,
    InstallLayout,
}

impl Resolution {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Resolution::Absolute => "absolute",
            Resolution::BaseDir => "base_dir",
            Resolution::InstallLayout => "install_layout",
        }
    }
}

/// A module path together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub path: PathBuf,
    pub resolution: Resolution,
}

/// Resolve `module` against an explicit base directory or the install layout.
pub fn resolve_module_path(
    context: &LauncherContext,
    base_dir: Option<&Path>,
    module: &str,
) -> Result<ResolvedModule, ResolveError> {
    if module.is_empty() {
        return Err(ResolveError::EmptyModule);
    }

    let module_path = Path::new(module);
    let resolved = if module_path.is_absolute() {
        ResolvedModule {
            path: module_path.to_path_buf(),
            resolution: Resolution::Absolute,
        }
    } else if let Some(base_dir) = base_dir {
        ResolvedModule {
            path: absolutize(base_dir, &context.working_dir).join(module_path),
            resolution: Resolution::BaseDir,
        }
    } else {
        ResolvedModule {
            path: infer_from_layout(context, module_path)?,
            resolution: Resolution::InstallLayout,
        }
    };

    debug!(
        target: "modlaunch::resolve",
        module,
        resolution = resolved.resolution.as_str(),
        path = %resolved.path.display(),
        "Resolved module path"
    );
    Ok(resolved)
}

/// Climb from the launcher directory to the working directory's parent, then enter the
/// project root segment. The launcher must live under that parent.
pub fn infer_from_layout(context: &LauncherContext, module: &Path) -> Result<PathBuf, ResolveError> {
    let working_dir = &context.working_dir;
    let (ancestor, project_root) = match (working_dir.parent(), working_dir.file_name()) {
        (Some(parent), Some(name)) => (parent, name),
        _ => {
            return Err(ResolveError::NoProjectRoot {
                cwd: working_dir.clone(),
            })
        }
    };

    let below_ancestor = context.launcher_dir.strip_prefix(ancestor).map_err(|_| {
        ResolveError::LayoutMismatch {
            launcher_dir: context.launcher_dir.clone(),
            ancestor: ancestor.to_path_buf(),
        }
    })?;

    let mut path = context.launcher_dir.clone();
    for _ in 0..segment_count(below_ancestor) {
        path.push("..");
    }
    path.push(project_root);
    path.push(module);
    Ok(path)
}
