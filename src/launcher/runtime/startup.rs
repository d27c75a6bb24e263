use std::process::ExitCode;

use anyhow::Error;

use crate::{
    cli::LaunchProfile,
    launcher::{
        config::LauncherConfig,
        resolve::{resolve_module_path, LauncherContext},
        runtime::{LoadRequest, ModuleCapabilities, ModuleExit, ModuleLoader},
    },
    lib::telemetry::{self, LaunchModeTelemetry, LaunchSpan},
};

/// Bundles a launch error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("modlaunch: {}", self.message);
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Settings merged from the launch profile (CLI/env) and the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub base_dir: Option<std::path::PathBuf>,
    pub entry_point: String,
    pub capabilities: ModuleCapabilities,
}

impl LaunchPlan {
    /// CLI and environment values win over the file; preopened dirs are combined.
    pub fn merge(profile: &LaunchProfile, config: &LauncherConfig) -> Self {
        let base_dir = profile
            .base_dir
            .clone()
            .or_else(|| config.launcher.base_dir.clone());
        let entry_point = profile
            .entry_override
            .clone()
            .unwrap_or_else(|| config.launcher.entry_point.clone());

        let mut preopen_dirs = config.wasi.preopen_dirs.clone();
        for dir in &profile.preopen_dirs {
            if !preopen_dirs.contains(dir) {
                preopen_dirs.push(dir.clone());
            }
        }

        Self {
            base_dir,
            entry_point,
            capabilities: ModuleCapabilities {
                inherit_env: config.wasi.inherit_env,
                preopen_dirs,
            },
        }
    }
}

/// Resolve, load, wait for readiness, and run the module's entry point once.
pub async fn run_launch(
    profile: LaunchProfile,
    config: LauncherConfig,
) -> Result<ModuleExit, RuntimeExit> {
    let context = LauncherContext::from_process().map_err(RuntimeExit::from_error)?;
    launch_in(&context, profile, config).await
}

/// Same as [`run_launch`] with an explicit launcher location.
pub async fn launch_in(
    context: &LauncherContext,
    profile: LaunchProfile,
    config: LauncherConfig,
) -> Result<ModuleExit, RuntimeExit> {
    let plan = LaunchPlan::merge(&profile, &config);
    let resolved = resolve_module_path(context, plan.base_dir.as_deref(), &profile.module)
        .map_err(RuntimeExit::from_error)?;

    let resolved_path = resolved.path.to_string_lossy();
    let config_path = config
        .source_path
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned());
    telemetry::emit_launch_mode(&LaunchModeTelemetry {
        module: &profile.module,
        resolved_path: resolved_path.as_ref(),
        resolution: resolved.resolution.as_str(),
        entry_point: &plan.entry_point,
        config_path: config_path.as_deref(),
        pass_through: &profile.pass_through,
    });

    let span = LaunchSpan::start(&profile.module);
    let pending = ModuleLoader::default().load(LoadRequest {
        path: resolved.path.clone(),
        program_name: profile.module.clone(),
        entry_point: plan.entry_point,
        capabilities: plan.capabilities,
    });

    let module = match pending.ready().await {
        Ok(module) => module,
        Err(err) => {
            span.finish("load_failed", None);
            return Err(RuntimeExit::from_error(err));
        }
    };

    match module.call_main(profile.pass_through).await {
        Ok(exit) => {
            span.finish("exited", Some(exit.code));
            Ok(exit)
        }
        Err(err) => {
            span.finish("trapped", None);
            Err(RuntimeExit::from_error(err))
        }
    }
}
