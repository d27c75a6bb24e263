//! Entry point for modlaunch.
use std::process::ExitCode;

use anyhow::Error;
use clap::Parser;
use modlaunch::{
    cli::{LaunchArgs, LaunchProfile},
    launcher::{
        config::LauncherConfig,
        runtime::{self, ModuleExit, RuntimeExit},
    },
    lib::telemetry,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(exit) => ExitCode::from(exit.status_byte()),
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<ModuleExit, RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let args = LaunchArgs::parse();
    let profile = args.into_profile().map_err(RuntimeExit::from_error)?;
    run_module(profile).await
}

async fn run_module(profile: LaunchProfile) -> Result<ModuleExit, RuntimeExit> {
    let config = LauncherConfig::load(profile.config_path.clone(), profile.config_from_env())
        .map_err(|err| RuntimeExit::from_error(Error::new(err)))?;
    runtime::run_launch(profile, config).await
}
