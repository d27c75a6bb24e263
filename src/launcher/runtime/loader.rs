//! Module loading and the readiness handle.
use std::path::{Path, PathBuf};

use tokio::task::JoinHandle;
use tracing::{debug, info};
use wasmtime::{Engine, ExternType, InstancePre, Linker, Module};
use wasmtime_wasi::preview1::{self, WasiP1Ctx};

use crate::lib::errors::LoadError;

use super::invoke::{LoadedModule, ModuleCapabilities};

/// Compiles modules and links their WASI imports.
#[derive(Clone, Default)]
pub struct ModuleLoader {
    engine: Engine,
}

/// What to load and how the module should be run once it is ready.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub path: PathBuf,
    pub program_name: String,
    pub entry_point: String,
    pub capabilities: ModuleCapabilities,
}

/// A module whose runtime is still initialising.
///
/// `ready` resolves exactly once, to either a callable module or the reason it
/// could not be prepared.
pub struct PendingModule {
    path: PathBuf,
    task: JoinHandle<Result<LoadedModule, LoadError>>,
}

impl ModuleLoader {
    /// Start loading; compilation runs on the blocking pool.
    pub fn load(&self, request: LoadRequest) -> PendingModule {
        let engine = self.engine.clone();
        let path = request.path.clone();
        let task = tokio::task::spawn_blocking(move || prepare(&engine, request));
        PendingModule { path, task }
    }
}

impl PendingModule {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for the module's readiness signal.
    pub async fn ready(self) -> Result<LoadedModule, LoadError> {
        match self.task.await {
            Ok(result) => result,
            Err(err) => Err(LoadError::LoaderAborted {
                path: self.path,
                message: err.to_string(),
            }),
        }
    }
}

fn prepare(engine: &Engine, request: LoadRequest) -> Result<LoadedModule, LoadError> {
    let LoadRequest {
        path,
        program_name,
        entry_point,
        capabilities,
    } = request;

    if !path.is_file() {
        return Err(LoadError::NotFound { path });
    }

    debug!(
        target: "modlaunch::runtime",
        path = %path.display(),
        "Compiling module"
    );
    let module = Module::from_file(engine, &path).map_err(|source| LoadError::Compile {
        path: path.clone(),
        source,
    })?;

    check_entry_point(&module, &path, &entry_point)?;

    let instance_pre = link(engine, &module).map_err(|source| LoadError::Link {
        path: path.clone(),
        source,
    })?;

    info!(
        target: "modlaunch::runtime",
        path = %path.display(),
        entry_point = %entry_point,
        "Module ready"
    );
    Ok(LoadedModule::new(
        instance_pre,
        program_name,
        entry_point,
        capabilities,
    ))
}

/// Link WASI preview 1 and pre-instantiate so unresolved imports fail before readiness.
fn link(engine: &Engine, module: &Module) -> anyhow::Result<InstancePre<WasiP1Ctx>> {
    let mut linker: Linker<WasiP1Ctx> = Linker::new(engine);
    preview1::add_to_linker_sync(&mut linker, |ctx| ctx)?;
    linker.instantiate_pre(module)
}

fn check_entry_point(module: &Module, path: &Path, entry_point: &str) -> Result<(), LoadError> {
    match module.get_export(entry_point) {
        Some(ExternType::Func(func)) if func.params().len() == 0 && func.results().len() == 0 => {
            Ok(())
        }
        Some(_) => Err(LoadError::EntryPointSignature {
            path: path.to_path_buf(),
            entry: entry_point.to_string(),
        }),
        None => Err(LoadError::MissingEntryPoint {
            path: path.to_path_buf(),
            entry: entry_point.to_string(),
        }),
    }
}
