//! Calling the entry point of a ready module.
use std::{fmt, path::PathBuf};

use anyhow::Context;
use tracing::{debug, info};
use wasmtime::{InstancePre, Store};
use wasmtime_wasi::{preview1::WasiP1Ctx, DirPerms, FilePerms, I32Exit, WasiCtxBuilder};

use crate::lib::errors::InvokeError;

/// Host resources exposed to the module through WASI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleCapabilities {
    pub inherit_env: bool,
    /// Host directories mounted at the same path inside the module.
    pub preopen_dirs: Vec<PathBuf>,
}

/// How the module's run ended when it did not trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleExit {
    pub code: i32,
}

impl ModuleExit {
    pub const SUCCESS: ModuleExit = ModuleExit { code: 0 };

    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Exit status as the host OS reports it (low eight bits).
    pub fn status_byte(&self) -> u8 {
        (self.code & 0xff) as u8
    }
}

/// A module whose runtime has signalled readiness.
///
/// `call_main` consumes the handle, so the entry point runs at most once.
pub struct LoadedModule {
    instance_pre: InstancePre<WasiP1Ctx>,
    program_name: String,
    entry_point: String,
    capabilities: ModuleCapabilities,
}

impl fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModule")
            .field("program_name", &self.program_name)
            .field("entry_point", &self.entry_point)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

impl LoadedModule {
    pub(crate) fn new(
        instance_pre: InstancePre<WasiP1Ctx>,
        program_name: String,
        entry_point: String,
        capabilities: ModuleCapabilities,
    ) -> Self {
        Self {
            instance_pre,
            program_name,
            entry_point,
            capabilities,
        }
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Instantiate the module and run its entry point with `args` as the command line.
    ///
    /// The module sees `[program_name, args...]` as its argument vector. WASI host calls
    /// block, so the module runs on the blocking pool.
    pub async fn call_main(self, args: Vec<String>) -> Result<ModuleExit, InvokeError> {
        tokio::task::spawn_blocking(move || self.run_entry(&args))
            .await
            .unwrap_or_else(|err| {
                Err(InvokeError::Aborted {
                    message: err.to_string(),
                })
            })
    }

    fn run_entry(self, args: &[String]) -> Result<ModuleExit, InvokeError> {
        let wasi = self
            .build_context(args)
            .map_err(|source| InvokeError::Context { source })?;
        let mut store = Store::new(self.instance_pre.module().engine(), wasi);

        debug!(
            target: "modlaunch::runtime",
            entry_point = %self.entry_point,
            argc = args.len(),
            "Invoking entry point"
        );
        let outcome = self
            .instance_pre
            .instantiate(&mut store)
            .and_then(|instance| {
                instance.get_typed_func::<(), ()>(&mut store, &self.entry_point)
            })
            .and_then(|entry| entry.call(&mut store, ()));

        match outcome {
            Ok(()) => Ok(ModuleExit::SUCCESS),
            Err(err) => match err.downcast_ref::<I32Exit>() {
                Some(exit) => {
                    info!(
                        target: "modlaunch::runtime",
                        exit_code = exit.0,
                        "Module exited via proc_exit"
                    );
                    Ok(ModuleExit { code: exit.0 })
                }
                None => Err(InvokeError::Trap {
                    entry: self.entry_point,
                    source: err,
                }),
            },
        }
    }

    fn build_context(&self, args: &[String]) -> anyhow::Result<WasiP1Ctx> {
        let mut builder = WasiCtxBuilder::new();
        builder.inherit_stdio().arg(&self.program_name).args(args);
        if self.capabilities.inherit_env {
            builder.inherit_env();
        }
        for dir in &self.capabilities.preopen_dirs {
            let guest = dir.to_string_lossy().into_owned();
            builder
                .preopened_dir(dir, guest, DirPerms::all(), FilePerms::all())
                .with_context(|| format!("failed to preopen {}", dir.display()))?;
        }
        Ok(builder.build_p1())
    }
}
