//! Module loading, readiness, and entry point invocation.
mod invoke;
mod loader;
mod startup;

pub use invoke::{LoadedModule, ModuleCapabilities, ModuleExit};
pub use loader::{LoadRequest, ModuleLoader, PendingModule};
pub use startup::{launch_in, run_launch, LaunchPlan, RuntimeExit};
