//! Telemetry initialization and launch span helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Filter used when `RUST_LOG` is unset; stderr is shared with the module.
const DEFAULT_FILTER: &str = "warn";

/// Initialize `tracing` and format developer logs on stderr.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of one module launch.
pub struct LaunchSpan {
    span: Span,
    started_at: Instant,
    launch_id: Uuid,
}

impl LaunchSpan {
    /// Start a launch span.
    pub fn start(module: &str) -> Self {
        let launch_id = Uuid::new_v4();
        let span = info_span!(
            target: "modlaunch::runtime",
            "module_launch",
            %launch_id,
            module
        );
        Self {
            span,
            started_at: Instant::now(),
            launch_id,
        }
    }

    /// Close the span while recording status and completion info.
    pub fn finish(self, status: &'static str, exit_code: Option<i32>) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "modlaunch::runtime",
            launch_id = %self.launch_id,
            status = status,
            exit_code = exit_code,
            elapsed_ms = elapsed_ms,
            "Completed module launch"
        );
    }
}

/// Payload describing how a launch was set up.
#[derive(Debug)]
pub struct LaunchModeTelemetry<'a> {
    pub module: &'a str,
    pub resolved_path: &'a str,
    pub resolution: &'a str,
    pub entry_point: &'a str,
    pub config_path: Option<&'a str>,
    pub pass_through: &'a [String],
}

/// Emit launch mode to `tracing`.
pub fn emit_launch_mode(telemetry: &LaunchModeTelemetry<'_>) {
    info!(
        target: "modlaunch::runtime",
        module = telemetry.module,
        resolved_path = telemetry.resolved_path,
        resolution = telemetry.resolution,
        entry_point = telemetry.entry_point,
        config_path = telemetry.config_path.unwrap_or(""),
        pass_through = ?telemetry.pass_through,
        "Launching module"
    );
}
