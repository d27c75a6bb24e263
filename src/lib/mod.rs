//! Shared library modules providing error types, path utilities, and telemetry initialization.

pub mod errors;
pub mod paths;
pub mod telemetry;
