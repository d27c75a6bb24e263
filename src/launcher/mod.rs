//! The module launcher: configuration, path resolution, and runtime.
pub mod config;
pub mod resolve;
pub mod runtime;
