#[path = "integration/common.rs"]
mod common;

#[path = "integration/launch_process.rs"]
mod launch_process;

#[path = "integration/launch_config.rs"]
mod launch_config;
