//! Startup: configuration, logging, dependency wiring and command dispatch.

pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, Secrets};
pub use run::run_command;
pub use wiring::{wire_dependencies, AppDeps, WiringError};
