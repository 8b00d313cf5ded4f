//! Kindle Clippings command-line application.
//!
//! The binary loads `clippings.toml`, wires the configured backend adapters
//! into the use cases of `kc-app`, and renders each command's view to stdout.

pub mod bootstrap;
pub mod cli;
pub mod render;
