//! feedfilter CLI library
//!
//! Command definitions, configuration resolution and command handlers for
//! the `feedfilter` binary. Handlers return `anyhow::Result`; storage
//! failures in the settings commands are reported without failing.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
