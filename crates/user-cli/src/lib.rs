//! # user-cli
//!
//! Command-line entry point for the user store.

pub mod cli;
pub mod commands;
pub mod state;

pub use cli::{Cli, Commands};
pub use commands::run_diagnostic;
pub use state::build_context;
