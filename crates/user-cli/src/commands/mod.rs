//! Console commands

mod diagnostic;

pub use diagnostic::run_diagnostic;
