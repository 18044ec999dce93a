//! Command-line arguments

use clap::{Parser, Subcommand};

/// User store console
#[derive(Debug, Parser)]
#[command(name = "user-cli")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Create a default user and list every stored username
    #[command(name = "app:test")]
    Test,
}

impl Cli {
    /// Selected command, `app:test` when none is given
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::try_parse_from(["user-cli"]).unwrap();
        assert_eq!(cli.command(), Commands::Test);
    }

    #[test]
    fn test_named_command() {
        let cli = Cli::try_parse_from(["user-cli", "app:test"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Test));
    }

    #[test]
    fn test_rejects_flags() {
        assert!(Cli::try_parse_from(["user-cli", "app:test", "--in-memory"]).is_err());
        assert!(Cli::try_parse_from(["user-cli", "unknown"]).is_err());
    }
}
