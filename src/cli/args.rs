//! CLI argument definitions using clap
//!
//! Commands:
//! - filterq compile --config <path>
//! - filterq render --config <path>
//! - filterq suggest --config <path>
//! - filterq catalog --config <path>
//! - filterq default-filter --config <path>

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// filterq - compile line-oriented filter queries against a schema
#[derive(Parser, Debug)]
#[command(name = "filterq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile query text from stdin into a JSON filter list
    Compile {
        /// Path to configuration file
        #[arg(long, default_value = "./filterq.json")]
        config: PathBuf,
    },

    /// Render a JSON filter list from stdin as query text
    Render {
        /// Path to configuration file
        #[arg(long, default_value = "./filterq.json")]
        config: PathBuf,
    },

    /// Suggest completions for the last line of the query text on stdin
    Suggest {
        /// Path to configuration file
        #[arg(long, default_value = "./filterq.json")]
        config: PathBuf,
    },

    /// Print every available field and its constraints
    Catalog {
        /// Path to configuration file
        #[arg(long, default_value = "./filterq.json")]
        config: PathBuf,
    },

    /// Print the field and constraint a new filter row starts with
    DefaultFilter {
        /// Path to configuration file
        #[arg(long, default_value = "./filterq.json")]
        config: PathBuf,
    },
}

impl Command {
    /// Configuration file the command runs with
    pub fn config_path(&self) -> &Path {
        match self {
            Command::Compile { config }
            | Command::Render { config }
            | Command::Suggest { config }
            | Command::Catalog { config }
            | Command::DefaultFilter { config } => config,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path() {
        let cli = Cli::try_parse_from(["filterq", "compile"]).unwrap();
        assert_eq!(cli.command.config_path(), Path::new("./filterq.json"));
    }

    #[test]
    fn test_explicit_config_path() {
        let cli =
            Cli::try_parse_from(["filterq", "default-filter", "--config", "/etc/q.json"]).unwrap();
        assert!(matches!(cli.command, Command::DefaultFilter { .. }));
        assert_eq!(cli.command.config_path(), Path::new("/etc/q.json"));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["filterq", "explain"]).is_err());
    }
}
