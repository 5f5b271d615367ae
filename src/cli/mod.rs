//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "clausewise",
    version,
    about = "Contract risk analysis with keyword-based clause detection",
    long_about = "Clausewise scans contract text against a configurable keyword rule set, derives a \
                  risk score and severity level, renders a highlighted preview and a markdown report, \
                  and keeps a JSON-backed history of past analyses."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/clausewise/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a contract and record the outcome in the history
    Analyze {
        /// Plain-text contract file to analyze
        file: Option<PathBuf>,

        /// Analyze a bundled sample contract instead of a file
        #[arg(short, long, conflicts_with = "file")]
        sample: Option<String>,

        /// Print the result as JSON instead of the rendered preview
        #[arg(long)]
        json: bool,

        /// Skip writing the markdown report artifact
        #[arg(long)]
        no_report: bool,
    },

    /// List past analyses
    History {
        /// Case-insensitive filename filter
        #[arg(short, long)]
        search: Option<String>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete one record from the history
    Delete {
        /// Record index as shown by `clausewise history`
        index: usize,

        /// Apply the same filename filter used when listing
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Delete all history records
    Clear,

    /// Export history to a CSV file
    Export {
        /// Output CSV path
        output: PathBuf,

        /// Case-insensitive filename filter
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show aggregate statistics over the history
    Stats,

    /// List bundled sample contracts
    Samples,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration and keyword rules
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
