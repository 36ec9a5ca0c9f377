use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "modlink", version, about = "Share one dependency directory across projects via directory symlinks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to ~/.config/modlink/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Link TARGET (or PROJECT/node_modules) to the shared SOURCE directory
    #[command(group(ArgGroup::new("destination").required(true).args(["target", "project"])))]
    Link {
        /// Shared directory the link points to
        source: PathBuf,

        /// Path of the link to create
        target: Option<PathBuf>,

        /// Project root; the link is created as PROJECT/<subdir>
        #[arg(short, long, value_name = "DIR")]
        project: Option<PathBuf>,

        /// Subdirectory name used with --project (default: node_modules)
        #[arg(long, requires = "project", value_name = "NAME")]
        subdir: Option<String>,

        /// Replace an existing target without asking
        #[arg(short = 'y', long, conflicts_with = "no")]
        yes: bool,

        /// Never replace an existing target
        #[arg(long)]
        no: bool,
    },

    /// Show what currently sits at PATH
    Status {
        path: PathBuf,
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },

    /// Report privileges relevant to creating links
    Check,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCmd>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Reset configuration to defaults
    Reset,
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
}
