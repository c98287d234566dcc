use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use reindex_core::{OverwriteMode, PageDirection};

#[derive(Debug, Parser)]
#[command(author, version, about = "Start, watch and abort search index rebuilds", long_about = None)]
pub struct Cli {
    /// RON config file (defaults to ./reindex.ron)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Controller base URL, overrides the config file
    #[arg(long, global = true)]
    pub url: Option<String>,
    /// Poll interval in seconds, overrides the config file
    #[arg(long, global = true)]
    pub interval: Option<u64>,
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the current rebuild status
    Status {
        /// Keep refreshing until the rebuild is over
        #[arg(long)]
        watch: bool,
    },
    /// Start rebuilding the index
    Start {
        /// Number of parallel workers
        #[arg(short, long, allow_hyphen_values = true)]
        workers: String,
        /// Rebuild a single job only
        #[arg(long)]
        job: Option<String>,
        /// What to do with builds that are already indexed
        #[arg(long, value_enum)]
        overwrite: Option<OverwriteArg>,
        /// Keep refreshing until the rebuild is over
        #[arg(long)]
        watch: bool,
    },
    /// Abort the running rebuild
    Abort,
    /// Forget progress and history of the last rebuild
    Clean,
    /// Page through search results
    Results {
        #[arg(value_enum)]
        direction: DirectionArg,
    },
    /// Write a config file with default values
    InitConfig {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    pub fn watch(&self) -> bool {
        match self {
            Commands::Status { watch } | Commands::Start { watch, .. } => *watch,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OverwriteArg {
    Overwrite,
    Skip,
}

impl From<OverwriteArg> for OverwriteMode {
    fn from(arg: OverwriteArg) -> Self {
        match arg {
            OverwriteArg::Overwrite => OverwriteMode::Overwrite,
            OverwriteArg::Skip => OverwriteMode::Skip,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Prev,
    Next,
}

impl From<DirectionArg> for PageDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Prev => PageDirection::Prev,
            DirectionArg::Next => PageDirection::Next,
        }
    }
}
