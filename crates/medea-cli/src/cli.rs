use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "medea", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile raw input tables into model sets and parameters
    Compile {
        /// Scenario configuration file (YAML or JSON)
        #[arg(long)]
        config: PathBuf,
        /// Output directory (defaults to <root_dir>/data/processed)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Worker threads for per-zone stages ("auto" = all cores)
        #[arg(long, default_value = "auto")]
        threads: String,
    },
    /// Print the number of model hours in a calendar year
    Hours {
        year: i32,
    },
}
