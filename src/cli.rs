use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordtrie")]
#[command(about = "wordtrie - Prefix-tree autocomplete driven by line commands on stdin")]
#[command(version)]
pub struct Cli {
    /// Path to one or more config files (merged in order).
    #[arg(long, action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    /// CSV file of word,score rows to load before reading commands.
    #[arg(long)]
    pub load: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },
}
