use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{KindSelection, SourceSelection};

/// Turn a video script into stock media search results
#[derive(Parser)]
#[command(name = "clipscout")]
#[command(about = "Stock media search for short-form video scripts", long_about = None)]
pub struct Cli {
    /// Override the database URL used for credential storage
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Settings file (TOML); missing files fall back to defaults
    #[arg(long, global = true, default_value = "clipscout.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract keywords from a script
    Keywords {
        /// Script file to read; stdin when omitted
        script: Option<PathBuf>,
        /// Refine the extracted keywords through the language model
        #[arg(short, long)]
        refine: bool,
    },
    /// Search stock media providers for a script's keywords
    Search {
        /// Script file to read; stdin when omitted
        script: Option<PathBuf>,
        /// Media source (pixabay, pexels, both)
        #[arg(short, long)]
        source: Option<SourceSelection>,
        /// Media type (images, videos, both)
        #[arg(short, long)]
        media: Option<KindSelection>,
        /// Refine keywords through the language model before searching
        #[arg(long)]
        refine: bool,
        /// Discard the whole batch when any sub-request fails
        #[arg(long)]
        atomic: bool,
    },
    /// Manage stored API keys
    Keys {
        #[command(subcommand)]
        command: KeysCommand,
    },
    /// Show the generation pipeline stages
    Stages,
}

#[derive(Subcommand)]
pub enum KeysCommand {
    /// Store one credential and persist the full mapping
    Set {
        /// Provider name (google, pixabay, pexels)
        provider: String,
        secret: String,
    },
    /// Show which providers have a stored credential
    Show,
}
