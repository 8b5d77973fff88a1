use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::outfit::{Event, Weather};

#[derive(Parser)]
#[command(name = "closet")]
#[command(author = "Closet Team")]
#[command(version)]
#[command(about = "Virtual closet - photograph it, shelve it, wear it.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Closet database file (overrides the configured path)
    #[arg(long, global = true)]
    pub closet: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a clothing photo to the closet
    Add {
        /// Path to the image file
        #[arg(required = true)]
        image: PathBuf,
    },

    /// Suggest an outfit for a weather and event combination
    Suggest {
        /// Weather context
        #[arg(short, long, value_enum)]
        weather: Weather,

        /// Event context
        #[arg(short, long, value_enum)]
        event: Event,
    },

    /// Find the closet items most similar to a photo
    Similar {
        /// Path to the query image
        #[arg(required = true)]
        image: PathBuf,

        /// Number of results to return
        #[arg(short = 'n', long, default_value = "3")]
        top_k: usize,
    },

    /// List everything in the closet
    Items,

    /// Show current configuration
    Config,

    /// Check token, config, and closet file health
    Doctor,
}
