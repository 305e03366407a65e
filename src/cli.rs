use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// nutri_plan: resolve meal plans against a foods catalog and total their macros.
#[derive(Parser, Debug)]
#[command(name = "nutri_plan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the food catalog (JSON array, or CSV with a header row).
    #[arg(short, long, global = true, default_value = "foods.json")]
    pub catalog: PathBuf,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate per-meal and daily macros for a plan file.
    Aggregate {
        /// Plan payload JSON file.
        #[arg(short, long)]
        plan: PathBuf,

        /// Print the aggregate as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// List catalog foods.
    Foods {
        /// Only show foods whose id or name contains this text.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Build a storable plan document from a plan file.
    Build {
        /// Plan payload JSON file.
        #[arg(short, long)]
        plan: PathBuf,

        /// Id of the user creating the plan.
        #[arg(long)]
        author: String,

        /// Write the document here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Compose a plan interactively with a live macro preview.
    Compose {
        /// Save the composed plan payload to this file.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
