use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "neodata_prep")]
#[command(about = "Prepare neonatal video recordings for dataset use", long_about = None)]
pub struct Cli {
    /// Run one stage headless. Without a subcommand the interactive menu
    /// opens instead.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize every file and directory name under the directory
    Normalize {
        #[arg(default_value = ".")]
        directory: PathBuf,
    },
    /// Convert unconverted videos to low resolution, replacing originals
    Convert {
        #[arg(default_value = ".")]
        directory: PathBuf,
    },
    /// Build the CSV catalogue of converted videos
    Catalogue {
        #[arg(default_value = ".")]
        directory: PathBuf,
    },
    /// Run normalize, convert and catalogue in one go
    Pipeline {
        #[arg(default_value = ".")]
        directory: PathBuf,
    },
}
