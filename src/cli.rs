//! Command-line interface implementation for kiln.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for kiln.
#[derive(Parser, Debug)]
#[command(author, version, about = "kiln: render templates into target files", long_about = None)]
pub struct Args {
    /// Components to run. Defaults to the `parts` option of the `kiln` component
    #[arg(value_name = "PART")]
    pub parts: Vec<String>,

    /// Project file. Defaults to kiln.yaml, kiln.yml or kiln.json in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run as an update of a previous install.
    /// Targets are rendered again and overwritten either way.
    #[arg(short, long)]
    pub update: bool,
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
