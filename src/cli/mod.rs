pub mod apply;
pub mod completions;
pub mod export;
pub mod scan;
pub mod seed;
pub mod validate;

use clap::{Parser, Subcommand};

/// costume - Palette strip extraction and sprite-sheet recoloring
#[derive(Parser, Debug)]
#[command(name = "costume")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a sprite sheet for palette strips
    Scan(scan::ScanArgs),

    /// Create a costume document seeded from a sheet's palette strips
    Seed(seed::SeedArgs),

    /// Recolor a sheet with a costume's mapping tables
    Apply(apply::ApplyArgs),

    /// Print a costume's tables as decimal literals for script injection
    Export(export::ExportArgs),

    /// Validate costume documents
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
