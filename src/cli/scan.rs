//! Scan command implementation.
//!
//! Extracts palette strips from a sheet and prints them, one token per
//! pixel position, for inspection or piping into other tools.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{CostumeError, Result};
use crate::manifest::Manifest;
use crate::output::{count, display_path, Printer};
use crate::render::read_png;
use crate::scan::scan_strips;
use crate::types::Colour;

/// Scan a sprite sheet for palette strips
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Sheet image to scan
    #[arg(required = true)]
    pub sheet: PathBuf,

    /// Print strips as a JSON array of token arrays
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ScanArgs, printer: &Printer) -> Result<()> {
    let manifest = Manifest::load_or_default(Path::new("."))?;

    printer.status("Scanning", &display_path(&args.sheet));
    let sheet = read_png(&args.sheet)?;
    let strips = scan_strips(&sheet, &manifest.scan);

    if strips.is_empty() {
        printer.info("Found", "no palette strips");
        return Ok(());
    }

    printer.status(
        "Extracted",
        &format!(
            "{} from {}",
            count(strips.len(), "strip"),
            display_path(&args.sheet)
        ),
    );

    if args.json {
        let tokens: Vec<Vec<String>> = strips
            .iter()
            .map(|s| s.colours.iter().map(Colour::to_string).collect())
            .collect();
        let json = serde_json::to_string_pretty(&tokens).map_err(|e| CostumeError::Parse {
            message: format!("Failed to serialize strips: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        for strip in &strips {
            let tokens: Vec<String> = strip.colours.iter().map(Colour::to_string).collect();
            println!(
                "row {} [{}..{}]: {}",
                strip.row,
                strip.start_x,
                strip.end_x,
                tokens.join(" ")
            );
        }
    }

    Ok(())
}
