//! Export command implementation.
//!
//! Prints a costume's tables as ordered decimal literal sequences, the form
//! the downstream script injection pipeline embeds into game script source.
//! Transparency decisions made by the primary table are normalized into the
//! PA table first unless suppressed.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{CostumeError, Result};
use crate::output::{count, display_path, Printer};
use crate::types::CostumeDoc;

/// Print a costume's tables as decimal literals for script injection
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Costume document to export
    #[arg(required = true)]
    pub costume: PathBuf,

    /// Skip PA transparency normalization
    #[arg(long)]
    pub no_normalize: bool,
}

pub fn run(args: ExportArgs, printer: &Printer) -> Result<()> {
    let content = fs::read_to_string(&args.costume).map_err(|e| CostumeError::Io {
        path: args.costume.clone(),
        message: e.to_string(),
    })?;
    let mut costume = CostumeDoc::from_json(&content)?.resolve()?;

    if !args.no_normalize {
        let changed = costume.normalize_pa_transparency();
        if changed > 0 {
            printer.info(
                "Normalized",
                &format!(
                    "{} in paletteSwapPA kept transparent",
                    count(changed, "replacement")
                ),
            );
        }
    }

    let (colors, replacements) = costume.palette_swap.decimal_columns();
    println!("paletteSwap.colors:[{}]", colors.join(","));
    println!("paletteSwap.replacements:[{}]", replacements.join(","));

    let (colors, replacements) = costume.palette_swap_pa.decimal_columns();
    println!("paletteSwapPA.colors:[{}]", colors.join(","));
    println!("paletteSwapPA.replacements:[{}]", replacements.join(","));

    printer.status("Exported", &display_path(&args.costume));
    Ok(())
}
