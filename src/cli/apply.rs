//! Apply command implementation.
//!
//! Recolors a reference sheet through a costume's two mapping tables and
//! writes the result as a PNG.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::composite::{composite, CompositeOptions};
use crate::error::{CostumeError, Result};
use crate::manifest::Manifest;
use crate::output::{display_path, Printer};
use crate::render::{read_png, write_png};
use crate::types::CostumeDoc;
use crate::validation::validate_doc;

use super::validate::print_diagnostics;

/// Recolor a sheet with a costume's mapping tables
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Costume document to apply
    #[arg(required = true)]
    pub costume: PathBuf,

    /// Sheet image to recolor (default: the manifest's sheet)
    pub sheet: Option<PathBuf>,

    /// Output file (default: <output dir>/<costume name>.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Per-channel tolerance for the fallback colour match
    #[arg(long)]
    pub tolerance: Option<u8>,

    /// Partition rows across worker threads
    #[arg(long)]
    pub parallel: bool,

    /// Integer scale factor for the output (nearest-neighbour)
    #[arg(long, default_value = "1")]
    pub scale: u32,

    /// Substitute opaque black for malformed colour tokens instead of
    /// failing
    #[arg(long)]
    pub lenient: bool,
}

pub fn run(args: ApplyArgs, printer: &Printer) -> Result<()> {
    let manifest = Manifest::load_or_default(Path::new("."))?;

    let sheet_path = args
        .sheet
        .or(manifest.sheet)
        .ok_or_else(|| CostumeError::Validation {
            message: "no sheet given and no manifest sheet configured".to_string(),
            help: Some("Pass a sheet path or set `sheet:` in costume.yaml".to_string()),
        })?;

    let content = fs::read_to_string(&args.costume).map_err(|e| CostumeError::Io {
        path: args.costume.clone(),
        message: e.to_string(),
    })?;
    let doc = CostumeDoc::from_json(&content)?;

    let result = validate_doc(&doc);
    let costume = if args.lenient {
        if result.has_errors() {
            printer.warning(
                "Substituting",
                &format!(
                    "opaque black for {} invalid entries",
                    result.error_count()
                ),
            );
        }
        doc.resolve_lossy()
    } else {
        if result.has_errors() {
            print_diagnostics(printer, &display_path(&args.costume), &result);
            return Err(CostumeError::Validation {
                message: format!(
                    "costume has {} invalid entries",
                    result.error_count()
                ),
                help: Some("Fix the entries above or re-run with --lenient".to_string()),
            });
        }
        doc.resolve()?
    };

    printer.status("Recoloring", &display_path(&sheet_path));
    let sheet = read_png(&sheet_path)?;

    let opts = CompositeOptions {
        tolerance: args.tolerance.unwrap_or(manifest.tolerance),
        parallel: args.parallel,
    };
    let recolored = composite(sheet, &costume.palette_swap, &costume.palette_swap_pa, &opts);

    let name = costume
        .display_name()
        .unwrap_or_else(|| "costume".to_string());
    let path = match args.output {
        Some(path) => path,
        None => manifest
            .output
            .join(format!("{}.png", name.replace(' ', "_"))),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| CostumeError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }

    write_png(&recolored, &path, args.scale)?;
    printer.status("Recolored", &format!("{} ({})", display_path(&path), name));

    Ok(())
}
