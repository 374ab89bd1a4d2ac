//! Seed command implementation.
//!
//! Scans a sheet and writes a costume document whose tables are identity
//! mappings over the extracted strips, the starting point for editing.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{CostumeError, Result};
use crate::manifest::Manifest;
use crate::output::{count, display_path, Printer};
use crate::render::read_png;
use crate::scan::scan_strips;
use crate::types::Costume;

/// Create a costume document seeded from a sheet's palette strips
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Sheet image to scan
    #[arg(required = true)]
    pub sheet: PathBuf,

    /// Costume name stored in the document's "info" field
    #[arg(long)]
    pub info: String,

    /// Output file (default: <output dir>/<info>.json)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: SeedArgs, printer: &Printer) -> Result<()> {
    let manifest = Manifest::load_or_default(Path::new("."))?;

    printer.status("Scanning", &display_path(&args.sheet));
    let sheet = read_png(&args.sheet)?;
    let strips = scan_strips(&sheet, &manifest.scan);

    if strips.is_empty() {
        return Err(CostumeError::Validation {
            message: format!("no palette strips found in {}", display_path(&args.sheet)),
            help: Some(
                "A strip needs at least 5 distinct colours on a row of its own".to_string(),
            ),
        });
    }

    let primary = &strips[0].colours;
    let secondary = strips.get(1).map(|s| s.colours.as_slice()).unwrap_or(&[]);
    let costume = Costume::seeded(&args.info, primary, secondary);

    let path = match args.output {
        Some(path) => path,
        None => manifest
            .output
            .join(format!("{}.json", args.info.replace(' ', "_"))),
    };

    if path.exists() && !args.force {
        return Err(CostumeError::Validation {
            message: format!("{} already exists", display_path(&path)),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| CostumeError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }

    let json = costume.to_doc().to_json()?;
    fs::write(&path, json).map_err(|e| CostumeError::Io {
        path: path.clone(),
        message: format!("Failed to write costume: {}", e),
    })?;

    printer.status(
        "Seeded",
        &format!(
            "{} ({} from {})",
            display_path(&path),
            count(strips.len(), "strip"),
            display_path(&args.sheet)
        ),
    );

    Ok(())
}
