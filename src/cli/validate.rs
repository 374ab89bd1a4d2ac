//! Validate command implementation.
//!
//! Checks costume documents and reports every problem with its table,
//! column, and index. Directories are walked for .json files.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use walkdir::WalkDir;

use crate::error::{CostumeError, Result};
use crate::output::{count, display_path, Printer};
use crate::types::CostumeDoc;
use crate::validation::{validate_doc, Severity, ValidationResult};

/// Validate costume documents
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Costume files or directories to validate
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let files = collect_files(&args.paths)?;
    if files.is_empty() {
        printer.info("Found", "no costume files");
        return Ok(());
    }

    let mut errors = 0;
    let mut warnings = 0;

    for file in &files {
        let label = display_path(file);
        let content = fs::read_to_string(file).map_err(|e| CostumeError::Io {
            path: file.clone(),
            message: e.to_string(),
        })?;

        let result = match CostumeDoc::from_json(&content) {
            Ok(doc) => validate_doc(&doc),
            Err(e) => {
                errors += 1;
                eprintln!("{}: {}: {}", printer.severity("error", true), label, e);
                continue;
            }
        };

        errors += result.error_count();
        warnings += result.warning_count();
        print_diagnostics(printer, &label, &result);
    }

    let summary = format!(
        "{} checked, {}, {}",
        count(files.len(), "costume"),
        count(errors, "error"),
        count(warnings, "warning")
    );
    if errors > 0 {
        return Err(CostumeError::Validation {
            message: summary,
            help: None,
        });
    }

    printer.status("Validated", &summary);
    Ok(())
}

/// Print each diagnostic as "severity: file: message (entry)" plus a help
/// line when one is attached.
pub(crate) fn print_diagnostics(printer: &Printer, label: &str, result: &ValidationResult) {
    for diagnostic in result.iter() {
        let is_error = diagnostic.severity == Severity::Error;
        let severity = printer.severity(
            if is_error { "error" } else { "warning" },
            is_error,
        );

        let location = diagnostic
            .entry
            .as_ref()
            .map(|e| format!(" at {}", e))
            .unwrap_or_default();
        eprintln!(
            "{}: {}: {}{}",
            severity,
            label,
            diagnostic.message,
            printer.dim(&location)
        );

        if let Some(help) = &diagnostic.help {
            eprintln!("  {}", printer.dim(&format!("= help: {}", help)));
        }
    }
}

fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.map_err(|e| CostumeError::Io {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                if entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "json")
                {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_collect_files_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.json"), "{}").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json", "c.json"]);
    }

    #[test]
    fn test_collect_files_keeps_explicit_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("costume.txt");
        fs::write(&file, "{}").unwrap();

        let files = collect_files(&[file.clone()]).unwrap();
        assert_eq!(files, vec![file]);
    }
}
