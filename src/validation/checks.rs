//! Validation checks over a costume document.
//!
//! Checks run on the wire form so every malformed entry is reported with
//! its table, column, and index instead of aborting at the first failure.

use crate::types::{Colour, CostumeDoc, CostumeKind, TableDoc};

use super::{Diagnostic, EntryRef, ValidationResult};

/// Validate a costume document.
///
/// Errors make the document unusable for a strict composite; warnings flag
/// entries that will behave surprisingly but still resolve.
pub fn validate_doc(doc: &CostumeDoc) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_table(&mut result, "paletteSwap", &doc.palette_swap);
    check_table(&mut result, "paletteSwapPA", &doc.palette_swap_pa);

    if result.error_count() == 0 {
        check_pa_transparency(&mut result, doc);
    }

    if doc.kind() == CostumeKind::Unnamed {
        result.push(
            Diagnostic::warning(
                "costume::validate::unnamed",
                "costume has no identifying metadata",
            )
            .with_help("Add an \"info\" key so the costume list can name it"),
        );
    }

    result
}

fn check_table(result: &mut ValidationResult, name: &str, table: &TableDoc) {
    if table.colors.len() != table.replacements.len() {
        result.push(
            Diagnostic::error(
                "costume::validate::table-length",
                format!(
                    "{}: colors has {} entries but replacements has {}",
                    name,
                    table.colors.len(),
                    table.replacements.len()
                ),
            )
            .with_help("The two lists are index-aligned and must be the same length"),
        );
    }

    for (column, tokens) in [("colors", &table.colors), ("replacements", &table.replacements)]
    {
        for (index, token) in tokens.iter().enumerate() {
            if Colour::from_hex(token).is_err() {
                result.push(
                    Diagnostic::error(
                        "costume::validate::bad-colour",
                        format!("invalid colour token {:?}", token),
                    )
                    .at(EntryRef::new(name, column, index))
                    .with_help("Use AARRGGBB, RRGGBB, or \"transparent\""),
                );
            }
        }
    }
}

/// Warn when the PA table would resurrect a colour the primary table erased.
fn check_pa_transparency(result: &mut ValidationResult, doc: &CostumeDoc) {
    let Ok(costume) = doc.resolve() else {
        return;
    };

    let mut normalized = costume.clone();
    if normalized.normalize_pa_transparency() == 0 {
        return;
    }

    for (index, (before, after)) in costume
        .palette_swap_pa
        .replacements
        .iter()
        .zip(&normalized.palette_swap_pa.replacements)
        .enumerate()
    {
        if before != after {
            result.push(
                Diagnostic::warning(
                    "costume::validate::pa-transparency",
                    format!(
                        "paletteSwapPA re-colours {}, which paletteSwap makes transparent",
                        costume.palette_swap_pa.colours[index]
                    ),
                )
                .at(EntryRef::new("paletteSwapPA", "replacements", index))
                .with_help("Run `costume export` to normalize, or set the replacement to \"transparent\""),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::TableDoc;

    use super::*;

    fn doc_with_swap(table: TableDoc) -> CostumeDoc {
        CostumeDoc {
            info: Some("test".to_string()),
            palette_swap: table,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_doc_is_ok() {
        let doc = doc_with_swap(TableDoc {
            colors: vec!["0xFFFF0000".to_string(), "transparent".to_string()],
            replacements: vec!["0xFF00FF00".to_string(), "transparent".to_string()],
        });
        assert!(validate_doc(&doc).is_ok());
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let doc = doc_with_swap(TableDoc {
            colors: vec!["0xFFFF0000".to_string()],
            replacements: vec![],
        });
        let result = validate_doc(&doc);
        assert!(result.has_errors());
        assert!(result
            .iter()
            .any(|d| d.code == "costume::validate::table-length"));
    }

    #[test]
    fn test_bad_colour_reports_entry() {
        let doc = doc_with_swap(TableDoc {
            colors: vec!["0xFF000000".to_string(), "nope".to_string()],
            replacements: vec!["transparent".to_string(), "transparent".to_string()],
        });
        let result = validate_doc(&doc);

        let bad: Vec<_> = result
            .iter()
            .filter(|d| d.code == "costume::validate::bad-colour")
            .collect();
        assert_eq!(bad.len(), 1);
        let entry = bad[0].entry.as_ref().unwrap();
        assert_eq!(entry.to_string(), "paletteSwap.colors[1]");
    }

    #[test]
    fn test_every_bad_entry_is_reported() {
        let doc = doc_with_swap(TableDoc {
            colors: vec!["x".to_string(), "y".to_string()],
            replacements: vec!["z".to_string(), "transparent".to_string()],
        });
        let result = validate_doc(&doc);
        assert_eq!(result.error_count(), 3);
    }

    #[test]
    fn test_pa_transparency_warning() {
        let doc = CostumeDoc {
            info: Some("test".to_string()),
            palette_swap: TableDoc {
                colors: vec!["0xFFFF0000".to_string()],
                replacements: vec!["transparent".to_string()],
            },
            palette_swap_pa: TableDoc {
                colors: vec!["0xFFFF0000".to_string()],
                replacements: vec!["0xFF0000FF".to_string()],
            },
            ..Default::default()
        };
        let result = validate_doc(&doc);

        assert!(!result.has_errors());
        let warning = result
            .iter()
            .find(|d| d.code == "costume::validate::pa-transparency")
            .unwrap();
        assert_eq!(
            warning.entry.as_ref().unwrap().to_string(),
            "paletteSwapPA.replacements[0]"
        );
    }

    #[test]
    fn test_unnamed_costume_warns() {
        let doc = CostumeDoc::default();
        let result = validate_doc(&doc);
        assert!(!result.has_errors());
        assert!(result.iter().any(|d| d.code == "costume::validate::unnamed"));
    }
}
