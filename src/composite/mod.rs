//! Two-stage sheet recoloring.
//!
//! The primary table runs first; the overlay ("PA") table then runs over the
//! primary's *output*, so an overlay entry can recolor pixels the primary
//! stage already changed. Lookup is exact first, then a tolerant scan in
//! table order, with a per-table memo so the linear fallback runs once per
//! distinct colour rather than once per pixel.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::types::{Colour, MappingTable, PixelBuffer};

/// Options for a composite run.
#[derive(Debug, Clone, Default)]
pub struct CompositeOptions {
    /// Maximum per-channel difference for the fallback match. Zero disables
    /// the fallback entirely.
    pub tolerance: u8,

    /// Partition rows across worker threads. Output is identical to the
    /// sequential path; no pixel depends on any other pixel.
    pub parallel: bool,
}

impl CompositeOptions {
    pub fn with_tolerance(tolerance: u8) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}

/// Resolved lookup structure for one mapping table.
///
/// Self-mappings are elided: they are no-ops exactly and would only shadow
/// later tolerant matches. Duplicate colours keep their first position in
/// the scan order but the last replacement wins, matching plain
/// insert-overwrite map construction.
struct TableLookup {
    exact: HashMap<Colour, Colour>,
    order: Vec<Colour>,
    tolerance: u8,
}

impl TableLookup {
    fn new(table: &MappingTable, tolerance: u8) -> Self {
        let mut exact = HashMap::new();
        let mut order = Vec::new();
        for (colour, replacement) in table.pairs() {
            if colour == replacement {
                continue;
            }
            if exact.insert(colour, replacement).is_none() {
                order.push(colour);
            }
        }
        Self {
            exact,
            order,
            tolerance,
        }
    }

    fn resolve(&self, colour: Colour, memo: &mut HashMap<Colour, Colour>) -> Colour {
        if let Some(&hit) = memo.get(&colour) {
            return hit;
        }
        let resolved = match self.exact.get(&colour) {
            Some(&replacement) => replacement,
            None if self.tolerance > 0 => self
                .order
                .iter()
                .find(|&&original| colour.is_close(original, self.tolerance))
                .map(|original| self.exact[original])
                .unwrap_or(colour),
            None => colour,
        };
        memo.insert(colour, resolved);
        resolved
    }
}

/// Recolor a sheet through both tables.
///
/// Takes the buffer by value: passing ownership is the caller's opt-in to
/// in-place mutation, so a reference sheet that must survive should be
/// cloned at the call site. Unmapped colours pass through unchanged; an
/// empty table is an identity stage.
pub fn composite(
    mut sheet: PixelBuffer,
    primary: &MappingTable,
    overlay: &MappingTable,
    opts: &CompositeOptions,
) -> PixelBuffer {
    let primary = TableLookup::new(primary, opts.tolerance);
    let overlay = TableLookup::new(overlay, opts.tolerance);

    let recolor_row = |row: &mut [Colour],
                       memo_primary: &mut HashMap<Colour, Colour>,
                       memo_overlay: &mut HashMap<Colour, Colour>| {
        for pixel in row {
            let staged = primary.resolve(*pixel, memo_primary);
            *pixel = overlay.resolve(staged, memo_overlay);
        }
    };

    let width = sheet.width().max(1);
    if opts.parallel {
        sheet
            .pixels_mut()
            .par_chunks_mut(width)
            .for_each_init(
                || (HashMap::new(), HashMap::new()),
                |(memo_primary, memo_overlay), row| {
                    recolor_row(row, memo_primary, memo_overlay)
                },
            );
    } else {
        let mut memo_primary = HashMap::new();
        let mut memo_overlay = HashMap::new();
        for row in sheet.pixels_mut().chunks_mut(width) {
            recolor_row(row, &mut memo_primary, &mut memo_overlay);
        }
    }

    sheet
}
