//! Palette strip extraction.
//!
//! A palette strip is a row of pixels in a reference sheet that enumerates
//! the editable colours. Strips are found by elimination: colours present in
//! every row of the image are structural background, colours filling most of
//! a row are fill, and a candidate run whose colours bleed into the row
//! above or below is decoration rather than a strip.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::{Colour, PixelBuffer};

/// Tuning for strip detection.
///
/// The thresholds were tuned against real reference sheets; they are
/// configurable rather than derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Minimum number of distinct opaque colours a run must contain to
    /// qualify as a strip.
    pub min_distinct: usize,

    /// Maximum number of strips extracted per sheet. The first is the
    /// primary palette, the second the PA overlay.
    pub max_strips: usize,

    /// A colour filling more than `width / majority_divisor` pixels of a row
    /// is treated as fill and ignored.
    pub majority_divisor: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_distinct: 5,
            max_strips: 2,
            majority_divisor: 2,
        }
    }
}

/// An extracted palette strip: one colour per pixel position across the
/// full `[start_x, end_x]` span of its originating row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteStrip {
    /// Row index the strip was found on.
    pub row: usize,
    /// Inclusive horizontal span.
    pub start_x: usize,
    pub end_x: usize,
    /// Per-pixel colours; positions holding background or transparent
    /// pixels carry the transparent sentinel.
    pub colours: Vec<Colour>,
}

impl PaletteStrip {
    /// Number of pixel positions spanned.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

/// Scan a sheet for palette strips, top to bottom.
///
/// Returns up to `config.max_strips` strips; a sheet with none is an empty
/// result, not an error. At most one strip is extracted per row (the first
/// qualifying run, scanning left to right).
pub fn scan_strips(sheet: &PixelBuffer, config: &ScanConfig) -> Vec<PaletteStrip> {
    let (width, height) = (sheet.width(), sheet.height());
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let row_sets: Vec<HashSet<Colour>> = sheet
        .rows()
        .map(|row| row.iter().copied().collect())
        .collect();

    // Colours present in every single row are structural background.
    let mut common = row_sets[0].clone();
    for set in &row_sets[1..] {
        common.retain(|c| set.contains(c));
    }

    let majority = width / config.majority_divisor.max(1);
    let mut strips = Vec::new();

    for y in 0..height {
        if strips.len() >= config.max_strips {
            break;
        }

        let row = sheet.row(y);
        let mut counts: HashMap<Colour, usize> = HashMap::new();
        for &c in row {
            *counts.entry(c).or_insert(0) += 1;
        }
        let ignored: HashSet<Colour> = counts
            .iter()
            .filter(|&(c, &n)| n > majority || common.contains(c))
            .map(|(&c, _)| c)
            .collect();

        // Maximal runs of non-ignored pixels; the first qualifying run is
        // the row's strip.
        let mut x = 0;
        while x < width {
            if ignored.contains(&row[x]) {
                x += 1;
                continue;
            }
            let start_x = x;
            while x < width && !ignored.contains(&row[x]) {
                x += 1;
            }
            if let Some(strip) = qualify_run(sheet, y, start_x, x - 1, &ignored, config) {
                strips.push(strip);
                break;
            }
        }
    }

    strips
}

/// Promote a candidate run to a strip, or reject it.
fn qualify_run(
    sheet: &PixelBuffer,
    y: usize,
    start_x: usize,
    end_x: usize,
    ignored: &HashSet<Colour>,
    config: &ScanConfig,
) -> Option<PaletteStrip> {
    let run = &sheet.row(y)[start_x..=end_x];
    if distinct_opaque(run.iter().copied()) < config.min_distinct {
        return None;
    }

    // A genuine strip is visually distinct from its neighbours: if any
    // adjacent-row pixel over the span shows one of the run's colours, the
    // run bleeds and is not a strip.
    let run_colours: HashSet<Colour> = run.iter().copied().collect();
    for pos in start_x..=end_x {
        if y > 0 && run_colours.contains(&sheet.get(pos, y - 1)) {
            return None;
        }
        if y + 1 < sheet.height() && run_colours.contains(&sheet.get(pos, y + 1)) {
            return None;
        }
    }

    // Emit the full span. Transparent sources, pixels shared with the row
    // above/below, and ignored colours all degrade to the sentinel so only
    // row-unique colours are treated as substitutable.
    let colours: Vec<Colour> = (start_x..=end_x)
        .map(|pos| {
            let c = sheet.get(pos, y);
            if c.is_transparent()
                || (y > 0 && sheet.get(pos, y - 1) == c)
                || (y + 1 < sheet.height() && sheet.get(pos, y + 1) == c)
                || ignored.contains(&c)
            {
                Colour::Transparent
            } else {
                c
            }
        })
        .collect();

    if distinct_opaque(colours.iter().copied()) < config.min_distinct {
        return None;
    }

    Some(PaletteStrip {
        row: y,
        start_x,
        end_x,
        colours,
    })
}

fn distinct_opaque(colours: impl Iterator<Item = Colour>) -> usize {
    colours
        .filter(|c| !c.is_transparent())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BG: Colour = Colour::rgb(40, 40, 40);

    fn shade(i: u8) -> Colour {
        Colour::rgb(i, 0, 0)
    }

    /// A sheet whose middle row holds the given colours padded with
    /// background, between two all-background rows.
    fn sheet_with_candidate(candidate: &[Colour]) -> PixelBuffer {
        let width = candidate.len() + 2;
        let mut middle = vec![BG];
        middle.extend_from_slice(candidate);
        middle.push(BG);
        PixelBuffer::from_rows(vec![vec![BG; width], middle, vec![BG; width]])
    }

    #[test]
    fn test_four_distinct_colours_is_not_a_strip() {
        let sheet = sheet_with_candidate(&[shade(1), shade(2), shade(3), shade(4)]);
        assert!(scan_strips(&sheet, &ScanConfig::default()).is_empty());
    }

    #[test]
    fn test_five_distinct_colours_is_a_strip() {
        let sheet =
            sheet_with_candidate(&[shade(1), shade(2), shade(3), shade(4), shade(5)]);
        let strips = scan_strips(&sheet, &ScanConfig::default());

        assert_eq!(strips.len(), 1);
        let strip = &strips[0];
        assert_eq!(strip.row, 1);
        assert_eq!((strip.start_x, strip.end_x), (1, 5));
        assert_eq!(
            strip.colours,
            vec![shade(1), shade(2), shade(3), shade(4), shade(5)]
        );
    }

    #[test]
    fn test_run_identical_to_row_above_is_rejected() {
        let ramp = [shade(1), shade(2), shade(3), shade(4), shade(5)];
        let mut row = vec![BG];
        row.extend_from_slice(&ramp);
        row.push(BG);

        // The ramp appears on two adjacent rows, so neither qualifies even
        // though both meet the distinct-colour threshold.
        let sheet = PixelBuffer::from_rows(vec![
            vec![BG; 7],
            row.clone(),
            row,
            vec![BG; 7],
        ]);
        assert!(scan_strips(&sheet, &ScanConfig::default()).is_empty());
    }

    #[test]
    fn test_common_colour_splits_the_run() {
        // shade(3) appears in every row, so it is background and splits the
        // candidate into two sub-threshold runs.
        let width = 9;
        let mut top = vec![BG; width];
        top[0] = shade(3);
        let mut bottom = vec![BG; width];
        bottom[0] = shade(3);
        let middle = vec![
            BG,
            shade(1),
            shade(2),
            shade(3),
            shade(4),
            shade(5),
            shade(6),
            BG,
            BG,
        ];
        let sheet = PixelBuffer::from_rows(vec![top, middle, bottom]);
        assert!(scan_strips(&sheet, &ScanConfig::default()).is_empty());
    }

    #[test]
    fn test_majority_colour_splits_the_run() {
        // The fill colour covers more than half the candidate row, so the
        // remaining shades form two separate runs of 2 and 3.
        let fill = Colour::rgb(7, 7, 7);
        let middle = vec![
            shade(1),
            shade(2),
            fill,
            fill,
            fill,
            fill,
            fill,
            fill,
            shade(3),
            shade(4),
            shade(5),
        ];
        let width = middle.len();
        let sheet =
            PixelBuffer::from_rows(vec![vec![BG; width], middle, vec![BG; width]]);
        assert!(scan_strips(&sheet, &ScanConfig::default()).is_empty());
    }

    #[test]
    fn test_transparent_gap_is_emitted_as_sentinel() {
        let sheet = sheet_with_candidate(&[
            shade(1),
            Colour::Transparent,
            shade(2),
            shade(3),
            shade(4),
            shade(5),
        ]);
        let strips = scan_strips(&sheet, &ScanConfig::default());

        assert_eq!(strips.len(), 1);
        assert_eq!(
            strips[0].colours,
            vec![
                shade(1),
                Colour::Transparent,
                shade(2),
                shade(3),
                shade(4),
                shade(5)
            ]
        );
    }

    #[test]
    fn test_at_most_two_strips() {
        let ramp_a: Vec<Colour> = (1..=5).map(shade).collect();
        let ramp_b: Vec<Colour> = (10..=14).map(shade).collect();
        let ramp_c: Vec<Colour> = (20..=24).map(shade).collect();

        let width = 7;
        let pad = |ramp: &[Colour]| {
            let mut row = vec![BG];
            row.extend_from_slice(ramp);
            row.push(BG);
            row
        };
        let sheet = PixelBuffer::from_rows(vec![
            vec![BG; width],
            pad(&ramp_a),
            vec![BG; width],
            pad(&ramp_b),
            vec![BG; width],
            pad(&ramp_c),
            vec![BG; width],
        ]);

        let strips = scan_strips(&sheet, &ScanConfig::default());
        assert_eq!(strips.len(), 2);
        assert_eq!(strips[0].row, 1);
        assert_eq!(strips[0].colours, ramp_a);
        assert_eq!(strips[1].row, 3);
        assert_eq!(strips[1].colours, ramp_b);
    }

    #[test]
    fn test_first_qualifying_run_wins() {
        // Two qualifying runs in one row, separated by background; only the
        // left one is extracted.
        let left: Vec<Colour> = (1..=5).map(shade).collect();
        let right: Vec<Colour> = (10..=14).map(shade).collect();
        let mut middle = vec![BG];
        middle.extend_from_slice(&left);
        middle.extend(vec![BG; 3]);
        middle.extend_from_slice(&right);
        middle.push(BG);
        let width = middle.len();
        let sheet =
            PixelBuffer::from_rows(vec![vec![BG; width], middle, vec![BG; width]]);

        let strips = scan_strips(&sheet, &ScanConfig::default());
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].colours, left);
        assert_eq!((strips[0].start_x, strips[0].end_x), (1, 5));
    }

    #[test]
    fn test_single_row_image_has_no_strips() {
        // With one row, every colour is present in every row, so everything
        // is structural background by definition.
        let row: Vec<Colour> = (1..=8).map(shade).collect();
        let sheet = PixelBuffer::from_rows(vec![row]);
        assert!(scan_strips(&sheet, &ScanConfig::default()).is_empty());
    }

    #[test]
    fn test_empty_image() {
        let sheet = PixelBuffer::new(0, 0);
        assert!(scan_strips(&sheet, &ScanConfig::default()).is_empty());
    }

    #[test]
    fn test_strip_at_row_edge_without_neighbour_above() {
        // A strip on row 0 only has a row below to collide with.
        let ramp: Vec<Colour> = (1..=5).map(shade).collect();
        let mut top = vec![BG];
        top.extend_from_slice(&ramp);
        top.push(BG);
        let sheet = PixelBuffer::from_rows(vec![top, vec![BG; 7], vec![BG; 7]]);

        let strips = scan_strips(&sheet, &ScanConfig::default());
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].row, 0);
    }
}
