//! Index-aligned colour mapping tables.

use super::Colour;

/// A pair of equal-length, index-aligned colour sequences: `colours[i]` is
/// replaced by `replacements[i]`.
///
/// Self-mappings are permitted; the compositor elides them when it builds
/// its lookup structures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    pub colours: Vec<Colour>,
    pub replacements: Vec<Colour>,
}

impl MappingTable {
    /// Create an empty table (an identity stage for the compositor).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an identity table over the given colours, the seed for a
    /// freshly extracted palette strip.
    pub fn identity(colours: &[Colour]) -> Self {
        Self {
            colours: colours.to_vec(),
            replacements: colours.to_vec(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Iterate over (colour, replacement) pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Colour, Colour)> + '_ {
        self.colours
            .iter()
            .copied()
            .zip(self.replacements.iter().copied())
    }

    /// Decimal literals for both columns, in table order, for handoff to the
    /// script injection pipeline. The transparent sentinel serializes as `0`.
    pub fn decimal_columns(&self) -> (Vec<String>, Vec<String>) {
        let decimals = |cs: &[Colour]| cs.iter().map(|c| c.packed().to_string()).collect();
        (decimals(&self.colours), decimals(&self.replacements))
    }
}
