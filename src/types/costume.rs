//! Costume records and their persisted JSON form.
//!
//! A costume is two index-aligned mapping tables (`paletteSwap` applied
//! first, `paletteSwapPA` composed on top of its output) plus identifying
//! metadata. The wire form keeps colours as text tokens so that validation
//! can point at the exact table, column, and index of a bad entry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CostumeError, Result};

use super::{Colour, MappingTable};

/// How a costume identifies itself in the costume list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostumeKind {
    /// A team recolor, e.g. `team: "red"`.
    Team(String),
    /// The character's unmodified base costume.
    Base,
    /// A named costume with an `info` string.
    Named(String),
    /// No identifying metadata at all.
    Unnamed,
}

impl CostumeKind {
    /// Derive the display name, or `None` for unnamed costumes (callers
    /// number those themselves).
    pub fn display_name(&self) -> Option<String> {
        match self {
            Self::Team(colour) => {
                let mut chars = colour.chars();
                let capitalized = match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                };
                Some(format!("Team {}", capitalized))
            }
            Self::Base => Some("Base".to_string()),
            Self::Named(info) => Some(info.clone()),
            Self::Unnamed => None,
        }
    }
}

/// An in-memory costume: identifying metadata plus the two mapping tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Costume {
    pub kind: CostumeKind,
    pub palette_swap: MappingTable,
    pub palette_swap_pa: MappingTable,
}

impl Costume {
    /// Create a costume whose tables are identity mappings over freshly
    /// extracted palette strips. An empty slice yields an empty table.
    pub fn seeded(info: impl Into<String>, primary: &[Colour], secondary: &[Colour]) -> Self {
        Self {
            kind: CostumeKind::Named(info.into()),
            palette_swap: MappingTable::identity(primary),
            palette_swap_pa: MappingTable::identity(secondary),
        }
    }

    /// Display name for lists and filenames; `None` for unnamed costumes.
    pub fn display_name(&self) -> Option<String> {
        self.kind.display_name()
    }

    /// Force `paletteSwapPA` to preserve transparency decisions made by
    /// `paletteSwap`: any colour the primary table erases must not be
    /// resurrected by the secondary one. Returns how many PA replacements
    /// were rewritten.
    pub fn normalize_pa_transparency(&mut self) -> usize {
        let erased: HashMap<Colour, Colour> = self.palette_swap.pairs().collect();
        let mut changed = 0;
        for (i, colour) in self.palette_swap_pa.colours.iter().enumerate() {
            if erased.get(colour) == Some(&Colour::Transparent)
                && self.palette_swap_pa.replacements[i] != Colour::Transparent
            {
                self.palette_swap_pa.replacements[i] = Colour::Transparent;
                changed += 1;
            }
        }
        changed
    }

    /// Convert to the persisted document form.
    pub fn to_doc(&self) -> CostumeDoc {
        let (info, team, base) = match &self.kind {
            CostumeKind::Team(colour) => (None, Some(colour.clone()), None),
            CostumeKind::Base => (None, None, Some(true)),
            CostumeKind::Named(info) => (Some(info.clone()), None, None),
            CostumeKind::Unnamed => (None, None, None),
        };
        CostumeDoc {
            info,
            team,
            base,
            palette_swap: TableDoc::from_table(&self.palette_swap),
            palette_swap_pa: TableDoc::from_table(&self.palette_swap_pa),
        }
    }
}

/// One mapping table in wire form: colour tokens, not decoded colours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDoc {
    pub colors: Vec<String>,
    pub replacements: Vec<String>,
}

impl TableDoc {
    fn from_table(table: &MappingTable) -> Self {
        Self {
            colors: table.colours.iter().map(Colour::to_string).collect(),
            replacements: table.replacements.iter().map(Colour::to_string).collect(),
        }
    }

    fn resolve(&self, table_name: &str) -> Result<MappingTable> {
        if self.colors.len() != self.replacements.len() {
            return Err(CostumeError::TableMismatch {
                table: table_name.to_string(),
                colours: self.colors.len(),
                replacements: self.replacements.len(),
            });
        }
        Ok(MappingTable {
            colours: resolve_column(&self.colors, table_name, "colors")?,
            replacements: resolve_column(&self.replacements, table_name, "replacements")?,
        })
    }

    /// Lossy resolution: mismatched lengths truncate to the shorter column
    /// and bad tokens become opaque black.
    fn resolve_lossy(&self) -> MappingTable {
        let len = self.colors.len().min(self.replacements.len());
        let lossy = |tokens: &[String]| {
            tokens[..len]
                .iter()
                .map(|t| Colour::from_hex_or_black(t))
                .collect()
        };
        MappingTable {
            colours: lossy(&self.colors),
            replacements: lossy(&self.replacements),
        }
    }
}

fn resolve_column(tokens: &[String], table: &str, column: &str) -> Result<Vec<Colour>> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            Colour::from_hex(token).map_err(|_| CostumeError::InvalidColour {
                token: token.clone(),
                help: Some(format!("at {}.{}[{}]", table, column, i)),
            })
        })
        .collect()
}

/// The persisted costume document: the JSON wire format plus the optional
/// `team`/`base` metadata keys the game's costume lists carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostumeDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<bool>,

    #[serde(rename = "paletteSwap")]
    pub palette_swap: TableDoc,

    #[serde(rename = "paletteSwapPA")]
    pub palette_swap_pa: TableDoc,
}

impl CostumeDoc {
    /// Parse a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CostumeError::Parse {
            message: format!("Invalid costume document: {}", e),
            help: Some("Expected {\"info\", \"paletteSwap\", \"paletteSwapPA\"}".to_string()),
        })
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CostumeError::Parse {
            message: format!("Failed to serialize costume document: {}", e),
            help: None,
        })
    }

    /// Derive the costume kind from the metadata keys. `team` wins over
    /// `base`, which wins over `info`.
    pub fn kind(&self) -> CostumeKind {
        if let Some(team) = &self.team {
            CostumeKind::Team(team.clone())
        } else if self.base == Some(true) {
            CostumeKind::Base
        } else if let Some(info) = &self.info {
            CostumeKind::Named(info.clone())
        } else {
            CostumeKind::Unnamed
        }
    }

    /// Strictly resolve into a typed costume. The first malformed entry or
    /// length mismatch aborts with its table/column/index context; use the
    /// validation checks to collect every problem at once.
    pub fn resolve(&self) -> Result<Costume> {
        Ok(Costume {
            kind: self.kind(),
            palette_swap: self.palette_swap.resolve("paletteSwap")?,
            palette_swap_pa: self.palette_swap_pa.resolve("paletteSwapPA")?,
        })
    }

    /// Leniently resolve into a typed costume, substituting opaque black for
    /// malformed tokens and truncating mismatched tables.
    pub fn resolve_lossy(&self) -> Costume {
        Costume {
            kind: self.kind(),
            palette_swap: self.palette_swap.resolve_lossy(),
            palette_swap_pa: self.palette_swap_pa.resolve_lossy(),
        }
    }
}
