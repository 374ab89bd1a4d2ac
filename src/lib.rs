//! costume - Sprite-sheet recolor pipeline
//!
//! A library for extracting palette strips from reference sprite sheets and
//! applying two-stage colour-substitution tables to produce recolored
//! costume sheets.

pub mod cli;
pub mod composite;
pub mod error;
pub mod manifest;
pub mod output;
pub mod render;
pub mod scan;
pub mod types;
pub mod validation;

pub use composite::{composite, CompositeOptions};
pub use error::{CostumeError, Result};
pub use manifest::{Manifest, MANIFEST_FILENAME};
pub use render::{buffer_from_image, image_from_buffer, read_png, write_png};
pub use scan::{scan_strips, PaletteStrip, ScanConfig};
pub use types::{
    Colour, Costume, CostumeDoc, CostumeKind, MappingTable, PixelBuffer, TableDoc,
    TRANSPARENT_TOKEN,
};
pub use validation::{validate_doc, Diagnostic, EntryRef, Severity, ValidationResult};
