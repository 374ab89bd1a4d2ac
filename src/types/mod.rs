//! Core domain types.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - the transparent sentinel or a packed ARGB value
//! - `PixelBuffer` - a decoded sprite sheet
//! - `MappingTable` - index-aligned colour substitutions
//! - `Costume` - two mapping tables plus identifying metadata

mod buffer;
mod colour;
mod costume;
mod table;

pub use buffer::PixelBuffer;
pub use colour::{Colour, TRANSPARENT_TOKEN};
pub use costume::{Costume, CostumeDoc, CostumeKind, TableDoc};
pub use table::MappingTable;
