//! Image file input/output.

mod png;

pub use png::{buffer_from_image, image_from_buffer, read_png, write_png};
