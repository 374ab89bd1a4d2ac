//! PNG decode/encode for pixel buffers.
//!
//! The core operates on `PixelBuffer` only; this is the boundary where the
//! `image` crate turns files into buffers and back, with optional integer
//! scaling for preview output.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{CostumeError, Result};
use crate::types::{Colour, PixelBuffer};

/// Decode an image file into a pixel buffer.
///
/// Fully-transparent source pixels become the transparent sentinel.
pub fn read_png(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .map_err(|e| CostumeError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .to_rgba8();

    Ok(buffer_from_image(&img))
}

/// Convert a decoded RGBA image into a pixel buffer.
pub fn buffer_from_image(img: &RgbaImage) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(img.width() as usize, img.height() as usize);
    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        buffer.set(x as usize, y as usize, Colour::from_rgba(r, g, b, a));
    }
    buffer
}

/// Convert a pixel buffer into an RGBA image.
pub fn image_from_buffer(buffer: &PixelBuffer) -> RgbaImage {
    let mut img: RgbaImage =
        ImageBuffer::new(buffer.width() as u32, buffer.height() as u32);
    for (y, row) in buffer.rows().enumerate() {
        for (x, colour) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, Rgba(colour.to_rgba()));
        }
    }
    img
}

/// Write a pixel buffer to a PNG file with integer nearest-neighbour
/// upscaling (`scale` 1 = no scaling).
pub fn write_png(buffer: &PixelBuffer, path: &Path, scale: u32) -> Result<()> {
    let scale = scale.max(1);

    let width = buffer.width() as u32 * scale;
    let height = buffer.height() as u32 * scale;
    let mut img: RgbaImage = ImageBuffer::new(width, height);

    for (y, row) in buffer.rows().enumerate() {
        for (x, colour) in row.iter().enumerate() {
            let rgba = Rgba(colour.to_rgba());
            for sy in 0..scale {
                for sx in 0..scale {
                    img.put_pixel(x as u32 * scale + sx, y as u32 * scale + sy, rgba);
                }
            }
        }
    }

    img.save(path).map_err(|e| CostumeError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_write_read_round_trip() {
        let buffer = PixelBuffer::from_rows(vec![
            vec![Colour::rgb(255, 0, 0), Colour::Transparent],
            vec![Colour::Opaque(0x8010_2030), Colour::rgb(0, 0, 255)],
        ]);

        let dir = tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        write_png(&buffer, &path, 1).unwrap();

        let back = read_png(&path).unwrap();
        assert_eq!(back, buffer);
    }

    #[test]
    fn test_transparent_pixels_stay_sentinel() {
        let buffer = PixelBuffer::new(2, 1);

        let dir = tempdir().unwrap();
        let path = dir.path().join("clear.png");
        write_png(&buffer, &path, 1).unwrap();

        let back = read_png(&path).unwrap();
        assert!(back.pixels().iter().all(|c| c.is_transparent()));
    }

    #[test]
    fn test_write_png_scaled() {
        let buffer = PixelBuffer::from_rows(vec![vec![
            Colour::rgb(255, 0, 0),
            Colour::rgb(0, 255, 0),
        ]]);

        let dir = tempdir().unwrap();
        let path = dir.path().join("scaled.png");
        write_png(&buffer, &path, 2).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(2, 0).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_scale_zero_treated_as_one() {
        let buffer = PixelBuffer::from_rows(vec![vec![Colour::rgb(1, 2, 3)]]);

        let dir = tempdir().unwrap();
        let path = dir.path().join("zero.png");
        write_png(&buffer, &path, 0).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (1, 1));
    }

    #[test]
    fn test_image_conversion_round_trip() {
        let buffer = PixelBuffer::from_rows(vec![vec![
            Colour::rgb(9, 8, 7),
            Colour::Transparent,
        ]]);
        assert_eq!(buffer_from_image(&image_from_buffer(&buffer)), buffer);
    }
}
