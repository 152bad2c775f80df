//! QR code rendering for share links.

use anyhow::Context;
use image::{GrayImage, Luma};
use qrcode::{Color, QrCode};
use std::io::Cursor;

const MODULE_SCALE: u32 = 8;
// Quiet zone width in modules
const QUIET_ZONE: u32 = 4;

/// Render a share link as a PNG QR image.
pub fn render_qr_png(url: &str) -> Result<Vec<u8>, anyhow::Error> {
    let code = QrCode::new(url.as_bytes()).context("Failed to encode QR code")?;
    let width = code.width() as u32;
    let dim = (width + 2 * QUIET_ZONE) * MODULE_SCALE;

    let mut img = GrayImage::from_pixel(dim, dim, Luma([255u8]));

    for (i, color) in code.to_colors().iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let mx = (i as u32 % width + QUIET_ZONE) * MODULE_SCALE;
        let my = (i as u32 / width + QUIET_ZONE) * MODULE_SCALE;
        for dy in 0..MODULE_SCALE {
            for dx in 0..MODULE_SCALE {
                img.put_pixel(mx + dx, my + dy, Luma([0u8]));
            }
        }
    }

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .context("Failed to encode QR image as PNG")?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47];

    #[test]
    fn test_render_produces_png() {
        let png = render_qr_png("http://localhost:3000/Ab3dE9xZ").unwrap();
        assert!(png.starts_with(PNG_MAGIC));
        assert!(png.len() > 100);
    }

    #[test]
    fn test_different_links_differ() {
        let a = render_qr_png("http://localhost:3000/aaaaaaaa").unwrap();
        let b = render_qr_png("http://localhost:3000/bbbbbbbb").unwrap();
        assert_ne!(a, b);
    }
}
