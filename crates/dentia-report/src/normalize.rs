use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;
use chrono::Utc;
use image::{DynamicImage, ImageFormat};

/// An uploaded scan image after decoding and re-encoding to RGB PNG.
///
/// The PNG bytes are both written to a staging file under the reports
/// directory and kept in memory, so the model call and the document embed
/// read the same data.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub path: PathBuf,
    pub png: Bytes,
    pub width: u32,
    pub height: u32,
}

/// Decodes an uploaded image from any supported format, flattens it to
/// 8-bit RGB and re-encodes it as PNG in a staging file named
/// `converted_{timestamp}.png`.
///
/// Alpha channels are dropped rather than composited, so the output is
/// deterministic for a given input regardless of source format.
pub fn normalize_image(data: &[u8], staging_dir: &Path) -> anyhow::Result<NormalizedImage> {
    let decoded = image::load_from_memory(data).context("failed to decode image")?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .context("failed to encode PNG")?;

    let path = staging_dir.join(format!("converted_{}.png", Utc::now().timestamp_micros()));
    std::fs::write(&path, &png)
        .with_context(|| format!("failed to write staging image {}", path.display()))?;

    Ok(NormalizedImage {
        path,
        png: Bytes::from(png),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn sample_image_bytes(format: ImageFormat) -> Vec<u8> {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(4, 3, |x, y| Rgba([x as u8 * 10, y as u8 * 20, 100, 255]));
        let mut out = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), format)
            .unwrap();
        out
    }

    #[test]
    fn decodes_and_stages_png() {
        let dir = tempfile::tempdir().unwrap();
        let input = sample_image_bytes(ImageFormat::Png);

        let normalized = normalize_image(&input, dir.path()).unwrap();

        assert_eq!((normalized.width, normalized.height), (4, 3));
        assert!(normalized.path.exists());
        assert_eq!(std::fs::read(&normalized.path).unwrap(), normalized.png);
        let name = normalized.path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("converted_") && name.ends_with(".png"));
    }

    #[test]
    fn renormalizing_output_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let input = sample_image_bytes(ImageFormat::Bmp);

        let first = normalize_image(&input, dir.path()).unwrap();
        let second = normalize_image(&first.png, dir.path()).unwrap();

        assert_eq!(first.png, second.png);
        assert_ne!(first.path, second.path);
    }

    #[test]
    fn rejects_undecodable_data() {
        let dir = tempfile::tempdir().unwrap();
        assert!(normalize_image(b"not an image at all", dir.path()).is_err());
    }
}
