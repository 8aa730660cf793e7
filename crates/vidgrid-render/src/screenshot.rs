//! Saving captured frames.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{RenderError, RenderResult};

/// Wraps tightly packed RGBA8 rows in an image.
pub fn to_image(data: Vec<u8>, width: u32, height: u32) -> RenderResult<RgbaImage> {
    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(width, height, data)
        .ok_or(RenderError::InvalidImageData)
}

/// Saves an RGBA image, choosing the encoder from the file extension.
///
/// Supports `.png`, `.jpg` and `.jpeg`; JPEG drops the alpha channel.
pub fn save_image(path: impl AsRef<Path>, image: &RgbaImage) -> RenderResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => {
            image.save_with_format(path, image::ImageFormat::Png)?;
        }
        "jpg" | "jpeg" => {
            // Convert to RGB for JPEG (no alpha)
            let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            rgb.save_with_format(path, image::ImageFormat::Jpeg)?;
        }
        _ => {
            return Err(RenderError::UnsupportedFormat(extension));
        }
    }

    log::info!("saved frame to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_image_checks_length() {
        assert!(to_image(vec![0; 16], 2, 2).is_ok());
        assert!(matches!(
            to_image(vec![0; 15], 2, 2),
            Err(RenderError::InvalidImageData)
        ));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let image = RgbaImage::new(1, 1);
        let path = std::env::temp_dir().join("vidgrid-frame.bmpx");
        assert!(matches!(
            save_image(&path, &image),
            Err(RenderError::UnsupportedFormat(ext)) if ext == "bmpx"
        ));
    }

    #[test]
    fn test_png_round_trip_on_disk() {
        let image = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let path = std::env::temp_dir().join(format!("vidgrid-shot-{}.png", std::process::id()));
        save_image(&path, &image).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(2, 1), &Rgba([10, 20, 30, 255]));
        std::fs::remove_file(&path).unwrap();
    }
}
