//! Image loading
//!
//! Reads the photograph, downsizes it to a bounded longest edge and
//! re-encodes it for inline upload.

use crate::error::{Result, RockAiError};
use base64::{engine::general_purpose::STANDARD, Engine};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Encoded image ready for upload
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
}

impl ImagePayload {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Load an image and bound its longest edge to `max_edge` pixels
///
/// # Arguments
/// * `path` - image file
/// * `max_edge` - longest edge after resizing; smaller images are not upscaled
///
/// # Returns
/// * `Ok(ImagePayload)` - JPEG, or PNG for images with an alpha channel
/// * `Err(FileNotFound)` - `path` does not exist
/// * `Err(ImageDecode)` - unsupported or corrupt image data
pub fn load_image(path: &Path, max_edge: u32) -> Result<ImagePayload> {
    if !path.is_file() {
        return Err(RockAiError::FileNotFound(path.display().to_string()));
    }

    let image = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| RockAiError::ImageDecode(format!("{}: {}", path.display(), e)))?;

    let (orig_w, orig_h) = image.dimensions();
    let resized = bound_longest_edge(image, max_edge);
    let (width, height) = resized.dimensions();
    debug!(
        "loaded {} ({}x{} -> {}x{})",
        path.display(),
        orig_w,
        orig_h,
        width,
        height
    );

    encode(resized)
}

/// Downscale preserving aspect ratio so neither edge exceeds `max_edge`
pub fn bound_longest_edge(image: DynamicImage, max_edge: u32) -> DynamicImage {
    let (w, h) = image.dimensions();
    if max_edge == 0 || (w <= max_edge && h <= max_edge) {
        return image;
    }
    image.resize(max_edge, max_edge, FilterType::Lanczos3)
}

fn encode(image: DynamicImage) -> Result<ImagePayload> {
    let (width, height) = image.dimensions();
    let mut buffer = Cursor::new(Vec::new());

    let mime_type = if image.color().has_alpha() {
        image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| RockAiError::ImageDecode(format!("PNG encode failed: {}", e)))?;
        "image/png"
    } else {
        // JPEG has no alpha and only 8-bit channels
        DynamicImage::ImageRgb8(image.to_rgb8())
            .write_to(&mut buffer, ImageFormat::Jpeg)
            .map_err(|e| RockAiError::ImageDecode(format!("JPEG encode failed: {}", e)))?;
        "image/jpeg"
    };

    Ok(ImagePayload {
        bytes: buffer.into_inner(),
        mime_type,
        width,
        height,
    })
}
