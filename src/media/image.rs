// SPDX-License-Identifier: MPL-2.0
//! Image loading and decoding (PNG, JPEG, GIF, WebP, etc.).

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Decoded image ready to be shown and magnified.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Handle for the display widget.
    pub handle: image::Handle,
    /// Source pixels shared with the magnifier surface.
    pub pixels: Arc<RgbaImage>,
}

impl ImageData {
    /// Wraps decoded RGBA pixels. The handle gets its own copy of the bytes.
    #[must_use]
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        let handle = image::Handle::from_rgba(pixels.width(), pixels.height(), pixels.as_raw().clone());
        Self {
            handle,
            pixels: Arc::new(pixels),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Load an image from the given path and return its data.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read ([`Error::Io`])
/// - The image format is invalid or unsupported ([`Error::Image`])
/// - The image has zero width or height ([`Error::Image`])
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageData> {
    let path = path.as_ref();
    let img_bytes = fs::read(path)?;
    let img = image_rs::load_from_memory(&img_bytes)?;

    let rgba = img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(Error::Image("image has empty dimensions".into()));
    }

    Ok(ImageData::from_rgba(rgba))
}

/// Decodes off the UI thread.
pub async fn load_image_async(path: PathBuf) -> Result<ImageData> {
    tokio::task::spawn_blocking(move || load_image(path))
        .await
        .map_err(|e| Error::Io(format!("image decode task failed: {e}")))?
}
