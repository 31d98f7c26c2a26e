// SPDX-License-Identifier: MPL-2.0
//! The image surface a magnifier inspects.
//!
//! The host owns the surface through a [`SharedSurface`]; a magnifier only keeps
//! a weak reference, so dropping the host's handle ends any lens session.

use crate::error::BindingError;
use iced::{Size, Vector};
use image_rs::RgbaImage;
use std::sync::{Arc, RwLock};

/// Shared handle through which the host owns a surface.
pub type SharedSurface = Arc<RwLock<ViewSurface>>;

/// Displayed image plus the mapping between display and source pixels.
#[derive(Debug, Clone)]
pub struct ViewSurface {
    display_size: Size,
    source_size: Size,
    pixels: Option<Arc<RgbaImage>>,
}

impl ViewSurface {
    /// Creates a surface whose pixels are not loaded yet.
    ///
    /// `scale_factor` is `displayed / source`; an invalid factor is kept as is
    /// and reported by [`validate`](Self::validate).
    #[must_use]
    pub fn new(display_size: Size, scale_factor: f32) -> Self {
        Self {
            display_size,
            source_size: Size::new(
                display_size.width / scale_factor,
                display_size.height / scale_factor,
            ),
            pixels: None,
        }
    }

    /// Creates a loaded surface showing `pixels` at `display_size`.
    #[must_use]
    pub fn with_pixels(pixels: Arc<RgbaImage>, display_size: Size) -> Self {
        let mut surface = Self {
            display_size,
            source_size: Size::ZERO,
            pixels: None,
        };
        surface.set_pixels(pixels);
        surface
    }

    /// Wraps the surface in the shared handle hosts hand to magnifiers.
    #[must_use]
    pub fn into_shared(self) -> SharedSurface {
        Arc::new(RwLock::new(self))
    }

    /// Installs decoded pixels. The source size follows the image.
    pub fn set_pixels(&mut self, pixels: Arc<RgbaImage>) {
        #[allow(clippy::cast_precision_loss)]
        let source_size = Size::new(pixels.width() as f32, pixels.height() as f32);
        self.source_size = source_size;
        self.pixels = Some(pixels);
    }

    /// Updates the displayed size after a layout change. Source pixels are
    /// unchanged, so the scale factor follows.
    pub fn set_display_size(&mut self, display_size: Size) {
        self.display_size = display_size;
    }

    #[must_use]
    pub fn display_size(&self) -> Size {
        self.display_size
    }

    #[must_use]
    pub fn source_size(&self) -> Size {
        self.source_size
    }

    /// Display-to-source scale per axis (`displayed / source`).
    ///
    /// The axes differ when the host stretches the image to a different
    /// aspect ratio.
    #[must_use]
    pub fn scale(&self) -> Vector {
        let axis = |display: f32, source: f32| {
            if source > 0.0 {
                display / source
            } else {
                0.0
            }
        };
        Vector::new(
            axis(self.display_size.width, self.source_size.width),
            axis(self.display_size.height, self.source_size.height),
        )
    }

    #[must_use]
    pub fn pixels(&self) -> Option<&Arc<RgbaImage>> {
        self.pixels.as_ref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.pixels.is_some()
    }

    /// Whether `point` (surface-local display coordinates) lies on the surface.
    #[must_use]
    pub fn contains(&self, point: iced::Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.display_size.width
            && point.y <= self.display_size.height
    }

    /// Checks that the surface has been laid out and can be sampled.
    pub fn validate(&self) -> Result<(), BindingError> {
        let display = self.display_size;
        if !(display.width > 0.0 && display.height > 0.0) {
            return Err(BindingError::ZeroSize {
                width: display.width,
                height: display.height,
            });
        }

        let source = self.source_size;
        if !(source.width > 0.0 && source.height > 0.0) {
            return Err(BindingError::ZeroSize {
                width: source.width,
                height: source.height,
            });
        }

        let scale = self.scale();
        for factor in [scale.x, scale.y] {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(BindingError::InvalidScale(factor));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn pending_surface_derives_source_size_from_scale() {
        let surface = ViewSurface::new(Size::new(400.0, 300.0), 0.5);
        assert_abs_diff_eq!(surface.source_size().width, 800.0);
        assert_abs_diff_eq!(surface.source_size().height, 600.0);
        assert_abs_diff_eq!(surface.scale().x, 0.5);
        assert_abs_diff_eq!(surface.scale().y, 0.5);
        assert!(!surface.is_loaded());
    }

    #[test]
    fn pixels_define_source_size() {
        let pixels = Arc::new(RgbaImage::new(200, 100));
        let surface = ViewSurface::with_pixels(pixels, Size::new(100.0, 50.0));
        assert_abs_diff_eq!(surface.scale().x, 0.5);
        assert!(surface.is_loaded());
    }

    #[test]
    fn resizing_display_changes_scale() {
        let pixels = Arc::new(RgbaImage::new(200, 100));
        let mut surface = ViewSurface::with_pixels(pixels, Size::new(200.0, 100.0));
        surface.set_display_size(Size::new(400.0, 200.0));
        assert_abs_diff_eq!(surface.scale().x, 2.0);
        assert_abs_diff_eq!(surface.scale().y, 2.0);
    }

    #[test]
    fn stretched_display_has_per_axis_scale() {
        let pixels = Arc::new(RgbaImage::new(200, 100));
        let surface = ViewSurface::with_pixels(pixels, Size::new(400.0, 50.0));
        assert_abs_diff_eq!(surface.scale().x, 2.0);
        assert_abs_diff_eq!(surface.scale().y, 0.5);
        assert!(surface.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_size() {
        let surface = ViewSurface::new(Size::new(0.0, 300.0), 1.0);
        assert!(matches!(
            surface.validate(),
            Err(BindingError::ZeroSize { .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_image() {
        let pixels = Arc::new(RgbaImage::new(0, 0));
        let surface = ViewSurface::with_pixels(pixels, Size::new(100.0, 100.0));
        assert!(matches!(
            surface.validate(),
            Err(BindingError::ZeroSize { .. })
        ));
    }

    #[test]
    fn validate_rejects_infinite_scale() {
        let surface = ViewSurface::new(Size::new(100.0, 100.0), 0.0);
        assert!(surface.validate().is_err());
    }

    #[test]
    fn contains_includes_edges() {
        let surface = ViewSurface::new(Size::new(800.0, 600.0), 1.0);
        assert!(surface.contains(iced::Point::new(0.0, 0.0)));
        assert!(surface.contains(iced::Point::new(800.0, 600.0)));
        assert!(!surface.contains(iced::Point::new(800.5, 10.0)));
        assert!(!surface.contains(iced::Point::new(-1.0, 10.0)));
    }
}
