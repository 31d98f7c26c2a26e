// SPDX-License-Identifier: MPL-2.0
//! Lens session state and the per-frame render output.

use super::geometry::LensAnchor;
use crate::domain::lens::{LensRadius, LensShape, ZoomFactor};
use iced::widget::image::Handle;
use iced::{Point, Rectangle};
use image_rs::RgbaImage;
use std::sync::Arc;

/// A running lens session.
///
/// Exists only while the pointer is over the surface; the magnifier holds it
/// as an `Option` and drops it on deactivation.
#[derive(Debug, Clone, PartialEq)]
pub struct LensState {
    /// Pointer position in surface-local display coordinates.
    pub position: Point,
    pub zoom: ZoomFactor,
    pub radius: LensRadius,
}

/// What the lens shows.
#[derive(Debug, Clone)]
pub enum LensContent {
    /// Magnified bitmap, sized to the lens box.
    Pixels {
        bitmap: Arc<RgbaImage>,
        handle: Handle,
    },
    /// The surface has no pixel data yet; only the outline is drawn.
    Pending,
}

impl LensContent {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, LensContent::Pending)
    }
}

/// Everything the overlay needs to draw one lens frame.
#[derive(Debug, Clone)]
pub struct LensFrame {
    /// Lens box in surface-local display coordinates.
    pub viewport: Rectangle,
    pub anchor: LensAnchor,
    pub shape: LensShape,
    pub pointer: Point,
    pub zoom: ZoomFactor,
    /// Sampled source rectangle clamped to the image, `None` when the lens
    /// covers no image pixels.
    pub sample: Option<Rectangle>,
    pub content: LensContent,
}
