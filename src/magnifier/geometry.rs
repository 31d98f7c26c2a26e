// SPDX-License-Identifier: MPL-2.0
//! Lens geometry: which source pixels to sample and where to draw the lens.

use crate::config::LENS_POINTER_GAP;
use crate::domain::lens::{LensRadius, ZoomFactor};
use iced::{Point, Rectangle, Size, Vector};

/// Corner of the pointer the lens box sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LensAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Source-pixel rectangle centred on the pointer, before clamping.
///
/// The half-extent is `radius / zoom` display pixels, converted to source
/// pixels through the per-axis `scale` (`displayed / source`). It may extend
/// past the image; see [`clamp_to_source`].
#[must_use]
pub fn sampling_rect(
    position: Point,
    zoom: ZoomFactor,
    radius: LensRadius,
    scale: Vector,
) -> Rectangle {
    let half = radius.value() / zoom.value();
    let half_x = half / scale.x;
    let half_y = half / scale.y;

    Rectangle {
        x: position.x / scale.x - half_x,
        y: position.y / scale.y - half_y,
        width: half_x * 2.0,
        height: half_y * 2.0,
    }
}

/// Intersects a sampling rectangle with the image bounds.
///
/// Returns `None` when nothing of the image is covered. Edges yield a partial
/// rectangle; coordinates never wrap.
#[must_use]
pub fn clamp_to_source(rect: Rectangle, source: Size) -> Option<Rectangle> {
    let left = rect.x.max(0.0);
    let top = rect.y.max(0.0);
    let right = (rect.x + rect.width).min(source.width);
    let bottom = (rect.y + rect.height).min(source.height);

    if right <= left || bottom <= top {
        return None;
    }

    Some(Rectangle {
        x: left,
        y: top,
        width: right - left,
        height: bottom - top,
    })
}

/// Places the lens box next to the pointer without covering it.
///
/// The box goes above-left of the pointer. Each axis flips independently when
/// the box would cross the left or top edge of `viewport`, and the result is
/// finally clamped into the viewport when it still does not fit.
#[must_use]
pub fn place_lens(pointer: Point, radius: LensRadius, viewport: Size) -> (Rectangle, LensAnchor) {
    let diameter = radius.diameter();

    let mut x = pointer.x - LENS_POINTER_GAP - diameter;
    let flip_x = x < 0.0;
    if flip_x {
        x = pointer.x + LENS_POINTER_GAP;
    }

    let mut y = pointer.y - LENS_POINTER_GAP - diameter;
    let flip_y = y < 0.0;
    if flip_y {
        y = pointer.y + LENS_POINTER_GAP;
    }

    // Viewports smaller than the box keep the box at the origin.
    x = x.min(viewport.width - diameter).max(0.0);
    y = y.min(viewport.height - diameter).max(0.0);

    let anchor = match (flip_x, flip_y) {
        (false, false) => LensAnchor::TopLeft,
        (true, false) => LensAnchor::TopRight,
        (false, true) => LensAnchor::BottomLeft,
        (true, true) => LensAnchor::BottomRight,
    };

    (
        Rectangle {
            x,
            y,
            width: diameter,
            height: diameter,
        },
        anchor,
    )
}
