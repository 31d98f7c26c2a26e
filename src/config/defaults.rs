// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Lens zoom factor and its bounds
//! - **Lens**: Lens radius bounds and placement
//! - **Window**: Demo host window size

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Default lens magnification (2.0 = twice the displayed size).
pub const DEFAULT_ZOOM_FACTOR: f32 = 2.0;

/// Default lower bound of the configurable zoom range.
pub const DEFAULT_MIN_ZOOM: f32 = 1.5;

/// Default upper bound of the configurable zoom range.
pub const DEFAULT_MAX_ZOOM: f32 = 8.0;

/// Smallest zoom a configured range may start at. A lens must magnify.
pub const ABSOLUTE_MIN_ZOOM: f32 = 1.01;

/// Largest zoom a configured range may reach.
pub const ABSOLUTE_MAX_ZOOM: f32 = 64.0;

/// Default zoom increment for wheel and keyboard stepping.
pub const DEFAULT_ZOOM_STEP: f32 = 0.5;

/// Minimum zoom step.
pub const MIN_ZOOM_STEP: f32 = 0.05;

/// Maximum zoom step.
pub const MAX_ZOOM_STEP: f32 = 4.0;

// ==========================================================================
// Lens Defaults
// ==========================================================================

/// Default lens radius in pixels.
pub const DEFAULT_LENS_RADIUS: f32 = 80.0;

/// Minimum lens radius in pixels.
pub const MIN_LENS_RADIUS: f32 = 8.0;

/// Maximum lens radius in pixels.
pub const MAX_LENS_RADIUS: f32 = 400.0;

/// Distance between the pointer and the nearest corner of the lens box.
pub const LENS_POINTER_GAP: f32 = 16.0;

/// Width of the lens outline stroke.
pub const LENS_BORDER_WIDTH: f32 = 2.0;

// ==========================================================================
// Window Defaults
// ==========================================================================

pub const WINDOW_DEFAULT_WIDTH: f32 = 1024.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 768.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(ABSOLUTE_MIN_ZOOM > 1.0);
    assert!(DEFAULT_MIN_ZOOM >= ABSOLUTE_MIN_ZOOM);
    assert!(DEFAULT_MAX_ZOOM <= ABSOLUTE_MAX_ZOOM);
    assert!(DEFAULT_MIN_ZOOM < DEFAULT_MAX_ZOOM);
    assert!(DEFAULT_ZOOM_FACTOR >= DEFAULT_MIN_ZOOM);
    assert!(DEFAULT_ZOOM_FACTOR <= DEFAULT_MAX_ZOOM);
    assert!(MIN_ZOOM_STEP > 0.0);
    assert!(DEFAULT_ZOOM_STEP >= MIN_ZOOM_STEP);
    assert!(DEFAULT_ZOOM_STEP <= MAX_ZOOM_STEP);

    assert!(MIN_LENS_RADIUS > 0.0);
    assert!(DEFAULT_LENS_RADIUS >= MIN_LENS_RADIUS);
    assert!(DEFAULT_LENS_RADIUS <= MAX_LENS_RADIUS);
    assert!(LENS_POINTER_GAP >= 0.0);
};
