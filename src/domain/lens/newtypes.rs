// SPDX-License-Identifier: MPL-2.0
//! Lens newtypes.
//!
//! This module provides type-safe wrappers for lens values,
//! ensuring they are always within valid ranges.

use crate::config::defaults::{
    ABSOLUTE_MAX_ZOOM, ABSOLUTE_MIN_ZOOM, DEFAULT_LENS_RADIUS, DEFAULT_MAX_ZOOM,
    DEFAULT_MIN_ZOOM, DEFAULT_ZOOM_FACTOR, DEFAULT_ZOOM_STEP, MAX_LENS_RADIUS, MAX_ZOOM_STEP,
    MIN_LENS_RADIUS, MIN_ZOOM_STEP,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// ZoomRange
// =============================================================================

/// Inclusive zoom bounds a lens may use.
///
/// The lower bound is always above 1.0 and the upper bound never below the
/// lower one, whatever the configuration file says.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    min: f32,
    max: f32,
}

impl ZoomRange {
    /// Creates a range, repairing invalid bounds instead of rejecting them.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        let min = if min.is_finite() {
            min.clamp(ABSOLUTE_MIN_ZOOM, ABSOLUTE_MAX_ZOOM)
        } else {
            DEFAULT_MIN_ZOOM
        };
        let max = if max.is_finite() {
            max.clamp(min, ABSOLUTE_MAX_ZOOM)
        } else {
            DEFAULT_MAX_ZOOM.max(min)
        };
        Self { min, max }
    }

    #[must_use]
    pub fn min(self) -> f32 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f32 {
        self.max
    }

    /// Clamps a raw factor into this range.
    #[must_use]
    pub fn clamp(self, factor: f32) -> ZoomFactor {
        ZoomFactor(factor.clamp(self.min, self.max))
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_ZOOM,
            max: DEFAULT_MAX_ZOOM,
        }
    }
}

// =============================================================================
// ZoomFactor
// =============================================================================

/// Lens magnification, always strictly greater than 1.0.
///
/// Only obtainable through [`ZoomRange::clamp`] or `Default`, so a value
/// always sits inside the range it was clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// Returns the raw multiplier.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Increases zoom by the given step, staying inside `range`.
    #[must_use]
    pub fn zoom_in(self, step: ZoomStep, range: ZoomRange) -> Self {
        range.clamp(self.0 + step.value())
    }

    /// Decreases zoom by the given step, staying inside `range`.
    #[must_use]
    pub fn zoom_out(self, step: ZoomStep, range: ZoomRange) -> Self {
        range.clamp(self.0 - step.value())
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(DEFAULT_ZOOM_FACTOR)
    }
}

// =============================================================================
// ZoomStep
// =============================================================================

/// Zoom increment used by wheel and keyboard stepping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomStep(f32);

impl ZoomStep {
    /// Creates a new zoom step, clamping the value to the valid range.
    #[must_use]
    pub fn new(step: f32) -> Self {
        if step.is_finite() {
            Self(step.clamp(MIN_ZOOM_STEP, MAX_ZOOM_STEP))
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for ZoomStep {
    fn default() -> Self {
        Self(DEFAULT_ZOOM_STEP)
    }
}

// =============================================================================
// LensRadius
// =============================================================================

/// Lens radius in pixels, guaranteed to be within valid range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensRadius(f32);

impl LensRadius {
    /// Creates a new radius, clamping the value to the valid range.
    #[must_use]
    pub fn new(pixels: f32) -> Self {
        if pixels.is_finite() {
            Self(pixels.clamp(MIN_LENS_RADIUS, MAX_LENS_RADIUS))
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Side length of the square box enclosing the lens.
    #[must_use]
    pub fn diameter(self) -> f32 {
        self.0 * 2.0
    }
}

impl Default for LensRadius {
    fn default() -> Self {
        Self(DEFAULT_LENS_RADIUS)
    }
}

// =============================================================================
// LensShape
// =============================================================================

/// Outline of the lens viewport.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LensShape {
    #[default]
    Circle,
    Square,
}

impl fmt::Display for LensShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LensShape::Circle => write!(f, "circle"),
            LensShape::Square => write!(f, "square"),
        }
    }
}

impl FromStr for LensShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "circle" => Ok(LensShape::Circle),
            "square" => Ok(LensShape::Square),
            other => Err(format!("invalid lens shape: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // ZoomRange / ZoomFactor tests
    // -------------------------------------------------------------------------

    #[test]
    fn zoom_range_clamps_requested_factor() {
        let range = ZoomRange::default();
        assert!((range.clamp(20.0).value() - DEFAULT_MAX_ZOOM).abs() < f32::EPSILON);
        assert!((range.clamp(0.5).value() - DEFAULT_MIN_ZOOM).abs() < f32::EPSILON);
        assert!((range.clamp(3.0).value() - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zoom_range_repairs_inverted_bounds() {
        let range = ZoomRange::new(6.0, 2.0);
        assert!((range.min() - 6.0).abs() < f32::EPSILON);
        assert!((range.max() - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zoom_range_never_allows_unit_zoom() {
        let range = ZoomRange::new(0.25, 4.0);
        assert!(range.min() > 1.0);
        assert!(range.clamp(1.0).value() > 1.0);
    }

    #[test]
    fn zoom_range_replaces_non_finite_bounds() {
        let range = ZoomRange::new(f32::NAN, f32::INFINITY);
        assert!((range.min() - DEFAULT_MIN_ZOOM).abs() < f32::EPSILON);
        assert!((range.max() - DEFAULT_MAX_ZOOM).abs() < f32::EPSILON);
    }

    #[test]
    fn zoom_factor_steps_stay_in_range() {
        let range = ZoomRange::default();
        let step = ZoomStep::new(1.0);
        let zoom = range.clamp(7.5).zoom_in(step, range);
        assert!((zoom.value() - DEFAULT_MAX_ZOOM).abs() < f32::EPSILON);
        let zoom = range.clamp(2.0).zoom_out(step, range);
        assert!((zoom.value() - DEFAULT_MIN_ZOOM).abs() < f32::EPSILON);
    }

    // -------------------------------------------------------------------------
    // LensRadius tests
    // -------------------------------------------------------------------------

    #[test]
    fn lens_radius_clamps() {
        assert!((LensRadius::new(0.0).value() - MIN_LENS_RADIUS).abs() < f32::EPSILON);
        assert!((LensRadius::new(5000.0).value() - MAX_LENS_RADIUS).abs() < f32::EPSILON);
        assert!((LensRadius::new(-3.0).value() - MIN_LENS_RADIUS).abs() < f32::EPSILON);
        assert!((LensRadius::new(f32::NAN).value() - DEFAULT_LENS_RADIUS).abs() < f32::EPSILON);
    }

    #[test]
    fn lens_radius_diameter() {
        assert!((LensRadius::new(80.0).diameter() - 160.0).abs() < f32::EPSILON);
    }

    // -------------------------------------------------------------------------
    // LensShape tests
    // -------------------------------------------------------------------------

    #[test]
    fn lens_shape_parses_case_insensitively() {
        assert_eq!("Circle".parse::<LensShape>(), Ok(LensShape::Circle));
        assert_eq!(" square ".parse::<LensShape>(), Ok(LensShape::Square));
        assert!("hexagon".parse::<LensShape>().is_err());
    }

    #[test]
    fn lens_shape_display_round_trips() {
        for shape in [LensShape::Circle, LensShape::Square] {
            assert_eq!(shape.to_string().parse::<LensShape>(), Ok(shape));
        }
    }
}
