// SPDX-License-Identifier: MPL-2.0
//! Lens value objects.

pub mod newtypes;

pub use newtypes::{LensRadius, LensShape, ZoomFactor, ZoomRange, ZoomStep};
