// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects shared by the magnifier, the overlay and the
//! configuration.
//!
//! # Modules
//!
//! - [`lens`]: Lens value objects ([`ZoomFactor`](lens::ZoomFactor),
//!   [`ZoomRange`](lens::ZoomRange), [`LensRadius`](lens::LensRadius),
//!   [`LensShape`](lens::LensShape))

pub mod lens;
