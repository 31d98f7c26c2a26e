// SPDX-License-Identifier: MPL-2.0
//! Media loading for the host surface.

pub mod image;

pub use image::{load_image, load_image_async, ImageData};
