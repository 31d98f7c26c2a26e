// SPDX-License-Identifier: MPL-2.0
//! `magnify_glass` is a magnifying lens overlay for image surfaces, built with
//! the Iced GUI framework.
//!
//! The [`magnifier`] module holds the widget logic: lens sessions, sampling
//! geometry and the magnified bitmap. [`ui::overlay`] draws it on an Iced
//! canvas, and [`app`] is a small host that shows an image with the lens.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod magnifier;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
