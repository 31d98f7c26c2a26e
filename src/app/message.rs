// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::lens::LensShape;
use crate::error::Error;
use crate::media::ImageData;
use crate::ui::overlay;
use iced::keyboard::Key;
use iced::Size;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    ImageLoaded(Result<ImageData, Error>),
    Overlay(overlay::Message),
    /// Display frame tick, only subscribed while the lens needs redrawing.
    Frame(Instant),
    WindowResized(Size),
    KeyPressed(Key),
}

/// Runtime flags passed from the command line to the application.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Image to open at startup.
    pub file_path: Option<String>,
    /// Overrides `[magnifier] zoom_factor`.
    pub zoom: Option<f32>,
    /// Overrides `[magnifier] lens_radius`.
    pub radius: Option<f32>,
    /// Overrides `[magnifier] shape`.
    pub shape: Option<LensShape>,
}
