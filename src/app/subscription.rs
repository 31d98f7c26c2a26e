// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Pointer events reach the magnifier through the overlay canvas; this module
//! only routes window and keyboard events, plus frame ticks while the lens
//! has pending work.

use super::Message;
use crate::magnifier::Magnifier;
use iced::{event, window, Subscription};

/// Routes window resizes and unhandled key presses.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| {
        if let event::Event::Window(window::Event::Resized(size)) = &event {
            return Some(Message::WindowResized(*size));
        }

        if let event::Event::Keyboard(iced::keyboard::Event::KeyPressed { key, .. }) = &event {
            return match status {
                event::Status::Ignored => Some(Message::KeyPressed(key.clone())),
                event::Status::Captured => None,
            };
        }

        None
    })
}

/// Delivers one tick per display frame while the magnifier has work queued.
pub fn create_frame_subscription(magnifier: &Magnifier) -> Subscription<Message> {
    if magnifier.needs_frame() {
        window::frames().map(Message::Frame)
    } else {
        Subscription::none()
    }
}
