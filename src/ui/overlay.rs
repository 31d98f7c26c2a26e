// SPDX-License-Identifier: MPL-2.0
//! Lens overlay renderer.
//!
//! A canvas laid over the displayed image. It draws the current
//! [`LensFrame`] and reports pointer activity in surface-local coordinates.

use crate::config::LENS_BORDER_WIDTH;
use crate::domain::lens::LensShape;
use crate::magnifier::{LensContent, LensFrame};
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::widget::Action;
use iced::{mouse, Color, Point, Rectangle, Renderer, Size, Theme};

/// Pointer activity over the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    PointerMoved(Point),
    PointerLeft,
    /// Wheel movement in lines, positive away from the user.
    Wheel(f32),
}

/// Approximate pixels per wheel line for touchpads reporting pixel deltas.
const PIXELS_PER_LINE: f32 = 40.0;

fn border_color() -> Color {
    Color::from_rgb8(0xF2, 0xF2, 0xF2)
}

fn shadow_color() -> Color {
    Color::from_rgba8(0, 0, 0, 0.45)
}

fn pending_fill_color() -> Color {
    Color::from_rgba8(0x20, 0x20, 0x20, 0.35)
}

/// Canvas program drawing the lens for one frame.
pub struct LensOverlay<'a> {
    lens: Option<&'a LensFrame>,
}

impl<'a> LensOverlay<'a> {
    #[must_use]
    pub fn new(lens: Option<&'a LensFrame>) -> Self {
        Self { lens }
    }
}

fn outline(shape: LensShape, viewport: Rectangle) -> Path {
    match shape {
        LensShape::Circle => Path::circle(viewport.center(), viewport.width / 2.0),
        LensShape::Square => Path::rectangle(viewport.position(), viewport.size()),
    }
}

fn draw_lens(frame: &mut Frame, lens: &LensFrame) {
    let viewport = lens.viewport;
    let path = outline(lens.shape, viewport);

    match &lens.content {
        LensContent::Pixels { handle, .. } => frame.draw_image(viewport, handle),
        LensContent::Pending => frame.fill(&path, pending_fill_color()),
    }

    frame.stroke(
        &path,
        Stroke::default()
            .with_width(LENS_BORDER_WIDTH * 2.0)
            .with_color(shadow_color()),
    );
    frame.stroke(
        &path,
        Stroke::default()
            .with_width(LENS_BORDER_WIDTH)
            .with_color(border_color()),
    );

    // Crosshair marking the sampled point at the lens centre.
    let center = viewport.center();
    let arm = (viewport.width / 16.0).max(3.0);
    let crosshair_stroke = Stroke::default().with_width(1.0).with_color(border_color());
    frame.stroke(
        &Path::line(
            Point::new(center.x - arm, center.y),
            Point::new(center.x + arm, center.y),
        ),
        crosshair_stroke,
    );
    frame.stroke(
        &Path::line(
            Point::new(center.x, center.y - arm),
            Point::new(center.x, center.y + arm),
        ),
        crosshair_stroke,
    );
}

/// Converts a wheel delta into lines, positive away from the user.
fn wheel_lines(delta: mouse::ScrollDelta) -> f32 {
    match delta {
        mouse::ScrollDelta::Lines { y, .. } => y,
        mouse::ScrollDelta::Pixels { y, .. } => y / PIXELS_PER_LINE,
    }
}

/// Maps a canvas event to pointer activity in surface-local coordinates.
///
/// Moves outside `bounds` count as leaving the surface; wheel input outside
/// `bounds` is ignored.
fn pointer_message(event: &iced::Event, bounds: Rectangle, cursor: mouse::Cursor) -> Option<Message> {
    match event {
        iced::Event::Mouse(mouse::Event::CursorLeft) => Some(Message::PointerLeft),
        iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => Some(
            cursor
                .position_in(bounds)
                .map_or(Message::PointerLeft, Message::PointerMoved),
        ),
        iced::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
            cursor.position_in(bounds)?;
            Some(Message::Wheel(wheel_lines(*delta)))
        }
        _ => None,
    }
}

impl canvas::Program<Message> for LensOverlay<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        let message = pointer_message(event, bounds, cursor)?;
        let action = Action::publish(message);
        // Wheel input zooms the lens and is not passed on.
        Some(match message {
            Message::Wheel(_) => action.and_capture(),
            _ => action,
        })
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let Some(lens) = self.lens else {
            return Vec::new();
        };

        let mut frame = Frame::new(renderer, Size::new(bounds.width, bounds.height));
        draw_lens(&mut frame, lens);
        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.lens.is_some() && cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}
