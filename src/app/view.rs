// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The image and the lens overlay canvas are stacked at the same fixed size,
//! so canvas coordinates are surface-local coordinates.

use super::{Message, Status, STATUS_BAR_HEIGHT};
use crate::magnifier::Magnifier;
use crate::media::ImageData;
use crate::ui::overlay::LensOverlay;
use iced::widget::{image, Canvas, Column, Container, Stack, Text};
use iced::{ContentFit, Element, Length, Size};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub image: Option<&'a ImageData>,
    pub display_size: Size,
    pub magnifier: &'a Magnifier,
    pub status: &'a Status,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let content: Element<'_, Message> = match ctx.image {
        Some(data) if ctx.display_size.width > 0.0 && ctx.display_size.height > 0.0 => {
            view_surface(data, ctx.display_size, ctx.magnifier)
        }
        _ => Text::new(placeholder_text(ctx.status)).into(),
    };

    let body = Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill);

    let status_bar = Container::new(Text::new(status_line(ctx.magnifier)).size(14))
        .width(Length::Fill)
        .height(Length::Fixed(STATUS_BAR_HEIGHT))
        .padding([6, 12]);

    Column::new()
        .push(body)
        .push(status_bar)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_surface<'a>(
    data: &'a ImageData,
    display_size: Size,
    magnifier: &'a Magnifier,
) -> Element<'a, Message> {
    let width = Length::Fixed(display_size.width);
    let height = Length::Fixed(display_size.height);

    let picture = image(data.handle.clone())
        .width(width)
        .height(height)
        .content_fit(ContentFit::Fill);

    // The canvas stays in the tree so pointer events keep flowing; it draws
    // nothing while no lens frame exists.
    let overlay: Element<'a, Message> = Element::from(
        Canvas::new(LensOverlay::new(magnifier.lens()))
            .width(width)
            .height(height),
    )
    .map(Message::Overlay);

    Stack::new()
        .push(picture)
        .push(overlay)
        .width(width)
        .height(height)
        .into()
}

fn placeholder_text(status: &Status) -> String {
    match status {
        Status::NoImage => "Pass an image path on the command line to inspect it.".to_string(),
        Status::Loading(path) => format!("Loading {}…", path.display()),
        Status::Ready => String::new(),
        Status::Failed(reason) => format!("Could not open image: {reason}"),
    }
}

fn status_line(magnifier: &Magnifier) -> String {
    let settings = magnifier.settings();
    let state = if magnifier.is_enabled() { "on" } else { "off" };
    format!(
        "Magnifier {state} (M)   zoom {:.1}x (+/-, wheel)   radius {:.0}px   {} (S)",
        settings.zoom.value(),
        settings.radius.value(),
        settings.shape,
    )
}
