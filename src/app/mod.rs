// SPDX-License-Identifier: MPL-2.0
//! Demo host application.
//!
//! The `App` owns the displayed image and its [`ViewSurface`], feeds pointer
//! events from the overlay canvas into the [`Magnifier`] and delivers frame
//! ticks while the lens has work queued.

mod message;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, WINDOW_DEFAULT_HEIGHT, WINDOW_DEFAULT_WIDTH};
use crate::domain::lens::LensShape;
use crate::magnifier::{LensSettings, Magnifier, SharedSurface, ViewSurface};
use crate::media::{self, ImageData};
use crate::ui::overlay;
use iced::keyboard::Key;
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

/// Height reserved below the image for the status line.
pub const STATUS_BAR_HEIGHT: f32 = 32.0;

/// Loading progress of the startup image.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    NoImage,
    Loading(PathBuf),
    Ready,
    Failed(String),
}

/// Root Iced application state.
pub struct App {
    magnifier: Magnifier,
    surface: Option<SharedSurface>,
    image: Option<ImageData>,
    image_path: Option<PathBuf>,
    window_size: Size,
    status: Status,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("status", &self.status)
            .field("lens_active", &self.magnifier.is_active())
            .finish()
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            magnifier: Magnifier::new(LensSettings::default()),
            surface: None,
            image: None,
            image_path: None,
            window_size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            status: Status::NoImage,
        }
    }
}

/// Largest size showing `source` inside `available` without upscaling.
#[must_use]
pub fn fit_display_size(source: Size, available: Size) -> Size {
    if source.width <= 0.0 || source.height <= 0.0 {
        return Size::ZERO;
    }
    let scale = (available.width / source.width)
        .min(available.height / source.height)
        .min(1.0);
    if !scale.is_finite() || scale <= 0.0 {
        return Size::ZERO;
    }
    Size::new(source.width * scale, source.height * scale)
}

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a Fn boot closure; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds the state from config and flags and starts decoding the image.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        if let Some(warning) = config_warning {
            tracing::warn!("{warning}; using default settings");
        }

        let mut app = Self {
            magnifier: Magnifier::new(LensSettings::from(&config.magnifier)),
            ..Self::default()
        };
        app.apply_flags(&flags);

        tracing::info!(settings = ?app.magnifier.settings(), "magnifier initialized");

        let task = match flags.file_path {
            Some(path) => {
                let path = PathBuf::from(path);
                app.image_path = Some(path.clone());
                app.status = Status::Loading(path.clone());
                Task::perform(media::load_image_async(path), Message::ImageLoaded)
            }
            None => Task::none(),
        };

        (app, task)
    }

    fn apply_flags(&mut self, flags: &Flags) {
        if let Some(zoom) = flags.zoom {
            self.magnifier.set_zoom(zoom);
        }
        if let Some(radius) = flags.radius {
            self.magnifier.set_radius(radius);
        }
        if let Some(shape) = flags.shape {
            self.magnifier.set_shape(shape);
        }
    }

    fn title(&self) -> String {
        match self.image_path.as_ref().and_then(|path| path.file_name()) {
            Some(name) => format!("{} - Magnify Glass", name.to_string_lossy()),
            None => "Magnify Glass".to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_frame_subscription(&self.magnifier),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ImageLoaded(Ok(image)) => self.on_image_loaded(image),
            Message::ImageLoaded(Err(err)) => {
                tracing::warn!(%err, "failed to load image");
                self.status = Status::Failed(err.to_string());
            }
            Message::Overlay(event) => self.on_overlay_event(event),
            Message::Frame(_) => {
                self.magnifier.on_frame();
            }
            Message::WindowResized(size) => self.on_window_resized(size),
            Message::KeyPressed(key) => self.on_key_pressed(&key),
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            image: self.image.as_ref(),
            display_size: self.display_size(),
            magnifier: &self.magnifier,
            status: &self.status,
        })
    }

    fn available_size(&self) -> Size {
        Size::new(
            self.window_size.width,
            (self.window_size.height - STATUS_BAR_HEIGHT).max(0.0),
        )
    }

    #[allow(clippy::cast_precision_loss)]
    fn display_size(&self) -> Size {
        match &self.image {
            Some(image) => fit_display_size(
                Size::new(image.width() as f32, image.height() as f32),
                self.available_size(),
            ),
            None => Size::ZERO,
        }
    }

    fn on_image_loaded(&mut self, image: ImageData) {
        tracing::info!(width = image.width(), height = image.height(), "image loaded");
        let pixels = image.pixels.clone();
        self.image = Some(image);
        let surface = ViewSurface::with_pixels(pixels, self.display_size()).into_shared();
        self.status = Status::Ready;
        self.bind_surface(&surface);
        self.surface = Some(surface);
    }

    fn bind_surface(&mut self, surface: &SharedSurface) {
        if let Err(err) = self.magnifier.attach(surface) {
            // Retried on the next resize.
            tracing::warn!(%err, "magnifier could not attach to surface");
        }
    }

    fn on_window_resized(&mut self, size: Size) {
        self.window_size = size;
        let display = self.display_size();
        let Some(surface) = self.surface.clone() else {
            return;
        };

        match surface.write() {
            Ok(mut guard) => guard.set_display_size(display),
            Err(_) => {
                tracing::warn!("surface lock poisoned, dropping magnifier binding");
                self.magnifier.detach();
                return;
            }
        }

        if self.magnifier.is_attached() {
            // Pointer coordinates from before the resize no longer match.
            self.magnifier.deactivate();
        } else {
            self.bind_surface(&surface);
        }
    }

    fn on_overlay_event(&mut self, event: overlay::Message) {
        match event {
            overlay::Message::PointerMoved(position) => {
                if self.magnifier.is_active() {
                    self.magnifier.on_pointer_move(position);
                } else {
                    self.magnifier.activate(position);
                }
            }
            overlay::Message::PointerLeft => self.magnifier.deactivate(),
            overlay::Message::Wheel(lines) => {
                if !self.magnifier.is_active() {
                    return;
                }
                if lines > 0.0 {
                    self.magnifier.zoom_in();
                } else if lines < 0.0 {
                    self.magnifier.zoom_out();
                }
            }
        }
    }

    fn on_key_pressed(&mut self, key: &Key) {
        let Key::Character(c) = key else {
            return;
        };
        match c.as_str() {
            "m" | "M" => self.magnifier.toggle(),
            "+" | "=" => self.magnifier.zoom_in(),
            "-" => self.magnifier.zoom_out(),
            "s" | "S" => {
                let shape = match self.magnifier.settings().shape {
                    LensShape::Circle => LensShape::Square,
                    LensShape::Square => LensShape::Circle,
                };
                self.magnifier.set_shape(shape);
            }
            _ => {}
        }
    }
}
