// SPDX-License-Identifier: MPL-2.0
//! Magnifier overlay widget.
//!
//! A [`Magnifier`] binds to a host-owned [`ViewSurface`] and, while a lens
//! session is running, produces a [`LensFrame`]: a magnified crop of the image
//! around the pointer plus where to draw it.
//!
//! Pointer and zoom changes only record state. The crop is rebuilt in
//! [`Magnifier::on_frame`], which the host calls once per display frame, so
//! bursts of pointer events cost one resample per frame at most.
//!
//! ```
//! use iced::{Point, Size};
//! use magnify_glass::magnifier::{LensSettings, Magnifier, ViewSurface};
//!
//! let surface = ViewSurface::new(Size::new(800.0, 600.0), 1.0).into_shared();
//! let mut magnifier = Magnifier::new(LensSettings::default());
//! magnifier.attach(&surface).unwrap();
//!
//! magnifier.activate(Point::new(400.0, 300.0));
//! assert!(magnifier.on_frame());
//! assert!(magnifier.lens().unwrap().content.is_pending());
//!
//! magnifier.deactivate();
//! assert!(magnifier.lens().is_none());
//! ```

pub mod geometry;
pub mod sampler;
pub mod state;
pub mod surface;

pub use geometry::LensAnchor;
pub use state::{LensContent, LensFrame, LensState};
pub use surface::{SharedSurface, ViewSurface};

use crate::config::{MagnifierConfig, DEFAULT_ZOOM_FACTOR};
use crate::domain::lens::{LensRadius, LensShape, ZoomFactor, ZoomRange, ZoomStep};
use crate::error::BindingError;
use iced::widget::image::Handle;
use iced::Point;
use std::sync::{Arc, RwLock, Weak};

/// Resolved lens options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensSettings {
    pub zoom_range: ZoomRange,
    pub zoom: ZoomFactor,
    pub zoom_step: ZoomStep,
    pub radius: LensRadius,
    pub shape: LensShape,
    pub enabled: bool,
}

impl Default for LensSettings {
    fn default() -> Self {
        Self {
            zoom_range: ZoomRange::default(),
            zoom: ZoomFactor::default(),
            zoom_step: ZoomStep::default(),
            radius: LensRadius::default(),
            shape: LensShape::default(),
            enabled: true,
        }
    }
}

impl From<&MagnifierConfig> for LensSettings {
    fn from(config: &MagnifierConfig) -> Self {
        let zoom_range = config.zoom_range();
        Self {
            zoom_range,
            zoom: zoom_range.clamp(config.zoom_factor.unwrap_or(DEFAULT_ZOOM_FACTOR)),
            zoom_step: config.zoom_step(),
            radius: config.lens_radius(),
            shape: config.shape.unwrap_or_default(),
            enabled: config.enabled_on_start.unwrap_or(true),
        }
    }
}

/// Zoom lens controller for one surface.
#[derive(Debug)]
pub struct Magnifier {
    settings: LensSettings,
    surface: Option<Weak<RwLock<ViewSurface>>>,
    state: Option<LensState>,
    lens: Option<LensFrame>,
    /// A state change is waiting for the next frame.
    redraw_scheduled: bool,
    /// The last frame had no pixels to sample.
    sample_pending: bool,
    render_count: u64,
}

impl Magnifier {
    #[must_use]
    pub fn new(settings: LensSettings) -> Self {
        Self {
            settings,
            surface: None,
            state: None,
            lens: None,
            redraw_scheduled: false,
            sample_pending: false,
            render_count: 0,
        }
    }

    /// Binds the magnifier to `surface`, ending any running session.
    ///
    /// Only a weak reference is kept. Fails while the surface has no usable
    /// size; the host may retry once layout is done.
    pub fn attach(&mut self, surface: &SharedSurface) -> Result<(), BindingError> {
        {
            let guard = surface.read().map_err(|_| BindingError::Unavailable)?;
            guard.validate()?;
        }

        self.deactivate();
        self.surface = Some(Arc::downgrade(surface));
        tracing::debug!("magnifier attached to surface");
        Ok(())
    }

    /// Drops the surface binding and any session.
    pub fn detach(&mut self) {
        self.deactivate();
        self.surface = None;
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Starts a lens session at `position`, or moves the running one.
    ///
    /// Ignored while disabled, unbound, or when `position` is off the surface.
    pub fn activate(&mut self, position: Point) {
        if !self.settings.enabled {
            return;
        }
        if self.state.is_some() {
            self.on_pointer_move(position);
            return;
        }
        if !self.surface_contains(position) {
            tracing::debug!(?position, "activation ignored outside surface");
            return;
        }

        self.state = Some(LensState {
            position,
            zoom: self.settings.zoom,
            radius: self.settings.radius,
        });
        self.redraw_scheduled = true;
        tracing::debug!(?position, "lens session started");
    }

    /// Tracks the pointer. Identical positions schedule nothing; leaving the
    /// surface ends the session.
    pub fn on_pointer_move(&mut self, position: Point) {
        let Some(current) = self.state.as_ref().map(|state| state.position) else {
            return;
        };
        if current == position {
            return;
        }
        if !self.surface_contains(position) {
            self.deactivate();
            return;
        }

        if let Some(state) = self.state.as_mut() {
            state.position = position;
        }
        self.redraw_scheduled = true;
    }

    /// Sets the zoom factor, clamped to the configured range. Non-finite
    /// values are ignored.
    pub fn set_zoom(&mut self, factor: f32) {
        if !factor.is_finite() {
            return;
        }
        self.apply_zoom(self.settings.zoom_range.clamp(factor));
    }

    /// Steps the zoom up by the configured increment.
    pub fn zoom_in(&mut self) {
        let zoom = self
            .settings
            .zoom
            .zoom_in(self.settings.zoom_step, self.settings.zoom_range);
        self.apply_zoom(zoom);
    }

    /// Steps the zoom down by the configured increment.
    pub fn zoom_out(&mut self) {
        let zoom = self
            .settings
            .zoom
            .zoom_out(self.settings.zoom_step, self.settings.zoom_range);
        self.apply_zoom(zoom);
    }

    fn apply_zoom(&mut self, zoom: ZoomFactor) {
        if self.settings.zoom == zoom {
            return;
        }
        self.settings.zoom = zoom;
        if let Some(state) = self.state.as_mut() {
            state.zoom = zoom;
            self.redraw_scheduled = true;
        }
    }

    /// Sets the lens radius, clamped to the valid range.
    pub fn set_radius(&mut self, pixels: f32) {
        let radius = LensRadius::new(pixels);
        if self.settings.radius == radius {
            return;
        }
        self.settings.radius = radius;
        if let Some(state) = self.state.as_mut() {
            state.radius = radius;
            self.redraw_scheduled = true;
        }
    }

    pub fn set_shape(&mut self, shape: LensShape) {
        if self.settings.shape == shape {
            return;
        }
        self.settings.shape = shape;
        if self.state.is_some() {
            self.redraw_scheduled = true;
        }
    }

    /// Enables or disables the feature. Disabling ends the session.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
        if !enabled {
            self.deactivate();
        }
        tracing::debug!(enabled, "magnifier toggled");
    }

    pub fn toggle(&mut self) {
        self.set_enabled(!self.settings.enabled);
    }

    /// Ends the session and removes the lens. Safe to call at any time.
    pub fn deactivate(&mut self) {
        if self.state.take().is_some() {
            tracing::debug!("lens session ended");
        }
        self.lens = None;
        self.redraw_scheduled = false;
        self.sample_pending = false;
    }

    /// Whether the host should keep delivering frame ticks.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.state.is_some() && (self.redraw_scheduled || self.sample_pending)
    }

    /// Frame tick. Rebuilds the lens when something changed or when the last
    /// sample was waiting for pixels. Returns whether a new frame was produced.
    pub fn on_frame(&mut self) -> bool {
        if !self.needs_frame() {
            return false;
        }

        let Some(surface) = self.surface.as_ref().and_then(Weak::upgrade) else {
            tracing::warn!("surface dropped during lens session");
            self.deactivate();
            return false;
        };

        // A poisoned lock stays poisoned, so the binding is unusable.
        let Ok(guard) = surface.read() else {
            self.drop_poisoned_surface();
            return false;
        };

        if !self.redraw_scheduled && !guard.is_loaded() {
            return false;
        }

        self.render(&guard);
        true
    }

    fn render(&mut self, surface: &ViewSurface) {
        let Some(state) = self.state.as_ref() else {
            return;
        };

        let scale = surface.scale();
        let nominal = geometry::sampling_rect(state.position, state.zoom, state.radius, scale);
        let sample = geometry::clamp_to_source(nominal, surface.source_size());
        let (viewport, anchor) =
            geometry::place_lens(state.position, state.radius, surface.display_size());

        let content = match surface.pixels() {
            Some(pixels) => {
                // Radius is clamped to a small positive range, so this fits in u32.
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let size = viewport.width.round() as u32;
                let bitmap = sampler::sample_lens(pixels, nominal, size, self.settings.shape);
                let handle = Handle::from_rgba(bitmap.width(), bitmap.height(), bitmap.as_raw().clone());
                LensContent::Pixels {
                    bitmap: Arc::new(bitmap),
                    handle,
                }
            }
            None => LensContent::Pending,
        };

        self.sample_pending = content.is_pending();
        self.redraw_scheduled = false;
        self.render_count += 1;
        self.lens = Some(LensFrame {
            viewport,
            anchor,
            shape: self.settings.shape,
            pointer: state.position,
            zoom: state.zoom,
            sample,
            content,
        });
    }

    fn surface_contains(&mut self, position: Point) -> bool {
        let Some(surface) = self.surface.as_ref().and_then(Weak::upgrade) else {
            return false;
        };
        let contains = match surface.read() {
            Ok(guard) => guard.contains(position),
            Err(_) => {
                self.drop_poisoned_surface();
                false
            }
        };
        contains
    }

    fn drop_poisoned_surface(&mut self) {
        tracing::warn!(
            error = %BindingError::Unavailable,
            "surface lock poisoned, detaching magnifier"
        );
        self.detach();
    }

    /// Current lens frame, `None` while no session runs.
    #[must_use]
    pub fn lens(&self) -> Option<&LensFrame> {
        self.lens.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> Option<&LensState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomFactor {
        self.settings.zoom
    }

    #[must_use]
    pub fn settings(&self) -> &LensSettings {
        &self.settings
    }

    /// Number of lens frames produced so far.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use iced::Size;
    use image_rs::{Rgba, RgbaImage};

    fn loaded_surface(width: u32, height: u32) -> SharedSurface {
        let pixels = Arc::new(RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255])));
        #[allow(clippy::cast_precision_loss)]
        let display = Size::new(width as f32, height as f32);
        ViewSurface::with_pixels(pixels, display).into_shared()
    }

    fn attached(surface: &SharedSurface) -> Magnifier {
        let mut magnifier = Magnifier::new(LensSettings::default());
        magnifier.attach(surface).expect("surface is ready");
        magnifier
    }

    #[test]
    fn attach_rejects_zero_sized_surface() {
        let surface = ViewSurface::new(Size::ZERO, 1.0).into_shared();
        let mut magnifier = Magnifier::new(LensSettings::default());
        assert!(matches!(
            magnifier.attach(&surface),
            Err(BindingError::ZeroSize { .. })
        ));
        assert!(!magnifier.is_attached());
    }

    #[test]
    fn attach_can_be_retried_after_layout() {
        let surface = ViewSurface::new(Size::ZERO, 1.0).into_shared();
        let mut magnifier = Magnifier::new(LensSettings::default());
        assert!(magnifier.attach(&surface).is_err());

        surface
            .write()
            .expect("lock")
            .set_display_size(Size::new(640.0, 480.0));
        // Source size was derived from a zero display size, so install pixels.
        surface
            .write()
            .expect("lock")
            .set_pixels(Arc::new(RgbaImage::new(640, 480)));
        assert!(magnifier.attach(&surface).is_ok());
        assert!(magnifier.is_attached());
    }

    #[test]
    fn activate_without_surface_is_ignored() {
        let mut magnifier = Magnifier::new(LensSettings::default());
        magnifier.activate(Point::new(10.0, 10.0));
        assert!(!magnifier.is_active());
    }

    #[test]
    fn activate_twice_moves_the_session() {
        let surface = loaded_surface(800, 600);
        let mut magnifier = attached(&surface);
        magnifier.activate(Point::new(100.0, 100.0));
        magnifier.activate(Point::new(200.0, 150.0));
        let state = magnifier.state().expect("active");
        assert_eq!(state.position, Point::new(200.0, 150.0));
    }

    #[test]
    fn repeated_pointer_position_does_no_render_work() {
        let surface = loaded_surface(800, 600);
        let mut magnifier = attached(&surface);
        magnifier.activate(Point::new(100.0, 100.0));
        assert!(magnifier.on_frame());
        assert_eq!(magnifier.render_count(), 1);

        magnifier.on_pointer_move(Point::new(100.0, 100.0));
        assert!(!magnifier.needs_frame());
        assert!(!magnifier.on_frame());
        assert_eq!(magnifier.render_count(), 1);

        magnifier.on_pointer_move(Point::new(101.0, 100.0));
        assert!(magnifier.on_frame());
        assert_eq!(magnifier.render_count(), 2);
    }

    #[test]
    fn pointer_bursts_render_once_per_frame() {
        let surface = loaded_surface(800, 600);
        let mut magnifier = attached(&surface);
        magnifier.activate(Point::new(100.0, 100.0));
        for step in 0..10u8 {
            magnifier.on_pointer_move(Point::new(100.0 + f32::from(step), 120.0));
        }
        assert!(magnifier.on_frame());
        assert_eq!(magnifier.render_count(), 1);
        assert_eq!(
            magnifier.lens().expect("lens").pointer,
            Point::new(109.0, 120.0)
        );
    }

    fn poison(surface: &SharedSurface) {
        let writer = Arc::clone(surface);
        let _ = std::thread::spawn(move || {
            let _guard = writer.write().expect("lock");
            panic!("host panicked while updating the surface");
        })
        .join();
        assert!(surface.is_poisoned());
    }

    #[test]
    fn poisoned_surface_ends_session_and_stops_frames() {
        let surface = loaded_surface(800, 600);
        let mut magnifier = attached(&surface);
        magnifier.activate(Point::new(100.0, 100.0));
        poison(&surface);

        for _ in 0..100 {
            assert!(!magnifier.on_frame());
        }
        assert_eq!(magnifier.render_count(), 0);
        assert!(!magnifier.needs_frame());
        assert!(!magnifier.is_active());
        assert!(!magnifier.is_attached());
    }

    #[test]
    fn poisoned_surface_detaches_on_pointer_activity() {
        let surface = loaded_surface(800, 600);
        let mut magnifier = attached(&surface);
        poison(&surface);

        magnifier.activate(Point::new(100.0, 100.0));
        assert!(!magnifier.is_active());
        assert!(!magnifier.is_attached());
        assert!(matches!(
            magnifier.attach(&surface),
            Err(BindingError::Unavailable)
        ));
    }

    #[test]
    fn leaving_the_surface_ends_the_session() {
        let surface = loaded_surface(800, 600);
        let mut magnifier = attached(&surface);
        magnifier.activate(Point::new(100.0, 100.0));
        magnifier.on_frame();
        magnifier.on_pointer_move(Point::new(900.0, 100.0));
        assert!(!magnifier.is_active());
        assert!(magnifier.lens().is_none());
    }

    #[test]
    fn set_zoom_clamps_and_redraws() {
        let surface = loaded_surface(800, 600);
        let mut magnifier = attached(&surface);
        magnifier.activate(Point::new(400.0, 300.0));
        magnifier.on_frame();

        magnifier.set_zoom(20.0);
        assert_abs_diff_eq!(magnifier.zoom().value(), 8.0);
        assert!(magnifier.needs_frame());
        magnifier.on_frame();
        assert_abs_diff_eq!(magnifier.lens().expect("lens").zoom.value(), 8.0);

        magnifier.set_zoom(f32::NAN);
        assert_abs_diff_eq!(magnifier.zoom().value(), 8.0);
    }

    #[test]
    fn zoom_steps_use_configured_increment() {
        let mut magnifier = Magnifier::new(LensSettings::default());
        magnifier.zoom_in();
        assert_abs_diff_eq!(magnifier.zoom().value(), 2.5);
        magnifier.zoom_out();
        magnifier.zoom_out();
        assert_abs_diff_eq!(magnifier.zoom().value(), 1.5);
        magnifier.zoom_out();
        assert_abs_diff_eq!(magnifier.zoom().value(), 1.5);
    }

    #[test]
    fn zoom_persists_across_sessions() {
        let surface = loaded_surface(800, 600);
        let mut magnifier = attached(&surface);
        magnifier.set_zoom(4.0);
        magnifier.activate(Point::new(10.0, 10.0));
        assert_abs_diff_eq!(magnifier.state().expect("active").zoom.value(), 4.0);
    }

    #[test]
    fn disabled_magnifier_ignores_activation() {
        let surface = loaded_surface(800, 600);
        let mut magnifier = attached(&surface);
        magnifier.activate(Point::new(10.0, 10.0));
        magnifier.toggle();
        assert!(!magnifier.is_active());

        magnifier.activate(Point::new(10.0, 10.0));
        assert!(!magnifier.is_active());

        magnifier.toggle();
        magnifier.activate(Point::new(10.0, 10.0));
        assert!(magnifier.is_active());
    }

    #[test]
    fn deactivate_is_safe_at_any_time() {
        let surface = loaded_surface(800, 600);
        let mut magnifier = attached(&surface);
        magnifier.deactivate();
        magnifier.activate(Point::new(10.0, 10.0));
        // Scheduled but not yet rendered.
        magnifier.deactivate();
        magnifier.deactivate();
        assert!(!magnifier.needs_frame());
        assert!(!magnifier.on_frame());
        assert!(magnifier.lens().is_none());
    }

    #[test]
    fn shape_change_rerenders_active_lens() {
        let surface = loaded_surface(800, 600);
        let mut magnifier = attached(&surface);
        magnifier.activate(Point::new(400.0, 300.0));
        magnifier.on_frame();
        magnifier.set_shape(LensShape::Square);
        assert!(magnifier.on_frame());
        assert_eq!(magnifier.lens().expect("lens").shape, LensShape::Square);
    }

    #[test]
    fn radius_change_resizes_lens() {
        let surface = loaded_surface(800, 600);
        let mut magnifier = attached(&surface);
        magnifier.activate(Point::new(400.0, 300.0));
        magnifier.set_radius(50.0);
        magnifier.on_frame();
        let lens = magnifier.lens().expect("lens");
        assert_abs_diff_eq!(lens.viewport.width, 100.0);
        match &lens.content {
            LensContent::Pixels { bitmap, .. } => assert_eq!(bitmap.width(), 100),
            LensContent::Pending => panic!("surface is loaded"),
        }
    }

    #[test]
    fn settings_from_config_clamp_values() {
        let config = MagnifierConfig {
            zoom_factor: Some(50.0),
            lens_radius: Some(0.0),
            ..MagnifierConfig::default()
        };
        let settings = LensSettings::from(&config);
        assert_abs_diff_eq!(settings.zoom.value(), 8.0);
        assert!(settings.radius.value() > 0.0);
    }
}
