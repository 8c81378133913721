// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use inscribe_gesture::GestureFlags;
use inscribe_layer::geometry::is_finite_point;
use inscribe_layer::{DropShadow, LayerId, LayerStack, TextLayer, TextMeasurer, Typeface};
use kurbo::{Point, Rect, Vec2};
use peniko::Color;

use crate::clamp::{ClampMode, clamp_layer, has_area, local_enclosing_rect, normalized_position};
use crate::config::{ConfigError, OverlayConfig, Placement};
use crate::controller::{
    GestureFusionController, GestureOutcome, GestureSettings, GestureTarget, PointerEvent,
};

/// Callback receiving the normalized position of the active layer.
pub type TextMovedHandler = Box<dyn FnMut(Point)>;

/// Exported state of one layer.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSnapshot {
    /// Layer id.
    pub id: LayerId,
    /// Source text, if any.
    pub text: Option<String>,
    /// Normalized top-left of the enclosing rectangle, when known.
    pub position: Option<Point>,
    /// Scale relative to the base size.
    pub scale: f64,
    /// Accumulated rotation in degrees.
    pub rotation_deg: f64,
    /// Effective font size in pixels.
    pub effective_size: f64,
}

/// A stack of text layers over an image, driven by pointer gestures.
///
/// The overlay owns the layers, the gesture controller and the clamp
/// policy. The host pushes the current image rectangle with
/// [`TextOverlay::set_image_rect`], forwards pointer events to
/// [`TextOverlay::handle_pointer`], and draws from [`TextOverlay::layers`].
///
/// Every operation on the active layer is a no-op on an empty stack.
pub struct TextOverlay<M, P = u64> {
    config: OverlayConfig,
    measurer: M,
    stack: LayerStack,
    image_rect: Rect,
    controller: GestureFusionController<P>,
    on_text_moved: Option<TextMovedHandler>,
    // Layers added before the image had an area, with their provisional position.
    unplaced: Vec<(LayerId, Point)>,
}

impl<M: fmt::Debug, P: fmt::Debug> fmt::Debug for TextOverlay<M, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextOverlay")
            .field("config", &self.config)
            .field("measurer", &self.measurer)
            .field("stack", &self.stack)
            .field("image_rect", &self.image_rect)
            .field("controller", &self.controller)
            .field("on_text_moved", &self.on_text_moved.is_some())
            .field("unplaced", &self.unplaced)
            .finish()
    }
}

impl<M: TextMeasurer, P: Copy + PartialEq> TextOverlay<M, P> {
    /// Creates an overlay from a validated configuration.
    ///
    /// If the configuration carries initial text, a first layer is added.
    pub fn new(config: OverlayConfig, measurer: M) -> Result<Self, ConfigError> {
        config.validate()?;
        let settings = GestureSettings {
            flags: config.gestures,
            tap: config.tap(),
            select_on_touch: config.select_on_touch,
            delete_zone: config.delete_zone,
        };
        let initial = config.initial_text.clone();
        let mut overlay = Self {
            config,
            measurer,
            stack: LayerStack::new(),
            image_rect: Rect::ZERO,
            controller: GestureFusionController::new(settings),
            on_text_moved: None,
            unplaced: Vec::new(),
        };
        if let Some(text) = initial {
            overlay.add_text(&text);
        }
        Ok(overlay)
    }

    /// The current configuration, including style changes made since creation.
    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// The text measurer.
    #[must_use]
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// All layers, bottom to top.
    #[must_use]
    pub fn layers(&self) -> &LayerStack {
        &self.stack
    }

    /// The image rectangle last set, in view coordinates.
    #[must_use]
    pub fn image_rect(&self) -> Rect {
        self.image_rect
    }

    /// Updates the image rectangle and re-clamps the active layer.
    ///
    /// Layers added while the image had no area are placed now, unless they
    /// were moved or rotated in the meantime.
    pub fn set_image_rect(&mut self, rect: Rect) {
        if rect == self.image_rect {
            return;
        }
        self.image_rect = rect;
        if has_area(rect) {
            for (id, provisional) in core::mem::take(&mut self.unplaced) {
                let Some(layer) = self.stack.find_mut(id) else {
                    continue;
                };
                if layer.position() == provisional && layer.rotation_degrees() == 0.0 {
                    place(layer, self.config.placement, rect);
                }
            }
        }
        self.reclamp();
    }

    /// Registers (or clears) the position-changed callback.
    pub fn set_on_text_moved(&mut self, handler: Option<TextMovedHandler>) {
        self.on_text_moved = handler;
    }

    /// Clamps the active layer and notifies the callback with its
    /// normalized position when that position is finite.
    pub fn reclamp(&mut self) -> Option<Point> {
        let layer = self.stack.active_mut()?;
        let position = clamp_layer(layer, self.image_rect, self.config.clamp_mode);
        self.notify(position);
        position
    }

    /// Replaces every layer with a single one holding `text`.
    ///
    /// `None` leaves the stack empty.
    pub fn set_text(&mut self, text: Option<&str>) -> Option<LayerId> {
        self.stack.clear();
        self.unplaced.clear();
        text.map(|t| self.add_text(t))
    }

    /// Pushes a new layer with `text` on top, making it active.
    pub fn add_text(&mut self, text: &str) -> LayerId {
        let mut layer = TextLayer::new(
            self.config.style(),
            self.config.limits(),
            self.config.interline_gap,
        );
        layer.set_text(Some(text), &self.measurer);
        let placed = place(&mut layer, self.config.placement, self.image_rect);
        let provisional = layer.position();
        let id = self.stack.push(layer);
        if !placed {
            self.unplaced.push((id, provisional));
        }
        self.reclamp();
        id
    }

    /// Removes the active layer, revealing the one below.
    ///
    /// The newly active layer is clamped and its position reported.
    pub fn remove_text(&mut self) -> Option<LayerId> {
        let (id, _) = self.stack.pop()?;
        self.unplaced.retain(|(i, _)| *i != id);
        self.reclamp();
        Some(id)
    }

    /// Replaces the active layer's text, keeping its transform.
    pub fn change_text(&mut self, text: Option<&str>) {
        if let Some(layer) = self.stack.active_mut() {
            layer.set_text(text, &self.measurer);
            self.reclamp();
        }
    }

    /// Sets the typeface of the active layer and of layers added later.
    pub fn set_typeface(&mut self, typeface: Option<Typeface>) {
        self.config.typeface = typeface;
        if let Some(layer) = self.stack.active_mut() {
            layer.set_typeface(typeface, &self.measurer);
            self.reclamp();
        }
    }

    /// Sets the color of the active layer and of layers added later.
    pub fn set_text_color(&mut self, color: Color) {
        self.config.text_color = color;
        if let Some(layer) = self.stack.active_mut() {
            layer.set_text_color(color);
        }
    }

    /// Sets the base size of the active layer and of layers added later.
    ///
    /// Invalid sizes are ignored.
    pub fn set_text_size(&mut self, size: f64) {
        if !(size.is_finite() && size > 0.0) {
            tracing::warn!(size, "ignoring invalid text size");
            return;
        }
        self.config.text_size = size;
        if let Some(layer) = self.stack.active_mut() {
            layer.set_text_size(size, &self.measurer);
            self.reclamp();
        }
    }

    /// Sets or clears the active layer's drop shadow.
    pub fn set_drop_shadow(&mut self, shadow: Option<DropShadow>) {
        if let Some(layer) = self.stack.active_mut() {
            layer.set_drop_shadow(shadow);
        }
    }

    /// Enables or disables panning.
    pub fn set_pan_enabled(&mut self, enabled: bool) {
        self.set_gesture(GestureFlags::PAN, enabled);
    }

    /// Enables or disables pinch scaling.
    pub fn set_scale_enabled(&mut self, enabled: bool) {
        self.set_gesture(GestureFlags::SCALE, enabled);
    }

    /// Enables or disables two-finger rotation.
    pub fn set_rotation_enabled(&mut self, enabled: bool) {
        self.set_gesture(GestureFlags::ROTATE, enabled);
    }

    fn set_gesture(&mut self, flag: GestureFlags, enabled: bool) {
        self.config.gestures.set(flag, enabled);
        self.controller.set_flags(self.config.gestures);
    }

    /// The clamp policy.
    #[must_use]
    pub fn clamp_mode(&self) -> ClampMode {
        self.config.clamp_mode
    }

    /// Changes the clamp policy and applies it straight away.
    pub fn set_clamp_mode(&mut self, mode: ClampMode) {
        self.config.clamp_mode = mode;
        self.reclamp();
    }

    /// Moves the active layer so its enclosing rectangle's top-left corner
    /// sits at `normalized` (fractions of the image size), then clamps.
    ///
    /// Ignored until the image rectangle has an area.
    pub fn set_position(&mut self, normalized: Point) {
        if !is_finite_point(normalized) {
            tracing::warn!(x = normalized.x, y = normalized.y, "ignoring invalid position");
            return;
        }
        let (w, h) = (self.image_rect.width(), self.image_rect.height());
        if !(w > 0.0 && h > 0.0) {
            return;
        }
        let Some(layer) = self.stack.active_mut() else {
            return;
        };
        let Some(current) = local_enclosing_rect(layer, self.image_rect) else {
            return;
        };
        let target = Point::new(normalized.x * w, normalized.y * h);
        layer.translate_enclosing_by(target - current.origin());
        self.reclamp();
    }

    /// Sets the active layer's scale directly, clamped into its size limits.
    pub fn set_scale_factor(&mut self, scale: f64) {
        if let Some(layer) = self.stack.active_mut() {
            layer.set_scale(scale, &self.measurer);
            self.reclamp();
        }
    }

    /// Sets the active layer's absolute rotation about its current pivot.
    pub fn set_rotation_degrees(&mut self, degrees: f64) {
        if let Some(layer) = self.stack.active_mut() {
            layer.set_rotation_degrees(degrees);
            self.reclamp();
        }
    }

    /// Normalized position of the active layer.
    ///
    /// `None` on an empty stack, for an empty layer, or before the image
    /// rectangle has an area.
    #[must_use]
    pub fn text_position(&self) -> Option<Point> {
        normalized_position(self.stack.active()?, self.image_rect)
    }

    /// Effective font size of the active layer relative to the image height.
    #[must_use]
    pub fn text_relative_size(&self) -> Option<f64> {
        let size = self.stack.active()?.effective_size() / self.image_rect.height();
        size.is_finite().then_some(size)
    }

    /// Returns `true` while the active layer is dragged over the delete zone.
    #[must_use]
    pub fn active_over_delete_zone(&self) -> bool {
        self.controller.active_over_delete_zone(&self.stack, self.image_rect)
    }

    /// Exports every layer, bottom to top.
    #[must_use]
    pub fn snapshots(&self) -> Vec<TextSnapshot> {
        self.stack
            .iter()
            .map(|(id, layer)| TextSnapshot {
                id,
                text: layer.text().map(String::from),
                position: normalized_position(layer, self.image_rect),
                scale: layer.scale(),
                rotation_deg: layer.rotation_degrees(),
                effective_size: layer.effective_size(),
            })
            .collect()
    }

    /// Feeds one pointer event through the built-in gesture detectors.
    ///
    /// Every event is consumed. The callback fires when the active layer moved.
    pub fn handle_pointer(&mut self, event: PointerEvent<'_, P>) -> GestureOutcome {
        let mut target = GestureTarget {
            stack: &mut self.stack,
            measurer: &self.measurer,
            image_rect: self.image_rect,
            clamp_mode: self.config.clamp_mode,
        };
        let outcome = self.controller.handle(&mut target, event);
        self.notify(outcome.moved);
        if outcome.removed.is_some() {
            self.unplaced.retain(|(i, _)| Some(*i) != outcome.removed);
            self.reclamp();
        }
        outcome
    }

    /// Start of a pinch reported by a host-side detector.
    pub fn on_scale_begin(&mut self) -> bool {
        self.controller.on_scale_begin()
    }

    /// Pinch update from a host-side detector.
    pub fn on_scale_update(&mut self, factor: f64) -> bool {
        let mut target = GestureTarget {
            stack: &mut self.stack,
            measurer: &self.measurer,
            image_rect: self.image_rect,
            clamp_mode: self.config.clamp_mode,
        };
        let moved = self.controller.on_scale_update(&mut target, factor);
        self.notify(moved);
        true
    }

    /// End of a pinch reported by a host-side detector.
    pub fn on_scale_end(&mut self) {
        self.controller.on_scale_end();
    }

    /// Start of a rotation reported by a host-side detector.
    pub fn on_rotation_begin(&mut self) -> bool {
        self.controller.on_rotation_begin()
    }

    /// Rotation update from a host-side detector, as a cumulative angle.
    pub fn on_rotation_update(&mut self, cumulative_deg: f64) -> bool {
        let mut target = GestureTarget {
            stack: &mut self.stack,
            measurer: &self.measurer,
            image_rect: self.image_rect,
            clamp_mode: self.config.clamp_mode,
        };
        self.controller.on_rotation_update(&mut target, cumulative_deg);
        true
    }

    /// End of a rotation reported by a host-side detector.
    pub fn on_rotation_end(&mut self) {
        self.controller.on_rotation_end();
    }

    fn notify(&mut self, position: Option<Point>) {
        if let (Some(p), Some(handler)) = (position, self.on_text_moved.as_mut()) {
            handler(p);
        }
    }
}

// Puts a new layer at `placement`, pivoting about the center of its block.
// Without an image area the layer goes to the origin and `false` is returned.
fn place(layer: &mut TextLayer, placement: Placement, image_rect: Rect) -> bool {
    let placed = has_area(image_rect);
    let block = layer.block_size();
    let position = match placement {
        Placement::Centered if placed => Point::new(
            (image_rect.width() - block.width) / 2.0,
            (image_rect.height() - block.height) / 2.0,
        ),
        _ => Point::ZERO,
    };
    layer.set_position(position);
    let center = position + Vec2::new(block.width / 2.0, block.height / 2.0);
    layer.set_pivot(center + image_rect.origin().to_vec2());
    placed
}
