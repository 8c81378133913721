// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fusing pan, pinch and rotation into one transform update per event.
//!
//! ## Event flow
//!
//! For each pointer event the controller updates the pointer set and the
//! focal point, feeds the pinch and rotation detectors, and then applies,
//! in order, to the active layer:
//!
//! 1) the scale factor,
//! 2) the rotation delta, pivoting about the focal point as it was before
//!    this event,
//! 3) the focal point's movement as a pan, which carries the pivot along.
//!
//! After all three, the layer is clamped once. Both detectors therefore see
//! the same layer state for a given event, and a single position
//! notification comes out.

use inscribe_gesture::GestureFlags;
use inscribe_gesture::focal::FocalDrag;
use inscribe_gesture::pointers::PointerSet;
use inscribe_gesture::rotation::{RotationDetector, RotationSignal};
use inscribe_gesture::scale::{ScaleDetector, ScaleSignal};
use inscribe_gesture::tap::{TapConfig, TapState};
use inscribe_layer::{LayerId, LayerStack, TextMeasurer};
use kurbo::{Point, Rect};

use crate::clamp::{ClampMode, reclamp};

/// A pointer event as delivered by the host.
#[derive(Clone, Copy, Debug)]
pub enum PointerEvent<'a, P> {
    /// A pointer touched down.
    Down {
        /// Host pointer id.
        id: P,
        /// Position in view coordinates.
        position: Point,
        /// Event time in milliseconds.
        time_ms: u64,
    },
    /// One or more pointers moved within a single host event.
    Move {
        /// Updated positions; pointers not listed keep their last position.
        pointers: &'a [(P, Point)],
        /// Event time in milliseconds.
        time_ms: u64,
    },
    /// A pointer lifted.
    Up {
        /// Host pointer id.
        id: P,
        /// Final position in view coordinates.
        position: Point,
        /// Event time in milliseconds.
        time_ms: u64,
    },
    /// The host aborted the touch sequence.
    Cancel,
}

/// What a single event did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureOutcome {
    /// The active layer changed and should be redrawn.
    pub changed: bool,
    /// Normalized position after clamping, when it is finite.
    pub moved: Option<Point>,
    /// The active layer was tapped.
    pub tapped: Option<LayerId>,
    /// The active layer was dropped on the delete zone and removed.
    pub removed: Option<LayerId>,
}

/// Everything a gesture needs to act on.
#[derive(Debug)]
pub struct GestureTarget<'a, M: ?Sized> {
    /// Layers; only the active one is touched.
    pub stack: &'a mut LayerStack,
    /// Measurer for re-measuring after scaling.
    pub measurer: &'a M,
    /// Current image rectangle in view coordinates.
    pub image_rect: Rect,
    /// Clamp policy.
    pub clamp_mode: ClampMode,
}

/// Per touch-sequence state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    /// Centroid of the pointers currently down.
    pub focal_point: Point,
    /// Last cumulative rotation angle seen in this sequence.
    ///
    /// `None` until the first rotation update of a sequence, which only
    /// re-bases: rotation sources report cumulative angles, and taking the
    /// difference against a stale value from an earlier sequence would jump.
    pub previous_rotation_deg: Option<f64>,
}

/// Behaviour switches for a [`GestureFusionController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSettings {
    /// Gestures applied to the active layer.
    pub flags: GestureFlags,
    /// Tap tolerances.
    pub tap: TapConfig,
    /// Raise the touched layer when a sequence starts.
    pub select_on_touch: bool,
    /// Drop target that removes the active layer after a pan.
    pub delete_zone: Option<Rect>,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            flags: GestureFlags::empty(),
            tap: TapConfig::default(),
            select_on_touch: false,
            delete_zone: None,
        }
    }
}

/// Turns a pointer stream into pan, scale and rotation of the active layer.
///
/// `P` is the host's pointer id type.
#[derive(Clone, Debug)]
pub struct GestureFusionController<P> {
    settings: GestureSettings,
    pointers: PointerSet<P>,
    focal: FocalDrag,
    scale: ScaleDetector,
    rotation: RotationDetector,
    tap: TapState,
    state: GestureState,
    panned: bool,
}

impl<P: Copy + PartialEq> GestureFusionController<P> {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            pointers: PointerSet::new(),
            focal: FocalDrag::default(),
            scale: ScaleDetector::default(),
            rotation: RotationDetector::new(),
            tap: TapState::new(settings.tap),
            state: GestureState::default(),
            panned: false,
        }
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    /// Enables or disables gestures.
    pub fn set_flags(&mut self, flags: GestureFlags) {
        self.settings.flags = flags;
    }

    /// Sets or clears the delete zone.
    pub fn set_delete_zone(&mut self, zone: Option<Rect>) {
        self.settings.delete_zone = zone;
    }

    /// Per-sequence state.
    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Number of pointers down.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Returns `true` if the active layer has been panned in the current
    /// sequence and now overlaps the delete zone.
    #[must_use]
    pub fn active_over_delete_zone(&self, stack: &LayerStack, image_rect: Rect) -> bool {
        self.panned && over_zone(stack, image_rect, self.settings.delete_zone)
    }

    /// Dispatches one pointer event.
    ///
    /// Every event is consumed; the outcome says what changed.
    pub fn handle<M: TextMeasurer + ?Sized>(
        &mut self,
        target: &mut GestureTarget<'_, M>,
        event: PointerEvent<'_, P>,
    ) -> GestureOutcome {
        match event {
            PointerEvent::Down {
                id,
                position,
                time_ms,
            } => {
                self.on_pointer_down(target, id, position, time_ms);
                GestureOutcome::default()
            }
            PointerEvent::Move { pointers, .. } => self.on_pointer_move(target, pointers),
            PointerEvent::Up {
                id,
                position,
                time_ms,
            } => self.on_pointer_up(target, id, position, time_ms),
            PointerEvent::Cancel => {
                self.cancel();
                GestureOutcome::default()
            }
        }
    }

    /// A pointer went down: re-derive the focal point and re-base detectors.
    pub fn on_pointer_down<M: TextMeasurer + ?Sized>(
        &mut self,
        target: &mut GestureTarget<'_, M>,
        id: P,
        position: Point,
        time_ms: u64,
    ) -> bool {
        if self.pointers.is_empty() {
            tracing::debug!("touch sequence started");
            if self.settings.select_on_touch {
                raise_touched(target.stack, position, target.image_rect);
            }
        }
        self.pointers.down(id, position);
        self.tap.on_down(position, self.pointers.len(), time_ms);
        self.pointers_changed();
        true
    }

    /// Pointers moved: apply scale, rotation and pan, then clamp once.
    pub fn on_pointer_move<M: TextMeasurer + ?Sized>(
        &mut self,
        target: &mut GestureTarget<'_, M>,
        moves: &[(P, Point)],
    ) -> GestureOutcome {
        for (id, pos) in moves {
            self.pointers.update(id, *pos);
        }
        if let Some(first) = self.pointers.positions().next() {
            self.tap.on_move(first);
        }
        let Some(focal) = self.pointers.centroid() else {
            return GestureOutcome::default();
        };

        let mut changed = false;
        if let Some(ScaleSignal::Update(factor)) = self.scale.pointers_moved(&self.pointers) {
            changed |= self.apply_scale(target, factor);
        }
        let was_rotating = self.rotation.is_active();
        let rotation = self.rotation.pointers_moved(&self.pointers);
        if !was_rotating && self.rotation.is_active() {
            // A pair that landed on one spot just separated.
            self.state.previous_rotation_deg = Some(0.0);
        }
        if let Some(RotationSignal::Update(angle)) = rotation {
            changed |= self.apply_rotation(target, angle);
        }
        let delta = self.focal.update(focal);
        self.state.focal_point = focal;
        if let Some(delta) = delta {
            if self.settings.flags.contains(GestureFlags::PAN) {
                if let Some(layer) = target.stack.active_mut() {
                    tracing::trace!(dx = delta.x, dy = delta.y, "pan");
                    layer.apply_pan(delta.x, delta.y);
                    self.panned = true;
                    changed = true;
                }
            }
        }

        let moved = if changed {
            reclamp(target.stack, target.image_rect, target.clamp_mode)
        } else {
            None
        };
        GestureOutcome {
            changed,
            moved,
            ..GestureOutcome::default()
        }
    }

    /// A pointer lifted. Lifting the last one ends the sequence, which may
    /// report a tap or drop the active layer on the delete zone.
    pub fn on_pointer_up<M: TextMeasurer + ?Sized>(
        &mut self,
        target: &mut GestureTarget<'_, M>,
        id: P,
        position: Point,
        time_ms: u64,
    ) -> GestureOutcome {
        self.pointers.update(&id, position);
        self.pointers.up(&id);
        self.pointers_changed();
        if !self.pointers.is_empty() {
            return GestureOutcome::default();
        }

        let mut outcome = GestureOutcome::default();
        if let Some(at) = self.tap.on_up(position, time_ms) {
            let hit = target
                .stack
                .active()
                .is_some_and(|l| l.contains_point(at, target.image_rect));
            if hit {
                outcome.tapped = target.stack.active_id();
            }
        }
        if self.active_over_delete_zone(target.stack, target.image_rect) {
            if let Some((id, _)) = target.stack.pop() {
                tracing::debug!(id = id.get(), "layer dropped on delete zone");
                outcome.removed = Some(id);
                outcome.changed = true;
            }
        }
        self.end_sequence();
        outcome
    }

    /// Aborts the current sequence without tap or delete handling.
    pub fn cancel(&mut self) {
        self.pointers.clear();
        self.tap.cancel();
        self.end_sequence();
    }

    /// Start of an externally detected pinch. Always accepted.
    pub fn on_scale_begin(&mut self) -> bool {
        true
    }

    /// Externally detected pinch update: scale the active layer and clamp.
    ///
    /// Returns the normalized position to report, if any.
    pub fn on_scale_update<M: TextMeasurer + ?Sized>(
        &mut self,
        target: &mut GestureTarget<'_, M>,
        factor: f64,
    ) -> Option<Point> {
        if self.apply_scale(target, factor) {
            reclamp(target.stack, target.image_rect, target.clamp_mode)
        } else {
            None
        }
    }

    /// End of an externally detected pinch.
    pub fn on_scale_end(&mut self) {}

    /// Start of an externally detected rotation: the next update re-bases.
    pub fn on_rotation_begin(&mut self) -> bool {
        self.state.previous_rotation_deg = None;
        true
    }

    /// Externally detected rotation update with a cumulative angle.
    ///
    /// Rotates the active layer about the focal point. No clamping is done
    /// here; the next pan or scale re-clamps. Returns `true` if the layer
    /// changed.
    pub fn on_rotation_update<M: TextMeasurer + ?Sized>(
        &mut self,
        target: &mut GestureTarget<'_, M>,
        cumulative_deg: f64,
    ) -> bool {
        self.apply_rotation(target, cumulative_deg)
    }

    /// End of an externally detected rotation.
    pub fn on_rotation_end(&mut self) {
        self.state.previous_rotation_deg = None;
    }

    fn apply_scale<M: TextMeasurer + ?Sized>(
        &mut self,
        target: &mut GestureTarget<'_, M>,
        factor: f64,
    ) -> bool {
        if !self.settings.flags.contains(GestureFlags::SCALE) {
            return false;
        }
        let Some(layer) = target.stack.active_mut() else {
            return false;
        };
        tracing::trace!(factor, "scale");
        layer.apply_scale_factor(factor, target.measurer);
        true
    }

    fn apply_rotation<M: TextMeasurer + ?Sized>(
        &mut self,
        target: &mut GestureTarget<'_, M>,
        cumulative_deg: f64,
    ) -> bool {
        if !self.settings.flags.contains(GestureFlags::ROTATE) {
            return false;
        }
        let Some(layer) = target.stack.active_mut() else {
            return false;
        };
        let previous = self.state.previous_rotation_deg.replace(cumulative_deg);
        let delta = previous.map_or(0.0, |p| cumulative_deg - p);
        tracing::trace!(delta, "rotate");
        layer.apply_rotation_delta(delta, self.state.focal_point);
        true
    }

    // Down/up: new centroid without movement, detectors re-based.
    fn pointers_changed(&mut self) {
        match self.pointers.centroid() {
            Some(focal) => {
                self.focal.reset(focal);
                self.state.focal_point = focal;
            }
            None => self.focal.end(),
        }
        self.scale.pointers_changed(&self.pointers);
        match self.rotation.pointers_changed(&self.pointers) {
            // The built-in detector is relative to its own begin.
            Some(RotationSignal::Begin) => self.state.previous_rotation_deg = Some(0.0),
            Some(RotationSignal::End) => self.state.previous_rotation_deg = None,
            _ => {}
        }
    }

    fn end_sequence(&mut self) {
        if self.focal.is_active() || self.panned {
            tracing::debug!(panned = self.panned, "touch sequence ended");
        }
        self.focal.end();
        self.scale.reset();
        self.rotation.reset();
        self.state.previous_rotation_deg = None;
        self.panned = false;
    }
}

fn raise_touched(stack: &mut LayerStack, at: Point, image_rect: Rect) {
    let top = stack.len().checked_sub(1);
    if let Some(idx) = stack.hit_test(at, image_rect) {
        if Some(idx) != top {
            stack.raise(idx);
        }
    }
}

fn over_zone(stack: &LayerStack, image_rect: Rect, zone: Option<Rect>) -> bool {
    let (Some(zone), Some(layer)) = (zone, stack.active()) else {
        return false;
    };
    layer
        .enclosing_rect(image_rect)
        .is_some_and(|r| r.intersect(zone).area() > 0.0)
}
