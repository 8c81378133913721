// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinch detection: a scale factor per move from the spread of the pointers.
//!
//! The span of a touch is twice the mean distance of the pointers from their
//! centroid. Each move reports `span / previous_span`. Whenever the pointer
//! set changes the previous span is re-measured, so a finger landing or
//! lifting never produces a jump.

use kurbo::Point;

use crate::pointers::PointerSet;

/// Signal produced by [`ScaleDetector`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScaleSignal {
    /// A pinch started (a second pointer went down).
    Begin,
    /// Relative scale since the previous update.
    Update(f64),
    /// The pinch ended (fewer than two pointers remain).
    End,
}

/// Detects pinch gestures from a [`PointerSet`].
#[derive(Clone, Debug)]
pub struct ScaleDetector {
    previous_span: Option<f64>,
    min_span: f64,
}

impl Default for ScaleDetector {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ScaleDetector {
    /// Creates a detector that ignores spans below `min_span` pixels.
    ///
    /// Tiny spans (fingers nearly on top of each other) make the ratio
    /// explode, so updates are suppressed until the span grows again.
    #[must_use]
    pub fn new(min_span: f64) -> Self {
        Self {
            previous_span: None,
            min_span,
        }
    }

    /// Returns `true` while a pinch is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.previous_span.is_some()
    }

    /// Re-baselines after a pointer went down or up.
    pub fn pointers_changed<P: Copy + PartialEq>(
        &mut self,
        pointers: &PointerSet<P>,
    ) -> Option<ScaleSignal> {
        let was_active = self.is_active();
        if pointers.len() < 2 {
            self.previous_span = None;
            if was_active {
                tracing::trace!("pinch ended");
            }
            return was_active.then_some(ScaleSignal::End);
        }
        let current = span(pointers);
        self.previous_span = Some(current);
        if !was_active {
            tracing::trace!(span = current, "pinch started");
        }
        (!was_active).then_some(ScaleSignal::Begin)
    }

    /// Computes the scale factor after pointers moved.
    pub fn pointers_moved<P: Copy + PartialEq>(
        &mut self,
        pointers: &PointerSet<P>,
    ) -> Option<ScaleSignal> {
        let previous = self.previous_span?;
        let current = span(pointers);
        if current < self.min_span {
            return None;
        }
        self.previous_span = Some(current);
        if previous < self.min_span {
            return None;
        }
        Some(ScaleSignal::Update(current / previous))
    }

    /// Forgets any pinch in progress.
    pub fn reset(&mut self) {
        self.previous_span = None;
    }
}

fn span<P: Copy + PartialEq>(pointers: &PointerSet<P>) -> f64 {
    let Some(center) = pointers.centroid() else {
        return 0.0;
    };
    let total: f64 = pointers.positions().map(|p: Point| (p - center).hypot()).sum();
    #[allow(clippy::cast_precision_loss, reason = "pointer counts are tiny")]
    let n = pointers.len() as f64;
    2.0 * total / n
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{ScaleDetector, ScaleSignal};
    use crate::pointers::PointerSet;

    #[test]
    fn single_pointer_never_scales() {
        let mut det = ScaleDetector::default();
        let mut set = PointerSet::new();
        set.down(1, Point::ZERO);
        assert_eq!(det.pointers_changed(&set), None);
        set.update(&1, Point::new(50.0, 0.0));
        assert_eq!(det.pointers_moved(&set), None);
    }

    #[test]
    fn spreading_fingers_reports_ratio() {
        let mut det = ScaleDetector::default();
        let mut set = PointerSet::new();
        set.down(1, Point::new(0.0, 0.0));
        det.pointers_changed(&set);
        set.down(2, Point::new(100.0, 0.0));
        assert_eq!(det.pointers_changed(&set), Some(ScaleSignal::Begin));

        set.update(&1, Point::new(-50.0, 0.0));
        set.update(&2, Point::new(150.0, 0.0));
        assert_eq!(det.pointers_moved(&set), Some(ScaleSignal::Update(2.0)));

        set.update(&2, Point::new(50.0, 0.0));
        assert_eq!(det.pointers_moved(&set), Some(ScaleSignal::Update(0.5)));

        set.up(&2);
        assert_eq!(det.pointers_changed(&set), Some(ScaleSignal::End));
        assert!(!det.is_active());
    }

    #[test]
    fn third_finger_rebaselines_without_jump() {
        let mut det = ScaleDetector::default();
        let mut set = PointerSet::new();
        set.down(1, Point::new(0.0, 0.0));
        set.down(2, Point::new(100.0, 0.0));
        assert_eq!(det.pointers_changed(&set), Some(ScaleSignal::Begin));
        set.down(3, Point::new(50.0, 300.0));
        assert_eq!(det.pointers_changed(&set), None);
        // Nothing moved since the re-baseline: factor 1.
        assert_eq!(det.pointers_moved(&set), Some(ScaleSignal::Update(1.0)));
    }

    #[test]
    fn collapsed_span_is_ignored() {
        let mut det = ScaleDetector::new(10.0);
        let mut set = PointerSet::new();
        set.down(1, Point::new(0.0, 0.0));
        set.down(2, Point::new(100.0, 0.0));
        det.pointers_changed(&set);
        set.update(&2, Point::new(1.0, 0.0));
        assert_eq!(det.pointers_moved(&set), None);
        // Growing again from a collapsed baseline is measured from the last good span.
        set.update(&2, Point::new(200.0, 0.0));
        assert_eq!(det.pointers_moved(&set), Some(ScaleSignal::Update(2.0)));
    }
}
