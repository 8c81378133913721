// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focal point tracking: movement deltas of the pointers' centroid.
//!
//! ## Usage
//!
//! 1) Whenever the set of pointers changes (down/up), call [`FocalDrag::reset`]
//!    with the new centroid. The centroid jumps when a finger lands or lifts,
//!    and that jump must not read as movement.
//! 2) On each move event, call [`FocalDrag::update`] with the new centroid to get
//!    the delta since the previous focal point.
//! 3) When the last pointer lifts, call [`FocalDrag::end`].
//!
//! ## Minimal example
//!
//! ```
//! use inscribe_gesture::focal::FocalDrag;
//! use kurbo::{Point, Vec2};
//!
//! let mut focal = FocalDrag::default();
//! focal.reset(Point::new(10.0, 20.0));
//!
//! let delta = focal.update(Point::new(15.0, 25.0)).unwrap();
//! assert_eq!(delta, Vec2::new(5.0, 5.0));
//!
//! // A second finger lands: the centroid moves but that is not a pan.
//! focal.reset(Point::new(40.0, 25.0));
//! assert_eq!(focal.update(Point::new(41.0, 25.0)), Some(Vec2::new(1.0, 0.0)));
//! ```

use kurbo::{Point, Vec2};

/// Tracks the focal point across a touch sequence.
#[derive(Debug, Clone, Default, Copy)]
pub struct FocalDrag {
    /// Focal point at the start of the touch sequence.
    pub start: Option<Point>,
    /// Most recent focal point.
    pub current: Option<Point>,
}

impl FocalDrag {
    /// Re-bases the focal point without producing a delta.
    ///
    /// Starts a sequence if none is active.
    pub fn reset(&mut self, focal: Point) {
        if self.start.is_none() {
            self.start = Some(focal);
        }
        self.current = Some(focal);
    }

    /// Moves the focal point, returning the delta since the previous one.
    ///
    /// Returns `None` outside a sequence.
    pub fn update(&mut self, focal: Point) -> Option<Vec2> {
        let last = self.current?;
        self.current = Some(focal);
        Some(focal - last)
    }

    /// Offset of the current focal point from where the sequence started.
    #[must_use]
    pub fn total_offset(&self) -> Option<Vec2> {
        Some(self.current? - self.start?)
    }

    /// Ends the sequence.
    pub fn end(&mut self) {
        self.start = None;
        self.current = None;
    }

    /// Returns `true` while a sequence is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_inactive() {
        let mut focal = FocalDrag::default();
        assert!(!focal.is_active());
        assert_eq!(focal.update(Point::new(3.0, 4.0)), None);
        assert_eq!(focal.total_offset(), None);
    }

    #[test]
    fn incremental_deltas() {
        let mut focal = FocalDrag::default();
        focal.reset(Point::ZERO);
        assert_eq!(focal.update(Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(focal.update(Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(focal.update(Point::new(6.0, 7.0)), Some(Vec2::new(-2.0, 0.0)));
    }

    #[test]
    fn reset_keeps_sequence_start() {
        let mut focal = FocalDrag::default();
        focal.reset(Point::new(10.0, 10.0));
        focal.update(Point::new(20.0, 10.0));
        focal.reset(Point::new(50.0, 50.0));
        assert_eq!(focal.start, Some(Point::new(10.0, 10.0)));
        assert_eq!(focal.total_offset(), Some(Vec2::new(40.0, 40.0)));
    }

    #[test]
    fn end_resets_state() {
        let mut focal = FocalDrag::default();
        focal.reset(Point::new(1.0, 2.0));
        focal.end();
        assert!(!focal.is_active());
        assert!(focal.start.is_none());
        // Ending twice is harmless.
        focal.end();
        assert!(focal.current.is_none());
    }
}
