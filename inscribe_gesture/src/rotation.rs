// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger rotation detection.
//!
//! The angle is taken from the line joining the first two pointers that went
//! down. Updates report the *cumulative* angle since the gesture began, in
//! degrees, positive when the fingers turn counter-clockwise on a y-down
//! screen. The angle is unwrapped, so turning past 180 degrees keeps growing
//! instead of flipping sign.

use kurbo::Vec2;

use crate::pointers::PointerSet;

/// Signal produced by [`RotationDetector`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RotationSignal {
    /// A rotation started (a second pointer went down).
    Begin,
    /// Cumulative rotation since [`RotationSignal::Begin`], in degrees.
    Update(f64),
    /// The rotation ended (fewer than two pointers remain).
    End,
}

#[derive(Copy, Clone, Debug)]
struct Session {
    last_raw_deg: f64,
    cumulative_deg: f64,
}

/// Detects two-finger rotation from a [`PointerSet`].
#[derive(Clone, Debug, Default)]
pub struct RotationDetector {
    session: Option<Session>,
}

impl RotationDetector {
    /// Creates an idle detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a rotation is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Starts or ends a rotation after a pointer went down or up.
    ///
    /// When the pair of tracked pointers changes during a rotation the new
    /// line is adopted without reporting movement.
    pub fn pointers_changed<P: Copy + PartialEq>(
        &mut self,
        pointers: &PointerSet<P>,
    ) -> Option<RotationSignal> {
        let Some(raw) = line_angle(pointers) else {
            if pointers.len() >= 2 {
                // Two fingers on the same spot: no line yet, keep the session.
                return None;
            }
            let ended = self.session.take()?;
            tracing::trace!(total = ended.cumulative_deg, "rotation ended");
            return Some(RotationSignal::End);
        };
        match &mut self.session {
            Some(session) => {
                session.last_raw_deg = raw;
                None
            }
            None => {
                tracing::trace!(angle = raw, "rotation started");
                self.session = Some(Session {
                    last_raw_deg: raw,
                    cumulative_deg: 0.0,
                });
                Some(RotationSignal::Begin)
            }
        }
    }

    /// Reports the cumulative angle after pointers moved.
    pub fn pointers_moved<P: Copy + PartialEq>(
        &mut self,
        pointers: &PointerSet<P>,
    ) -> Option<RotationSignal> {
        let raw = line_angle(pointers)?;
        let Some(session) = self.session.as_mut() else {
            // The pair landed on one spot; start once they separate.
            tracing::trace!(angle = raw, "rotation started");
            self.session = Some(Session {
                last_raw_deg: raw,
                cumulative_deg: 0.0,
            });
            return None;
        };
        session.cumulative_deg += wrap_degrees(raw - session.last_raw_deg);
        session.last_raw_deg = raw;
        Some(RotationSignal::Update(session.cumulative_deg))
    }

    /// Forgets any rotation in progress.
    pub fn reset(&mut self) {
        self.session = None;
    }
}

// Counter-clockwise-positive angle of the first two pointers' line.
fn line_angle<P: Copy + PartialEq>(pointers: &PointerSet<P>) -> Option<f64> {
    let mut it = pointers.positions();
    let a = it.next()?;
    let b = it.next()?;
    let d: Vec2 = b - a;
    if d == Vec2::ZERO {
        return None;
    }
    // y points down, so negate to get a counter-clockwise-positive angle.
    Some(-d.atan2().to_degrees())
}

/// Wraps an angle difference into `(-180, 180]`.
fn wrap_degrees(mut deg: f64) -> f64 {
    while deg > 180.0 {
        deg -= 360.0;
    }
    while deg <= -180.0 {
        deg += 360.0;
    }
    deg
}
