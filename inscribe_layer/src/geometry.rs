// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar and rectangle helpers shared by layers, the renderer and the clamp solver.
//!
//! ## Rotation sign convention
//!
//! Layer rotation is stored as a gesture angle in degrees, positive when the
//! fingers turn counter-clockwise as seen on a y-down screen. In the same
//! space [`Affine::rotate`] turns clockwise for positive angles, so the
//! angle is negated exactly once, in [`canvas_rotation`]. Everything that
//! needs to place a layer (drawing, bounding boxes, hit testing, clamping)
//! goes through that function and never re-derives the sign locally.

use kurbo::{Affine, Point, Rect, Vec2};

/// Clamps `value` into `[min, max]` as `max(min(value, max), min)`.
///
/// Unlike [`f64::clamp`] this never panics: when `min > max` the range
/// collapses onto `min`. The clamp solver depends on that resolution order
/// to pin oversized text to the image's top/left edge.
#[must_use]
pub fn between(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Rotation of `degrees` (gesture convention) about `pivot`, expressed in the
/// canvas convention.
#[must_use]
pub fn canvas_rotation(degrees: f64, pivot: Point) -> Affine {
    Affine::rotate_about((-degrees).to_radians(), pivot)
}

/// Rotates about `pivot` by `degrees` after translating by `offset`.
///
/// Points are first moved by `offset` and the result is then rotated, i.e.
/// the affine is `rotation * translation`.
#[must_use]
pub fn rotate_then_translate(degrees: f64, pivot: Point, offset: Vec2) -> Affine {
    canvas_rotation(degrees, pivot) * Affine::translate(offset)
}

/// Maps `rect` through `transform` and returns the axis-aligned bounding box
/// of the four mapped corners.
#[must_use]
pub fn map_rect(transform: Affine, rect: Rect) -> Rect {
    let q0 = transform * Point::new(rect.x0, rect.y0);
    let q1 = transform * Point::new(rect.x1, rect.y0);
    let q2 = transform * Point::new(rect.x0, rect.y1);
    let q3 = transform * Point::new(rect.x1, rect.y1);
    let min_x = q0.x.min(q1.x).min(q2.x).min(q3.x);
    let min_y = q0.y.min(q1.y).min(q2.y).min(q3.y);
    let max_x = q0.x.max(q1.x).max(q2.x).max(q3.x);
    let max_y = q0.y.max(q1.y).max(q2.y).max(q3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}

/// Axis-aligned union of all rectangles, or `None` for an empty input.
#[must_use]
pub fn union_all(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|acc, r| acc.union(r))
}

/// Returns `true` when both components of `p` are finite.
#[must_use]
pub fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
