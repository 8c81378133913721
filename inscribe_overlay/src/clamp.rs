// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping the active layer relative to the image bounds.

use inscribe_layer::geometry::{between, is_finite_point};
use inscribe_layer::{LayerStack, TextLayer};
use kurbo::{Point, Rect, Vec2};

/// How far a layer's position may drift relative to the image bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClampMode {
    /// Do not apply any clamping; the text may move anywhere.
    #[default]
    Unlimited,
    /// Keep the top-left corner of the text's enclosing rectangle inside the
    /// image. The text may still run past the right and bottom edges.
    OriginInside,
    /// Keep the whole enclosing rectangle inside the image.
    ///
    /// Text larger than the image on an axis is pinned to the image's
    /// left/top edge on that axis: the allowed range is empty and
    /// [`between`] resolves it to its lower bound.
    TextInside,
}

/// Clamps the active layer of `stack`. See [`clamp_layer`].
///
/// An empty stack is left alone and yields `None`.
pub fn reclamp(stack: &mut LayerStack, image_rect: Rect, mode: ClampMode) -> Option<Point> {
    clamp_layer(stack.active_mut()?, image_rect, mode)
}

/// Moves `layer` so that it satisfies `mode` and reports its normalized position.
///
/// The correction is computed on the enclosing rectangle in image-local
/// coordinates and applied so that the rectangle moves by exactly that
/// amount, even for rotated text. Running this twice in a row is the same
/// as running it once.
///
/// Returns `None`, without touching the layer, when the image rectangle
/// has no area (no image yet) or the layer has no content. Otherwise
/// returns [`normalized_position`] when it is finite.
pub fn clamp_layer(layer: &mut TextLayer, image_rect: Rect, mode: ClampMode) -> Option<Point> {
    if !has_area(image_rect) {
        return None;
    }
    let r = local_enclosing_rect(layer, image_rect)?;
    let (w, h) = (image_rect.width(), image_rect.height());
    let target = match mode {
        ClampMode::Unlimited => None,
        ClampMode::OriginInside => Some(Point::new(between(r.x0, 0.0, w), between(r.y0, 0.0, h))),
        ClampMode::TextInside => Some(Point::new(
            between(r.x0, 0.0, w - r.width()),
            between(r.y0, 0.0, h - r.height()),
        )),
    };
    if let Some(target) = target {
        let shift = target - r.origin();
        if shift != Vec2::ZERO {
            tracing::debug!(?mode, dx = shift.x, dy = shift.y, "clamped layer");
            layer.translate_enclosing_by(shift);
        }
    }
    normalized_position(layer, image_rect)
}

/// Top-left corner of the layer's enclosing rectangle as a fraction of the
/// image size: `(0, 0)` is the image's top-left, `(1, 1)` its bottom-right.
///
/// Values outside `[0, 1]` mean the text overhangs the image. Returns `None`
/// for an empty layer or when the result is not finite (an image rectangle
/// with no area).
#[must_use]
pub fn normalized_position(layer: &TextLayer, image_rect: Rect) -> Option<Point> {
    let r = local_enclosing_rect(layer, image_rect)?;
    let p = Point::new(r.x0 / image_rect.width(), r.y0 / image_rect.height());
    is_finite_point(p).then_some(p)
}

/// The layer's enclosing rectangle relative to the image's top-left corner.
#[must_use]
pub fn local_enclosing_rect(layer: &TextLayer, image_rect: Rect) -> Option<Rect> {
    Some(layer.enclosing_rect(image_rect)? - image_rect.origin().to_vec2())
}

pub(crate) fn has_area(rect: Rect) -> bool {
    let (w, h) = (rect.width(), rect.height());
    w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
}

#[cfg(test)]
mod tests {
    use inscribe_layer::{FixedAdvanceMeasurer, LayerStack, SizeLimits, TextLayer, TextStyle};
    use kurbo::{Point, Rect};

    use super::{ClampMode, clamp_layer, local_enclosing_rect, normalized_position, reclamp};

    const M: FixedAdvanceMeasurer = FixedAdvanceMeasurer::new(0.5, 1.0);
    const EPS: f64 = 1e-9;

    fn layer_at(text: &str, size: f64, at: Point) -> TextLayer {
        let mut l = TextLayer::new(TextStyle::with_size(size), SizeLimits::new(1.0, 1000.0), 0.0);
        l.set_text(Some(text), &M);
        l.set_position(at);
        l
    }

    fn contained(inner: Rect, outer: Rect) -> bool {
        inner.x0 >= outer.x0 - EPS
            && inner.y0 >= outer.y0 - EPS
            && inner.x1 <= outer.x1 + EPS
            && inner.y1 <= outer.y1 + EPS
    }

    #[test]
    fn unlimited_never_moves() {
        let image = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut l = layer_at("abcd", 20.0, Point::new(-500.0, 900.0));
        let p = clamp_layer(&mut l, image, ClampMode::Unlimited).unwrap();
        assert_eq!(l.position(), Point::new(-500.0, 900.0));
        assert_eq!(p, Point::new(-5.0, 9.0));
    }

    #[test]
    fn origin_inside_pulls_top_left_only() {
        let image = Rect::new(10.0, 20.0, 110.0, 120.0);
        let mut l = layer_at("abcd", 20.0, Point::new(-30.0, 95.0));
        clamp_layer(&mut l, image, ClampMode::OriginInside);
        assert_eq!(l.position(), Point::new(0.0, 95.0));

        // Far past the bottom-right: the corner lands on the far edges.
        l.set_position(Point::new(300.0, 300.0));
        clamp_layer(&mut l, image, ClampMode::OriginInside);
        assert_eq!(l.position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn text_inside_contains_block() {
        let image = Rect::new(0.0, 0.0, 200.0, 100.0);
        let mut l = layer_at("abcd\nab", 20.0, Point::new(190.0, 90.0));
        clamp_layer(&mut l, image, ClampMode::TextInside);
        let r = l.enclosing_rect(image).unwrap();
        assert!(contained(r, image), "{r:?}");
        assert!((r.x1 - 200.0).abs() < EPS && (r.y1 - 100.0).abs() < EPS, "{r:?}");
    }

    #[test]
    fn text_inside_contains_rotated_block() {
        let image = Rect::new(50.0, 50.0, 450.0, 350.0);
        let mut l = layer_at("abcdef\nabc", 20.0, Point::new(380.0, -40.0));
        l.apply_rotation_delta(37.0, Point::new(300.0, 60.0));
        clamp_layer(&mut l, image, ClampMode::TextInside);
        let r = l.enclosing_rect(image).unwrap();
        assert!(contained(r, image), "{r:?}");
    }

    #[test]
    fn oversized_text_pins_to_top_left() {
        let image = Rect::new(0.0, 0.0, 50.0, 10.0);
        let mut l = layer_at("abcdefghij", 20.0, Point::new(13.0, 7.0));
        clamp_layer(&mut l, image, ClampMode::TextInside);
        assert_eq!(l.position(), Point::ZERO);
    }

    #[test]
    fn clamping_is_idempotent() {
        let image = Rect::new(5.0, 5.0, 305.0, 205.0);
        for mode in [ClampMode::Unlimited, ClampMode::OriginInside, ClampMode::TextInside] {
            for rotation in [0.0, 25.0, -110.0] {
                let mut l = layer_at("abcde\nxy", 20.0, Point::new(280.0, -60.0));
                l.apply_rotation_delta(rotation, Point::new(200.0, 40.0));
                clamp_layer(&mut l, image, mode);
                let once = l.position();
                clamp_layer(&mut l, image, mode);
                let twice = l.position();
                assert!(
                    (once - twice).hypot() < 1e-9,
                    "{mode:?} at {rotation}: {once:?} vs {twice:?}"
                );
            }
        }
    }

    #[test]
    fn empty_image_skips_correction_and_notification() {
        let mut l = layer_at("abcd", 20.0, Point::new(-30.0, -30.0));
        let empty = Rect::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(clamp_layer(&mut l, empty, ClampMode::TextInside), None);
        assert_eq!(l.position(), Point::new(-30.0, -30.0));
        assert_eq!(normalized_position(&l, empty), None);
    }

    #[test]
    fn empty_stack_and_empty_layer_are_no_ops() {
        let image = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut stack = LayerStack::new();
        assert_eq!(reclamp(&mut stack, image, ClampMode::TextInside), None);

        let mut l = TextLayer::new(TextStyle::with_size(10.0), SizeLimits::new(1.0, 100.0), 0.0);
        l.set_position(Point::new(-5.0, -5.0));
        stack.push(l);
        assert_eq!(reclamp(&mut stack, image, ClampMode::TextInside), None);
        assert_eq!(stack.active().unwrap().position(), Point::new(-5.0, -5.0));
    }

    #[test]
    fn normalized_position_of_unrotated_layer() {
        let image = Rect::new(0.0, 0.0, 1000.0, 500.0);
        let l = layer_at("Hello", 20.0, Point::new(100.0, 50.0));
        assert_eq!(normalized_position(&l, image), Some(Point::new(0.1, 0.1)));
        let local = local_enclosing_rect(&l, image).unwrap();
        assert_eq!(local.origin(), Point::new(100.0, 50.0));
    }
}
