// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect, Size, Vec2};
use peniko::Color;

use crate::geometry::{between, canvas_rotation, map_rect, rotate_then_translate, union_all};
use crate::measure::TextMeasurer;
use crate::style::{DropShadow, TextStyle, Typeface};

/// Font-size bounds applied to a layer's effective size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SizeLimits {
    /// Smallest allowed effective font size.
    pub min: f64,
    /// Largest allowed effective font size.
    pub max: f64,
}

impl SizeLimits {
    /// Creates limits covering `[min, max]`.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamps `size` into the limits. An inverted range resolves to `min`.
    #[must_use]
    pub fn clamp(&self, size: f64) -> f64 {
        between(size, self.min, self.max)
    }
}

/// Where one line of a layer sits, for drawing.
#[derive(Clone, Copy, Debug)]
pub struct LinePlacement<'a> {
    /// The line's text.
    pub text: &'a str,
    /// Measured tight size of the line.
    pub size: Size,
    /// Maps the line's local box (origin top-left, extent `size`) into view
    /// coordinates.
    pub transform: Affine,
    /// Maps a baseline-origin text draw call (origin at the line's bottom-left)
    /// into view coordinates.
    pub baseline: Affine,
}

/// One independently transformable multi-line text block.
///
/// ## Coordinates
///
/// - `position` is the top-left offset of the unrotated block relative to
///   the image rectangle's origin, in pixels.
/// - `pivot` is in view coordinates; the block is rotated about it.
/// - Per-line geometry is recomputed through [`TextLayer::line_placements`]
///   and [`TextLayer::enclosing_rect`], which share one transform so the draw
///   path and the geometry core always agree.
///
/// ## Scale
///
/// `scale` multiplies the base font size. After every scale mutation the
/// effective size is clamped into the layer's [`SizeLimits`] and `scale` is
/// re-derived from it, so `scale * base_size` always lies in the limits.
#[derive(Clone, Debug)]
pub struct TextLayer {
    source: Option<String>,
    lines: Vec<String>,
    line_boxes: Vec<Size>,
    position: Point,
    rotation_deg: f64,
    pivot: Point,
    scale: f64,
    base_size: f64,
    limits: SizeLimits,
    interline_gap: f64,
    style: TextStyle,
}

impl TextLayer {
    /// Creates an empty layer whose base size is `style.size`.
    ///
    /// The effective size is clamped into `limits` straight away.
    #[must_use]
    pub fn new(style: TextStyle, limits: SizeLimits, interline_gap: f64) -> Self {
        let base_size = style.size;
        let mut layer = Self {
            source: None,
            lines: Vec::new(),
            line_boxes: Vec::new(),
            position: Point::ZERO,
            rotation_deg: 0.0,
            pivot: Point::ZERO,
            scale: 1.0,
            base_size,
            limits,
            interline_gap,
            style,
        };
        layer.apply_effective_size();
        layer
    }

    /// Replaces the content and re-measures every line.
    ///
    /// `None` clears the content; the layer then has no geometry.
    pub fn set_text<M: TextMeasurer + ?Sized>(&mut self, text: Option<&str>, measurer: &M) {
        self.source = text.map(ToString::to_string);
        self.lines = text.map(split_lines).unwrap_or_default();
        self.remeasure(measurer);
    }

    /// Sets the typeface and re-measures, since glyph metrics depend on it.
    pub fn set_typeface<M: TextMeasurer + ?Sized>(
        &mut self,
        typeface: Option<Typeface>,
        measurer: &M,
    ) {
        self.style.typeface = typeface;
        self.remeasure(measurer);
    }

    /// Sets the fill color. No geometric effect.
    pub fn set_text_color(&mut self, color: Color) {
        self.style.color = color;
    }

    /// Sets or clears the drop shadow. No geometric effect.
    pub fn set_drop_shadow(&mut self, shadow: Option<DropShadow>) {
        self.style.shadow = shadow;
    }

    /// Resets `scale` to `1` with a new base size and re-measures.
    ///
    /// The effective size is clamped into the limits, so `scale` may end up
    /// different from `1` when `size` lies outside them.
    pub fn set_text_size<M: TextMeasurer + ?Sized>(&mut self, size: f64, measurer: &M) {
        if !(size.is_finite() && size > 0.0) {
            tracing::warn!(size, "ignoring invalid text size");
            return;
        }
        self.base_size = size;
        self.scale = 1.0;
        self.apply_effective_size();
        self.remeasure(measurer);
    }

    /// Multiplies the scale by `factor`, clamps, and re-measures.
    ///
    /// Non-positive or non-finite factors are ignored.
    pub fn apply_scale_factor<M: TextMeasurer + ?Sized>(&mut self, factor: f64, measurer: &M) {
        if !(factor.is_finite() && factor > 0.0) {
            tracing::warn!(factor, "ignoring invalid scale factor");
            return;
        }
        self.scale *= factor;
        self.apply_effective_size();
        self.remeasure(measurer);
    }

    /// Sets the scale directly, clamps, and re-measures.
    pub fn set_scale<M: TextMeasurer + ?Sized>(&mut self, scale: f64, measurer: &M) {
        if !(scale.is_finite() && scale > 0.0) {
            tracing::warn!(scale, "ignoring invalid scale");
            return;
        }
        self.scale = scale;
        self.apply_effective_size();
        self.remeasure(measurer);
    }

    /// Adds `delta_deg` to the rotation and moves the pivot to `new_pivot`.
    pub fn apply_rotation_delta(&mut self, delta_deg: f64, new_pivot: Point) {
        self.rotation_deg += delta_deg;
        self.pivot = new_pivot;
    }

    /// Sets the absolute rotation, keeping the current pivot.
    pub fn set_rotation_degrees(&mut self, degrees: f64) {
        self.rotation_deg = degrees;
    }

    /// Moves the block and its pivot by `(dx, dy)`.
    ///
    /// Moving the pivot along keeps the rotation about the same visual point,
    /// so the enclosing rectangle translates by exactly the same amount.
    pub fn apply_pan(&mut self, dx: f64, dy: f64) {
        let d = Vec2::new(dx, dy);
        self.position += d;
        self.pivot += d;
    }

    /// Moves `position` so that the rotated block (and its enclosing
    /// rectangle) moves by exactly `shift` in view space, keeping the pivot.
    ///
    /// With no rotation this is a plain `position += shift`.
    pub fn translate_enclosing_by(&mut self, shift: Vec2) {
        // Rotating about a fixed pivot turns a position change `d` into a
        // view-space move of `R * d`, so feed it `R^-1 * shift`.
        let unrotate = canvas_rotation(-self.rotation_deg, Point::ZERO);
        let d = unrotate * shift.to_point();
        self.position += d.to_vec2();
    }

    /// Sets the position (relative to the image origin) directly.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Sets the rotation pivot (view coordinates) directly.
    pub fn set_pivot(&mut self, pivot: Point) {
        self.pivot = pivot;
    }

    /// Axis-aligned bounding box of the rotated block, in view coordinates.
    ///
    /// Returns `None` when the layer has no content.
    #[must_use]
    pub fn enclosing_rect(&self, image_rect: Rect) -> Option<Rect> {
        union_all(self.line_transforms(image_rect).map(|(t, size)| {
            map_rect(t, Rect::from_origin_size(Point::ZERO, size))
        }))
    }

    /// Per-line placements for drawing the layer over `image_rect`.
    pub fn line_placements(&self, image_rect: Rect) -> impl Iterator<Item = LinePlacement<'_>> {
        self.lines
            .iter()
            .zip(self.line_transforms(image_rect))
            .map(|(text, (transform, size))| LinePlacement {
                text,
                size,
                transform,
                baseline: transform * Affine::translate((0.0, size.height)),
            })
    }

    /// Returns `true` if `view_point` falls inside one of the rotated line boxes.
    #[must_use]
    pub fn contains_point(&self, view_point: Point, image_rect: Rect) -> bool {
        self.line_transforms(image_rect).any(|(t, size)| {
            let local = t.inverse() * view_point;
            Rect::from_origin_size(Point::ZERO, size).contains(local)
        })
    }

    // Line i's local box is offset by the image origin and the running top,
    // then rotated about the pivot.
    fn line_transforms(&self, image_rect: Rect) -> impl Iterator<Item = (Affine, Size)> + '_ {
        let origin = image_rect.origin().to_vec2();
        let gap = self.interline_gap * self.scale;
        let mut top = self.position.y;
        self.line_boxes.iter().map(move |size| {
            let offset = origin + Vec2::new(self.position.x, top);
            top += size.height + gap;
            (
                rotate_then_translate(self.rotation_deg, self.pivot, offset),
                *size,
            )
        })
    }

    /// Width and height of the unrotated block.
    ///
    /// The width is the widest line; the height is the sum of the line
    /// heights plus the scaled interline gap between lines.
    #[must_use]
    pub fn block_size(&self) -> Size {
        if self.line_boxes.is_empty() {
            return Size::ZERO;
        }
        let width = self.line_boxes.iter().fold(0.0_f64, |w, s| w.max(s.width));
        let heights: f64 = self.line_boxes.iter().map(|s| s.height).sum();
        #[allow(
            clippy::cast_precision_loss,
            reason = "line counts are far below f64's exact integer range"
        )]
        let gaps = (self.line_boxes.len() - 1) as f64 * self.interline_gap * self.scale;
        Size::new(width, heights + gaps)
    }

    /// The text last passed to [`TextLayer::set_text`].
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The content split into lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Measured size of each line, one per entry of [`TextLayer::lines`].
    #[must_use]
    pub fn line_boxes(&self) -> &[Size] {
        &self.line_boxes
    }

    /// Returns `true` if the layer has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Top-left of the unrotated block relative to the image origin.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Accumulated rotation in degrees (gesture convention).
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_deg
    }

    /// Rotation pivot in view coordinates.
    #[must_use]
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    /// Scale relative to the base size.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Unscaled font size.
    #[must_use]
    pub fn base_size(&self) -> f64 {
        self.base_size
    }

    /// Effective font size, `scale * base_size` after clamping.
    #[must_use]
    pub fn effective_size(&self) -> f64 {
        self.style.size
    }

    /// Font-size limits.
    #[must_use]
    pub fn limits(&self) -> SizeLimits {
        self.limits
    }

    /// Extra vertical space between lines, before scaling.
    #[must_use]
    pub fn interline_gap(&self) -> f64 {
        self.interline_gap
    }

    /// Current style.
    #[must_use]
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    fn apply_effective_size(&mut self) {
        let effective = self.limits.clamp(self.scale * self.base_size);
        self.style.size = effective;
        self.scale = effective / self.base_size;
    }

    fn remeasure<M: TextMeasurer + ?Sized>(&mut self, measurer: &M) {
        let style = &self.style;
        self.line_boxes = self
            .lines
            .iter()
            .map(|line| measurer.measure(line, style))
            .collect();
    }
}

/// Splits on `\n`, strips a trailing `\r` from each line, and drops
/// trailing empty lines. The empty string is a single empty line.
fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect();
    while lines.len() > 1 && lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Rect, Size, Vec2};

    use super::{SizeLimits, TextLayer, split_lines};
    use crate::measure::FixedAdvanceMeasurer;
    use crate::style::TextStyle;

    const M: FixedAdvanceMeasurer = FixedAdvanceMeasurer::new(0.5, 1.0);

    fn layer(text: &str) -> TextLayer {
        let mut l = TextLayer::new(TextStyle::with_size(20.0), SizeLimits::new(10.0, 100.0), 4.0);
        l.set_text(Some(text), &M);
        l
    }

    fn close_rect(a: Rect, b: Rect) -> bool {
        (a.x0 - b.x0).abs() < 1e-9
            && (a.y0 - b.y0).abs() < 1e-9
            && (a.x1 - b.x1).abs() < 1e-9
            && (a.y1 - b.y1).abs() < 1e-9
    }

    #[test]
    fn split_follows_line_break_rules() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb\n\n"), vec!["a", "b"]);
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("\n"), vec![""]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn line_boxes_track_content() {
        let mut l = layer("abcd\nab");
        assert_eq!(l.line_boxes(), &[Size::new(40.0, 20.0), Size::new(20.0, 20.0)]);
        assert_eq!(l.block_size(), Size::new(40.0, 44.0));

        l.set_text(None, &M);
        assert!(l.is_empty());
        assert!(l.line_boxes().is_empty());
        assert_eq!(l.enclosing_rect(Rect::new(0.0, 0.0, 100.0, 100.0)), None);
        assert_eq!(l.block_size(), Size::ZERO);
    }

    #[test]
    fn scale_is_clamped_and_self_consistent() {
        let mut l = layer("x");
        l.apply_scale_factor(10.0, &M);
        assert_eq!(l.effective_size(), 100.0);
        assert!((l.scale() * l.base_size() - 100.0).abs() < 1e-9);
        l.apply_scale_factor(0.01, &M);
        assert_eq!(l.effective_size(), 10.0);
        assert!((l.scale() - 0.5).abs() < 1e-12);
        // Remeasured at the new size.
        assert_eq!(l.line_boxes(), &[Size::new(5.0, 10.0)]);
    }

    #[test]
    fn invalid_scale_factor_is_ignored() {
        let mut l = layer("x");
        l.apply_scale_factor(0.0, &M);
        l.apply_scale_factor(f64::NAN, &M);
        l.apply_scale_factor(-2.0, &M);
        assert_eq!(l.scale(), 1.0);
    }

    #[test]
    fn set_text_size_resets_scale() {
        let mut l = layer("x");
        l.apply_scale_factor(2.0, &M);
        l.set_text_size(30.0, &M);
        assert_eq!(l.scale(), 1.0);
        assert_eq!(l.base_size(), 30.0);
        assert_eq!(l.effective_size(), 30.0);

        // Outside the limits: clamped, scale corrected.
        l.set_text_size(200.0, &M);
        assert_eq!(l.effective_size(), 100.0);
        assert!((l.scale() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn unrotated_enclosing_rect_is_offset_by_image_origin() {
        let mut l = layer("abcd\nab");
        l.set_position(Point::new(10.0, 5.0));
        let image = Rect::new(100.0, 50.0, 600.0, 350.0);
        let r = l.enclosing_rect(image).unwrap();
        assert!(close_rect(r, Rect::new(110.0, 55.0, 150.0, 99.0)), "got {r:?}");
    }

    #[test]
    fn rotation_by_180_about_block_center_is_symmetric() {
        let mut l = layer("abcd");
        let image = Rect::new(0.0, 0.0, 500.0, 500.0);
        l.set_position(Point::new(100.0, 100.0));
        let before = l.enclosing_rect(image).unwrap();
        l.apply_rotation_delta(180.0, before.center());
        let after = l.enclosing_rect(image).unwrap();
        assert!(close_rect(before, after), "{before:?} vs {after:?}");
    }

    #[test]
    fn pan_translates_rotated_rect_exactly() {
        let mut l = layer("abcd\nab");
        let image = Rect::new(0.0, 0.0, 500.0, 500.0);
        l.apply_rotation_delta(30.0, Point::new(70.0, 40.0));
        let before = l.enclosing_rect(image).unwrap();
        l.apply_pan(12.0, -7.0);
        assert_eq!(l.pivot(), Point::new(82.0, 33.0));
        let after = l.enclosing_rect(image).unwrap();
        assert!(close_rect(after, before + Vec2::new(12.0, -7.0)), "{before:?} vs {after:?}");
    }

    #[test]
    fn translate_enclosing_by_moves_rotated_rect_exactly() {
        let mut l = layer("abcd\nab");
        let image = Rect::new(0.0, 0.0, 500.0, 500.0);
        l.apply_rotation_delta(-50.0, Point::new(10.0, 90.0));
        let pivot = l.pivot();
        let before = l.enclosing_rect(image).unwrap();
        l.translate_enclosing_by(Vec2::new(-25.0, 40.0));
        assert_eq!(l.pivot(), pivot);
        let after = l.enclosing_rect(image).unwrap();
        assert!(close_rect(after, before + Vec2::new(-25.0, 40.0)), "{before:?} vs {after:?}");
    }

    #[test]
    fn placements_and_hit_test_share_geometry() {
        let mut l = layer("abcd\nab");
        let image = Rect::new(0.0, 0.0, 500.0, 500.0);
        l.set_position(Point::new(50.0, 50.0));
        let placements: alloc::vec::Vec<_> = l.line_placements(image).collect();
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[1].text, "ab");
        let second_top_left = placements[1].transform * Point::ZERO;
        assert_eq!(second_top_left, Point::new(50.0, 74.0));
        let second_baseline = placements[1].baseline * Point::ZERO;
        assert_eq!(second_baseline, Point::new(50.0, 94.0));

        assert!(l.contains_point(Point::new(60.0, 60.0), image));
        // Right of the short second line, inside the block's bounding box.
        assert!(!l.contains_point(Point::new(85.0, 80.0), image));
        assert!(!l.contains_point(Point::new(10.0, 10.0), image));
    }

    #[test]
    fn typeface_and_color_changes() {
        let mut l = layer("ab");
        l.set_typeface(Some(crate::style::Typeface(1)), &M);
        assert_eq!(l.style().typeface, Some(crate::style::Typeface(1)));
        assert_eq!(l.line_boxes().len(), 1);
        let red = peniko::Color::from_rgba8(255, 0, 0, 255);
        l.set_text_color(red);
        assert_eq!(l.style().color, red);
    }
}
