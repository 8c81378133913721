// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text style state carried by a layer and handed to measurement and rendering.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sin`/`cos`
use kurbo::Vec2;
use peniko::Color;

/// Opaque handle naming a typeface.
///
/// Handles are minted by whoever owns the fonts (for example
/// `FontMeasurer::register` with the `skrifa` feature, or the host
/// renderer). Layers only pass them through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Typeface(pub u32);

/// Drop shadow drawn under the text.
///
/// The shadow never affects geometry; it is kept with the style so the
/// renderer can draw it at the right offset for the current font size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DropShadow {
    /// Direction of the shadow offset in degrees, clockwise from +x.
    pub angle_deg: f64,
    /// Offset length as a fraction of the effective font size.
    pub distance: f64,
    /// Blur radius in pixels.
    pub blur_radius: f64,
    /// Shadow color.
    pub color: Color,
}

impl Default for DropShadow {
    fn default() -> Self {
        Self {
            angle_deg: 45.0,
            distance: 0.02,
            blur_radius: 1.0,
            color: Color::from_rgba8(0, 0, 0, 0x80),
        }
    }
}

impl DropShadow {
    /// Shadow offset in pixels for text drawn at `font_size`.
    #[must_use]
    pub fn offset_for(&self, font_size: f64) -> Vec2 {
        let th = self.angle_deg.to_radians();
        let len = font_size * self.distance;
        Vec2::new(len * th.cos(), len * th.sin())
    }
}

/// Font and paint state of a layer.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Effective font size in pixels, already scaled and clamped.
    pub size: f64,
    /// Fill color.
    pub color: Color,
    /// Typeface, or `None` for the measurer's/renderer's default.
    pub typeface: Option<Typeface>,
    /// Optional drop shadow.
    pub shadow: Option<DropShadow>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 48.0,
            color: Color::from_rgba8(0, 0, 0, 0xff),
            typeface: None,
            shadow: None,
        }
    }
}

impl TextStyle {
    /// Style with the given size and defaults otherwise.
    #[must_use]
    pub fn with_size(size: f64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}
