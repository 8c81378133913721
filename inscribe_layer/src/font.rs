// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font-backed measurement using Skrifa glyph metrics.
//!
//! This is a simple horizontal layout without shaping: each `char` is mapped
//! through the font's charmap, glyphs are advanced by their metrics advance
//! width, and the tight bounds of the run are the union of the glyph
//! bounding boxes. That matches what a "text bounds" query on a platform
//! paint object reports closely enough for placement and clamping.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Size;
use peniko::FontData;
use skrifa::instance::{LocationRef, Size as FontSize};
use skrifa::metrics::GlyphMetrics;
use skrifa::{FontRef, MetadataProvider};

use crate::measure::{FixedAdvanceMeasurer, TextMeasurer};
use crate::style::{TextStyle, Typeface};

/// Error returned when font data cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontError {
    /// Collection index that was requested.
    pub index: u32,
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font data at collection index {} could not be parsed", self.index)
    }
}

impl core::error::Error for FontError {}

/// [`TextMeasurer`] that measures with real fonts.
///
/// Fonts are registered up front and addressed by the returned
/// [`Typeface`]. Styles with no typeface use the first registered font;
/// lines whose typeface is unknown (or when no font is registered) fall back
/// to [`FixedAdvanceMeasurer`].
#[derive(Clone, Debug, Default)]
pub struct FontMeasurer {
    fonts: Vec<FontData>,
    fallback: FixedAdvanceMeasurer,
}

impl FontMeasurer {
    /// Creates a measurer with no fonts registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a font and returns the handle that selects it.
    ///
    /// The data is validated eagerly so later measurement never fails.
    pub fn register(&mut self, font: FontData) -> Result<Typeface, FontError> {
        if FontRef::from_index(font.data.as_ref(), font.index).is_err() {
            return Err(FontError { index: font.index });
        }
        let id = u32::try_from(self.fonts.len()).unwrap_or(u32::MAX);
        self.fonts.push(font);
        tracing::debug!(typeface = id, "registered font");
        Ok(Typeface(id))
    }

    /// Number of registered fonts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Returns `true` if no font has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    fn font_for(&self, typeface: Option<Typeface>) -> Option<&FontData> {
        match typeface {
            Some(Typeface(id)) => self.fonts.get(id as usize),
            None => self.fonts.first(),
        }
    }
}

impl TextMeasurer for FontMeasurer {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "font sizes comfortably fit in f32"
    )]
    fn measure(&self, line: &str, style: &TextStyle) -> Size {
        if line.is_empty() {
            return Size::ZERO;
        }
        let Some(font) = self.font_for(style.typeface) else {
            return self.fallback.measure(line, style);
        };
        let Ok(font_ref) = FontRef::from_index(font.data.as_ref(), font.index) else {
            return self.fallback.measure(line, style);
        };
        let size_px = style.size as f32;
        let charmap = font_ref.charmap();
        let metrics = GlyphMetrics::new(&font_ref, FontSize::new(size_px), LocationRef::default());

        let mut pen_x = 0.0_f32;
        let mut bounds: Option<(f32, f32, f32, f32)> = None;
        for ch in line.chars() {
            let Some(gid) = charmap.map(ch) else {
                pen_x += size_px * 0.6;
                continue;
            };
            if let Some(bb) = metrics.bounds(gid) {
                // Font units are y-up; flip into screen space.
                let (x0, x1) = (pen_x + bb.x_min, pen_x + bb.x_max);
                let (y0, y1) = (-bb.y_max, -bb.y_min);
                bounds = Some(match bounds {
                    None => (x0, y0, x1, y1),
                    Some((a0, b0, a1, b1)) => (a0.min(x0), b0.min(y0), a1.max(x1), b1.max(y1)),
                });
            }
            pen_x += metrics.advance_width(gid).unwrap_or(size_px * 0.6);
        }

        match bounds {
            Some((x0, y0, x1, y1)) => Size::new(f64::from(x1 - x0), f64::from(y1 - y0)),
            // Only whitespace: no ink, but keep the advance so the line has width.
            None => Size::new(f64::from(pen_x), 0.0),
        }
    }
}
