// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement seam.
//!
//! Layers never shape or rasterize text. Whenever content, font size or
//! typeface changes they ask a [`TextMeasurer`] for a tight bounding box of
//! each line and keep the result.

use kurbo::Size;

use crate::style::TextStyle;

/// Measures the tight bounding box of a single line of text.
pub trait TextMeasurer {
    /// Width and height of `line` when drawn with `style`.
    ///
    /// An empty line measures as [`Size::ZERO`].
    fn measure(&self, line: &str, style: &TextStyle) -> Size;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, line: &str, style: &TextStyle) -> Size {
        (**self).measure(line, style)
    }
}

/// Deterministic measurer with a fixed per-character advance.
///
/// Each `char` advances by `size * advance_em`; a non-empty line is
/// `size * height_em` tall. Useful for tests, previews, and monospaced
/// fonts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance per character, in ems.
    pub advance_em: f64,
    /// Line height, in ems.
    pub height_em: f64,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            height_em: 1.0,
        }
    }
}

impl FixedAdvanceMeasurer {
    /// Creates a measurer with the given advance and height, both in ems.
    #[must_use]
    pub const fn new(advance_em: f64, height_em: f64) -> Self {
        Self {
            advance_em,
            height_em,
        }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    #[allow(
        clippy::cast_precision_loss,
        reason = "line lengths are far below f64's exact integer range"
    )]
    fn measure(&self, line: &str, style: &TextStyle) -> Size {
        let chars = line.chars().count();
        if chars == 0 {
            return Size::ZERO;
        }
        Size::new(
            chars as f64 * self.advance_em * style.size,
            self.height_em * style.size,
        )
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::{FixedAdvanceMeasurer, TextMeasurer};
    use crate::style::TextStyle;

    #[test]
    fn fixed_advance_counts_chars_not_bytes() {
        let m = FixedAdvanceMeasurer::new(0.5, 1.0);
        let style = TextStyle::with_size(20.0);
        assert_eq!(m.measure("abcd", &style), Size::new(40.0, 20.0));
        assert_eq!(m.measure("\u{e9}t\u{e9}", &style), Size::new(30.0, 20.0));
        assert_eq!(m.measure("", &style), Size::ZERO);
    }

    #[test]
    fn reference_forwards() {
        let m = FixedAdvanceMeasurer::default();
        let by_ref: &dyn TextMeasurer = &m;
        let style = TextStyle::with_size(10.0);
        assert_eq!((&by_ref).measure("ab", &style), m.measure("ab", &style));
    }
}
