// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use inscribe_gesture::GestureFlags;
use inscribe_gesture::tap::TapConfig;
use inscribe_layer::{SizeLimits, TextStyle, Typeface};
use kurbo::Rect;
use peniko::Color;

use crate::clamp::ClampMode;

/// Where a newly added layer is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Placement {
    /// Top-left corner of the image.
    #[default]
    Origin,
    /// Centered on the image, when the image rectangle is known.
    Centered,
}

/// Initialization record for a [`crate::TextOverlay`].
///
/// This is the declarative surface a host fills from its own resource or
/// attribute format. Use [`OverlayConfig::validate`] (called by
/// [`crate::TextOverlay::new`]) to check it.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Text of the first layer, if any.
    pub initial_text: Option<String>,
    /// Base font size of new layers, in pixels.
    pub text_size: f64,
    /// Smallest effective font size.
    pub min_text_size: f64,
    /// Largest effective font size.
    pub max_text_size: f64,
    /// Extra vertical space between lines, scaled with the text.
    pub interline_gap: f64,
    /// Fill color of new layers.
    pub text_color: Color,
    /// Typeface of new layers.
    pub typeface: Option<Typeface>,
    /// How layers are kept relative to the image bounds.
    pub clamp_mode: ClampMode,
    /// Gestures that may manipulate the active layer.
    pub gestures: GestureFlags,
    /// Placement of newly added layers.
    pub placement: Placement,
    /// Raise a layer to the top when a touch sequence starts on it.
    pub select_on_touch: bool,
    /// Dropping the active layer here (view coordinates) after a pan removes it.
    pub delete_zone: Option<Rect>,
    /// Maximum travel in pixels for a press to count as a tap.
    pub tap_slop: f64,
    /// Maximum press duration in milliseconds for a tap.
    pub tap_timeout_ms: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        let tap = TapConfig::default();
        Self {
            initial_text: None,
            text_size: 48.0,
            min_text_size: 16.0,
            max_text_size: 256.0,
            interline_gap: 0.0,
            text_color: Color::from_rgba8(0, 0, 0, 0xff),
            typeface: None,
            clamp_mode: ClampMode::default(),
            gestures: GestureFlags::empty(),
            placement: Placement::default(),
            select_on_touch: false,
            delete_zone: None,
            tap_slop: tap.slop,
            tap_timeout_ms: tap.timeout_ms,
        }
    }
}

impl OverlayConfig {
    /// Sets the initial text.
    #[must_use]
    pub fn with_initial_text(mut self, text: impl Into<String>) -> Self {
        self.initial_text = Some(text.into());
        self
    }

    /// Sets the base, minimum and maximum font sizes.
    #[must_use]
    pub fn with_text_sizes(mut self, size: f64, min: f64, max: f64) -> Self {
        self.text_size = size;
        self.min_text_size = min;
        self.max_text_size = max;
        self
    }

    /// Sets the interline gap.
    #[must_use]
    pub fn with_interline_gap(mut self, gap: f64) -> Self {
        self.interline_gap = gap;
        self
    }

    /// Sets the text color.
    #[must_use]
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Sets the typeface.
    #[must_use]
    pub fn with_typeface(mut self, typeface: Option<Typeface>) -> Self {
        self.typeface = typeface;
        self
    }

    /// Sets the clamp mode.
    #[must_use]
    pub fn with_clamp_mode(mut self, mode: ClampMode) -> Self {
        self.clamp_mode = mode;
        self
    }

    /// Sets the enabled gestures.
    #[must_use]
    pub fn with_gestures(mut self, gestures: GestureFlags) -> Self {
        self.gestures = gestures;
        self
    }

    /// Sets the placement of new layers.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Enables or disables raising touched layers.
    #[must_use]
    pub fn with_select_on_touch(mut self, enabled: bool) -> Self {
        self.select_on_touch = enabled;
        self
    }

    /// Sets the delete zone.
    #[must_use]
    pub fn with_delete_zone(mut self, zone: Option<Rect>) -> Self {
        self.delete_zone = zone;
        self
    }

    /// Checks the record for values the overlay cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, v) in [
            ("text_size", self.text_size),
            ("min_text_size", self.min_text_size),
            ("max_text_size", self.max_text_size),
            ("interline_gap", self.interline_gap),
            ("tap_slop", self.tap_slop),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }
        if self.text_size <= 0.0 || self.min_text_size <= 0.0 {
            return Err(ConfigError::NonPositiveTextSize);
        }
        if self.min_text_size > self.max_text_size {
            return Err(ConfigError::InvertedSizeRange {
                min: self.min_text_size,
                max: self.max_text_size,
            });
        }
        if self.interline_gap < 0.0 {
            return Err(ConfigError::NegativeInterlineGap);
        }
        if self.tap_slop < 0.0 {
            return Err(ConfigError::NegativeTapSlop);
        }
        Ok(())
    }

    pub(crate) fn limits(&self) -> SizeLimits {
        SizeLimits::new(self.min_text_size, self.max_text_size)
    }

    pub(crate) fn style(&self) -> TextStyle {
        TextStyle {
            size: self.text_size,
            color: self.text_color,
            typeface: self.typeface,
            shadow: None,
        }
    }

    pub(crate) fn tap(&self) -> TapConfig {
        TapConfig {
            slop: self.tap_slop,
            timeout_ms: self.tap_timeout_ms,
        }
    }
}

/// Error returned by [`OverlayConfig::validate`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A size, gap or tolerance is NaN or infinite.
    NonFinite(&'static str),
    /// The base or minimum text size is zero or negative.
    NonPositiveTextSize,
    /// The minimum text size exceeds the maximum.
    InvertedSizeRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// The interline gap is negative.
    NegativeInterlineGap,
    /// The tap slop is negative.
    NegativeTapSlop,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite(field) => write!(f, "`{field}` must be finite"),
            Self::NonPositiveTextSize => f.write_str("text sizes must be positive"),
            Self::InvertedSizeRange { min, max } => {
                write!(f, "minimum text size {min} exceeds maximum {max}")
            }
            Self::NegativeInterlineGap => f.write_str("interline gap must not be negative"),
            Self::NegativeTapSlop => f.write_str("tap slop must not be negative"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{ConfigError, OverlayConfig};

    #[test]
    fn defaults_are_valid() {
        assert_eq!(OverlayConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_sizes() {
        let c = OverlayConfig::default().with_text_sizes(0.0, 10.0, 20.0);
        assert_eq!(c.validate(), Err(ConfigError::NonPositiveTextSize));

        let c = OverlayConfig::default().with_text_sizes(30.0, 40.0, 20.0);
        assert_eq!(
            c.validate(),
            Err(ConfigError::InvertedSizeRange {
                min: 40.0,
                max: 20.0
            })
        );

        let c = OverlayConfig::default().with_text_sizes(f64::NAN, 10.0, 20.0);
        assert_eq!(c.validate(), Err(ConfigError::NonFinite("text_size")));
    }

    #[test]
    fn rejects_negative_gap_and_slop() {
        let c = OverlayConfig::default().with_interline_gap(-1.0);
        assert_eq!(c.validate(), Err(ConfigError::NegativeInterlineGap));

        let c = OverlayConfig {
            tap_slop: -2.0,
            ..OverlayConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::NegativeTapSlop));
    }

    #[test]
    fn errors_display() {
        let e = ConfigError::InvertedSizeRange {
            min: 40.0,
            max: 20.0,
        };
        assert_eq!(e.to_string(), "minimum text size 40 exceeds maximum 20");
    }
}
