// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inscribe Layer: transformable multi-line text blocks over an image.
//!
//! This crate provides the geometric model behind a text overlay:
//! - [`TextLayer`]: one text block with its measured lines, translation,
//!   rotation about a pivot, and a uniform scale clamped to font-size limits.
//! - [`LayerStack`]: an ordered stack of layers where only the topmost one
//!   is *active*.
//! - [`geometry`]: the clamp helper, rectangle union and the single
//!   definition of the rotation sign convention.
//! - [`TextMeasurer`]: the seam through which lines are measured.
//!
//! It does **not** draw anything or decode images. The image rectangle is
//! supplied by the caller, already in view coordinates; renderers read
//! [`TextLayer::line_placements`] to draw each line.
//!
//! ## Minimal example
//!
//! ```rust
//! use inscribe_layer::{FixedAdvanceMeasurer, SizeLimits, TextLayer, TextStyle};
//! use kurbo::{Point, Rect};
//!
//! let measurer = FixedAdvanceMeasurer::default();
//! let mut layer = TextLayer::new(TextStyle::with_size(40.0), SizeLimits::new(10.0, 200.0), 0.0);
//! layer.set_text(Some("Hello\nWorld"), &measurer);
//! layer.set_position(Point::new(100.0, 50.0));
//!
//! let image = Rect::new(0.0, 0.0, 1000.0, 500.0);
//! let bounds = layer.enclosing_rect(image).unwrap();
//! assert_eq!(bounds.origin(), Point::new(100.0, 50.0));
//!
//! // Scaling is clamped into the size limits.
//! layer.apply_scale_factor(100.0, &measurer);
//! assert_eq!(layer.effective_size(), 200.0);
//! ```
//!
//! ## Features
//!
//! - `skrifa`: a [`FontMeasurer`] that measures with real font data.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

pub mod geometry;

#[cfg(feature = "skrifa")]
mod font;
mod layer;
mod measure;
mod stack;
mod style;

#[cfg(feature = "skrifa")]
pub use font::{FontError, FontMeasurer};
pub use layer::{LinePlacement, SizeLimits, TextLayer};
pub use measure::{FixedAdvanceMeasurer, TextMeasurer};
pub use stack::{LayerId, LayerStack};
pub use style::{DropShadow, TextStyle, Typeface};
