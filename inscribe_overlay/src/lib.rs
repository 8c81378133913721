// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inscribe Overlay: gesture-driven text layers over an image.
//!
//! This crate ties [`inscribe_layer`] and [`inscribe_gesture`] together:
//! - [`TextOverlay`]: the host-facing facade owning a layer stack, the
//!   current image rectangle and the gesture controller.
//! - [`GestureFusionController`]: applies pan, pinch and rotation to the
//!   active layer, once per pointer event.
//! - [`ClampMode`] and [`reclamp`]: keep the active layer relative to the
//!   image bounds and report its normalized position.
//! - [`OverlayConfig`]: the plain initialization record.
//!
//! ## Example
//!
//! ```rust
//! use inscribe_gesture::GestureFlags;
//! use inscribe_layer::FixedAdvanceMeasurer;
//! use inscribe_overlay::{ClampMode, OverlayConfig, PointerEvent, TextOverlay};
//! use kurbo::{Point, Rect};
//!
//! let config = OverlayConfig::default()
//!     .with_text_sizes(50.0, 10.0, 200.0)
//!     .with_clamp_mode(ClampMode::TextInside)
//!     .with_gestures(GestureFlags::all());
//! let mut overlay: TextOverlay<_> =
//!     TextOverlay::new(config, FixedAdvanceMeasurer::default()).unwrap();
//! overlay.set_image_rect(Rect::new(0.0, 0.0, 1000.0, 500.0));
//! overlay.add_text("Hello\nWorld");
//!
//! // Drag the text with one finger.
//! overlay.handle_pointer(PointerEvent::Down {
//!     id: 1,
//!     position: Point::new(10.0, 10.0),
//!     time_ms: 0,
//! });
//! let outcome = overlay.handle_pointer(PointerEvent::Move {
//!     pointers: &[(1, Point::new(110.0, 60.0))],
//!     time_ms: 16,
//! });
//! assert_eq!(outcome.moved, Some(Point::new(0.1, 0.1)));
//! overlay.handle_pointer(PointerEvent::Up {
//!     id: 1,
//!     position: Point::new(110.0, 60.0),
//!     time_ms: 400,
//! });
//! ```
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod clamp;
mod config;
mod controller;
mod overlay;

pub use clamp::{ClampMode, clamp_layer, local_enclosing_rect, normalized_position, reclamp};
pub use config::{ConfigError, OverlayConfig, Placement};
pub use controller::{
    GestureFusionController, GestureOutcome, GestureSettings, GestureState, GestureTarget,
    PointerEvent,
};
pub use overlay::{TextMovedHandler, TextOverlay, TextSnapshot};
