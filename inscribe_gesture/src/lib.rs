// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inscribe Gesture: multi-touch gesture primitives.
//!
//! This crate provides small state machines that turn raw pointer
//! down/move/up events into gesture signals. Each module handles one
//! pattern:
//!
//! - [`pointers`]: the set of pointers currently down and their centroid
//!   (the *focal point*)
//! - [`focal`]: focal point movement deltas across a touch sequence (pan)
//! - [`scale`]: pinch scale factor per move
//! - [`rotation`]: cumulative two-finger rotation angle
//! - [`tap`]: single-pointer taps with spatial/temporal tolerance
//!
//! None of them know what is being manipulated. They accept pointer
//! positions and produce deltas or signals for a higher layer to apply.
//!
//! ## Feeding the detectors
//!
//! ```rust
//! use inscribe_gesture::pointers::PointerSet;
//! use inscribe_gesture::rotation::{RotationDetector, RotationSignal};
//! use inscribe_gesture::scale::{ScaleDetector, ScaleSignal};
//! use kurbo::Point;
//!
//! let mut pointers = PointerSet::new();
//! let mut scale = ScaleDetector::default();
//! let mut rotation = RotationDetector::new();
//!
//! pointers.down(1_u64, Point::new(0.0, 0.0));
//! pointers.down(2, Point::new(100.0, 0.0));
//! assert_eq!(scale.pointers_changed(&pointers), Some(ScaleSignal::Begin));
//! assert_eq!(rotation.pointers_changed(&pointers), Some(RotationSignal::Begin));
//!
//! // Spread the fingers apart horizontally.
//! pointers.update(&1, Point::new(-50.0, 0.0));
//! pointers.update(&2, Point::new(150.0, 0.0));
//! assert_eq!(scale.pointers_moved(&pointers), Some(ScaleSignal::Update(2.0)));
//! assert_eq!(rotation.pointers_moved(&pointers), Some(RotationSignal::Update(0.0)));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod flags;
pub mod focal;
pub mod pointers;
pub mod rotation;
pub mod scale;
pub mod tap;

pub use flags::GestureFlags;
