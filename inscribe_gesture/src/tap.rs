// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-pointer tap recognition with spatial and temporal tolerance.
//!
//! A tap is a press and release of one pointer that stays within `slop`
//! pixels of where it went down and lifts within `timeout_ms`. A second
//! pointer landing, or the first one wandering past the slop, cancels it.
//!
//! ```
//! use inscribe_gesture::tap::{TapConfig, TapState};
//! use kurbo::Point;
//!
//! let mut taps = TapState::new(TapConfig::default());
//! taps.on_down(Point::new(10.0, 20.0), 1, 1000);
//! taps.on_move(Point::new(12.0, 21.0));
//! assert_eq!(taps.on_up(Point::new(12.0, 21.0), 1100), Some(Point::new(10.0, 20.0)));
//! ```

use kurbo::Point;

/// Tolerances for tap recognition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TapConfig {
    /// Maximum distance in pixels the pointer may travel.
    pub slop: f64,
    /// Maximum press duration in milliseconds.
    pub timeout_ms: u64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            slop: 8.0,
            timeout_ms: 300,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Press {
    at: Point,
    time_ms: u64,
}

/// Recognizes taps.
#[derive(Clone, Debug)]
pub struct TapState {
    config: TapConfig,
    press: Option<Press>,
}

impl TapState {
    /// Creates a recognizer with the given tolerances.
    #[must_use]
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            press: None,
        }
    }

    /// Current tolerances.
    #[must_use]
    pub fn config(&self) -> TapConfig {
        self.config
    }

    /// A pointer went down; `pointer_count` includes it.
    pub fn on_down(&mut self, at: Point, pointer_count: usize, time_ms: u64) {
        self.press = (pointer_count == 1).then_some(Press { at, time_ms });
    }

    /// The pressed pointer moved.
    pub fn on_move(&mut self, at: Point) {
        if let Some(press) = self.press {
            if (at - press.at).hypot() > self.config.slop {
                self.press = None;
            }
        }
    }

    /// The pointer lifted. Returns where the tap went down if it qualifies.
    pub fn on_up(&mut self, at: Point, time_ms: u64) -> Option<Point> {
        let press = self.press.take()?;
        let within_slop = (at - press.at).hypot() <= self.config.slop;
        let within_time = time_ms.saturating_sub(press.time_ms) <= self.config.timeout_ms;
        (within_slop && within_time).then_some(press.at)
    }

    /// Drops any pending press.
    pub fn cancel(&mut self) {
        self.press = None;
    }
}
