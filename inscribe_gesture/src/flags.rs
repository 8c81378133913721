// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Gestures a controller is allowed to apply.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct GestureFlags: u8 {
        /// One or more fingers drag the content.
        const PAN    = 0b0000_0001;
        /// Pinch changes the content's scale.
        const SCALE  = 0b0000_0010;
        /// Two-finger twist rotates the content.
        const ROTATE = 0b0000_0100;
    }
}

impl Default for GestureFlags {
    fn default() -> Self {
        Self::empty()
    }
}
