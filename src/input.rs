// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Physical button input.
//!
//! Buttons are sampled once per control tick; the 500 ms cadence doubles as
//! the debounce interval. [`ButtonPad`] turns raw pressed-state samples into
//! at most one [`Command`] per tick and suppresses repeats while nothing
//! changes, so holding a button never floods the reconciler.

use crate::command::Command;
use crate::config::ButtonLayout;

/// Raw access to the device buttons.
///
/// Index 0 is the only button of the one-button layout; the three-button
/// layout uses indices 0 to 2 for the low, medium and high buttons.
pub trait ButtonPort {
    /// Returns whether the button at `index` is currently held.
    fn is_pressed(&mut self, index: u8) -> bool;
}

impl<T: ButtonPort + ?Sized> ButtonPort for &mut T {
    fn is_pressed(&mut self, index: u8) -> bool {
        (**self).is_pressed(index)
    }
}

/// Layout-aware button sampler.
///
/// For the three-button layout the sampled level is the first held button
/// (1-3) or 0 when none is held; an edge is emitted whenever the level
/// changes, including the release-to-off edge. For the one-button layout an
/// edge is emitted on each press transition only — holding the button does
/// not advance the cycle again.
#[derive(Debug)]
pub struct ButtonPad<B> {
    port: B,
    layout: ButtonLayout,
    last_level: u8,
    last_pressed: bool,
}

impl<B: ButtonPort> ButtonPad<B> {
    /// Creates a pad with all buttons assumed released.
    pub fn new(port: B, layout: ButtonLayout) -> Self {
        Self {
            port,
            layout,
            last_level: 0,
            last_pressed: false,
        }
    }

    /// Samples the buttons once.
    ///
    /// Returns a command only when the sampled state changed since the
    /// previous poll.
    pub fn poll(&mut self) -> Option<Command> {
        match self.layout {
            ButtonLayout::ThreeButton => {
                let level = self.scan_level();
                if level == self.last_level {
                    return None;
                }
                self.last_level = level;
                tracing::debug!(level, "Button level changed");
                Some(Command::ButtonEdge(level))
            }
            ButtonLayout::OneButton => {
                let pressed = self.port.is_pressed(0);
                let edge = pressed && !self.last_pressed;
                self.last_pressed = pressed;
                if edge {
                    tracing::debug!("Button pressed");
                    Some(Command::ButtonEdge(0))
                } else {
                    None
                }
            }
        }
    }

    fn scan_level(&mut self) -> u8 {
        for index in 0..3u8 {
            if self.port.is_pressed(index) {
                return index + 1;
            }
        }
        0
    }
}
