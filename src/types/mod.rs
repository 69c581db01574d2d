// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for fan control.
//!
//! This module provides type-safe representations of the values flowing
//! through the command pipeline. Each type ensures values are within their
//! valid ranges at construction time, preventing runtime errors.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off state as reported on the wire
//! - [`Percentage`] - Fan speed percentage (0-100)
//! - [`Preset`] - Discrete operating level with its static mode table
//! - [`Frequency`] - PWM frequency in hertz (1-1000)
//! - [`Duty`] - PWM duty cycle (0-1023)

mod percentage;
mod power;
mod preset;
mod pwm;

pub use percentage::Percentage;
pub use power::PowerState;
pub use preset::Preset;
pub use pwm::{Duty, Frequency};
