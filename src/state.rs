// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output state of the fan.
//!
//! One [`OutputState`] value is the single authority on what the device
//! currently reports; it is mutated only by the
//! [`CommandReconciler`](crate::control::CommandReconciler) and read by the
//! status publisher.

use std::fmt;

use crate::types::{Duty, Frequency, Percentage, PowerState, Preset};

/// The externally visible state of the fan.
///
/// Invariant: `percentage == 0`, `power == Off` and `preset == Off` always
/// hold together. The invariant is kept by construction — values only enter
/// through [`ResolvedTarget`], whose producers derive all three fields from
/// one source.
///
/// # Examples
///
/// ```
/// use purifan::state::OutputState;
///
/// let state = OutputState::off();
/// assert!(!state.is_on());
/// assert_eq!(state.percentage().value(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputState {
    power: PowerState,
    percentage: Percentage,
    preset: Preset,
}

impl OutputState {
    /// Returns the all-off state the device boots into.
    #[must_use]
    pub const fn off() -> Self {
        Self {
            power: PowerState::Off,
            percentage: Percentage::ZERO,
            preset: Preset::Off,
        }
    }

    /// Returns the reported power state.
    #[must_use]
    pub const fn power(&self) -> PowerState {
        self.power
    }

    /// Returns the reported speed percentage.
    #[must_use]
    pub const fn percentage(&self) -> Percentage {
        self.percentage
    }

    /// Returns the reported preset.
    #[must_use]
    pub const fn preset(&self) -> Preset {
        self.preset
    }

    /// Returns whether the motor is running.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.power.is_on()
    }
}

impl Default for OutputState {
    fn default() -> Self {
        Self::off()
    }
}

impl fmt::Display for OutputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% {}", self.power, self.percentage, self.preset)
    }
}

/// A fully resolved output target.
///
/// Produced by [`SpeedCurve`](crate::control::SpeedCurve) resolution; pairs
/// the physical drive values (frequency, duty) with the reported state they
/// imply. Constructing one outside the resolution paths is not possible, so
/// the [`OutputState`] invariant cannot be broken here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTarget {
    frequency: Frequency,
    duty: Duty,
    percentage: Percentage,
    preset: Preset,
}

impl ResolvedTarget {
    pub(crate) const fn new(
        frequency: Frequency,
        duty: Duty,
        percentage: Percentage,
        preset: Preset,
    ) -> Self {
        Self {
            frequency,
            duty,
            percentage,
            preset,
        }
    }

    /// Returns the PWM frequency to drive.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the PWM duty to drive.
    #[must_use]
    pub const fn duty(&self) -> Duty {
        self.duty
    }

    /// Returns the power state this target implies.
    #[must_use]
    pub const fn power(&self) -> PowerState {
        self.preset.power()
    }

    /// Returns the percentage this target reports.
    #[must_use]
    pub const fn percentage(&self) -> Percentage {
        self.percentage
    }

    /// Returns the preset this target reports.
    #[must_use]
    pub const fn preset(&self) -> Preset {
        self.preset
    }

    /// Returns the reported state for this target.
    #[must_use]
    pub const fn state(&self) -> OutputState {
        OutputState {
            power: self.power(),
            percentage: self.percentage,
            preset: self.preset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_state_is_off() {
        let state = OutputState::off();
        assert_eq!(state.power(), PowerState::Off);
        assert_eq!(state.percentage(), Percentage::ZERO);
        assert_eq!(state.preset(), Preset::Off);
        assert_eq!(OutputState::default(), state);
    }

    #[test]
    fn target_projects_state() {
        let target = ResolvedTarget::new(
            Frequency::clamped(190),
            Duty::ON,
            Percentage::clamped(50),
            Preset::Medium,
        );
        let state = target.state();
        assert!(state.is_on());
        assert_eq!(state.percentage().value(), 50);
        assert_eq!(state.preset(), Preset::Medium);
    }

    #[test]
    fn display_format() {
        let state = OutputState::off();
        assert_eq!(state.to_string(), "OFF 0% off");
    }
}
