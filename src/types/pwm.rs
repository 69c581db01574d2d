// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PWM output value types.
//!
//! This module provides the frequency and duty-cycle values handed to the
//! actuator driver. Ranges match the motor controller hardware: frequency
//! stays within the 1 kHz PWM ceiling, duty uses a 10-bit scale.

use std::fmt;

use crate::error::ValueError;

/// PWM frequency in hertz (1-1000).
///
/// The motor never runs below 1 Hz; "off" is expressed through a zero duty
/// cycle, not a zero frequency.
///
/// # Examples
///
/// ```
/// use purifan::types::Frequency;
///
/// let freq = Frequency::new(190).unwrap();
/// assert_eq!(freq.value(), 190);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Frequency(u16);

impl Frequency {
    /// Minimum frequency value.
    pub const MIN: u16 = 1;

    /// Maximum frequency value (hardware PWM ceiling).
    pub const MAX: u16 = 1000;

    /// The frequency used while the fan is off.
    pub const IDLE: Self = Self(1);

    /// Creates a new frequency value.
    ///
    /// # Arguments
    ///
    /// * `hertz` - The frequency in Hz (1-1000)
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the value is outside [1, 1000].
    pub fn new(hertz: u16) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&hertz) {
            return Err(ValueError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: hertz,
            });
        }
        Ok(Self(hertz))
    }

    /// Creates a frequency, clamping to the valid range.
    #[must_use]
    pub const fn clamped(hertz: u16) -> Self {
        if hertz < Self::MIN {
            Self(Self::MIN)
        } else if hertz > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(hertz)
        }
    }

    /// Returns the frequency in Hz.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns the PWM period in nanoseconds.
    #[must_use]
    pub fn period_ns(&self) -> u64 {
        1_000_000_000 / u64::from(self.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Frequency {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// PWM duty cycle on a 10-bit scale (0-1023).
///
/// The fan hardware runs at a fixed half-power duty whenever the motor is
/// on; speed is controlled through frequency, not duty. The two operating
/// points are exposed as [`Duty::OFF`] and [`Duty::ON`].
///
/// # Examples
///
/// ```
/// use purifan::types::Duty;
///
/// assert_eq!(Duty::ON.value(), 512);
/// assert_eq!(Duty::OFF.value(), 0);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Duty(u16);

impl Duty {
    /// Minimum duty value.
    pub const MIN: u16 = 0;

    /// Maximum duty value (10-bit scale).
    pub const MAX: u16 = 1023;

    /// Zero duty: motor stopped.
    pub const OFF: Self = Self(0);

    /// The fixed running duty.
    pub const ON: Self = Self(512);

    /// Creates a new duty value.
    ///
    /// # Arguments
    ///
    /// * `value` - The duty cycle (0-1023)
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the value is greater than 1023.
    pub fn new(value: u16) -> Result<Self, ValueError> {
        if value > Self::MAX {
            return Err(ValueError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Creates a duty value, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u16) -> Self {
        if value > Self::MAX { Self(Self::MAX) } else { Self(value) }
    }

    /// Returns the duty value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns whether the duty stops the motor.
    #[must_use]
    pub const fn is_off(&self) -> bool {
        self.0 == 0
    }

    /// Returns the duty as a fraction of the full scale.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX)
    }
}

impl Default for Duty {
    fn default() -> Self {
        Self::OFF
    }
}

impl fmt::Display for Duty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Duty {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_valid() {
        assert_eq!(Frequency::new(1).unwrap().value(), 1);
        assert_eq!(Frequency::new(300).unwrap().value(), 300);
        assert_eq!(Frequency::new(1000).unwrap().value(), 1000);
    }

    #[test]
    fn frequency_invalid() {
        assert!(Frequency::new(0).is_err());
        assert!(Frequency::new(1001).is_err());
    }

    #[test]
    fn frequency_clamped() {
        assert_eq!(Frequency::clamped(0).value(), 1);
        assert_eq!(Frequency::clamped(2000).value(), 1000);
        assert_eq!(Frequency::clamped(152).value(), 152);
    }

    #[test]
    fn frequency_period() {
        assert_eq!(Frequency::IDLE.period_ns(), 1_000_000_000);
        assert_eq!(Frequency::new(200).unwrap().period_ns(), 5_000_000);
    }

    #[test]
    fn duty_valid() {
        assert_eq!(Duty::new(0).unwrap(), Duty::OFF);
        assert_eq!(Duty::new(512).unwrap(), Duty::ON);
        assert_eq!(Duty::new(1023).unwrap().value(), 1023);
    }

    #[test]
    fn duty_invalid() {
        assert!(Duty::new(1024).is_err());
    }

    #[test]
    fn duty_classification() {
        assert!(Duty::OFF.is_off());
        assert!(!Duty::ON.is_off());
    }

    #[test]
    fn duty_fraction() {
        assert!((Duty::OFF.fraction() - 0.0).abs() < f64::EPSILON);
        assert!((Duty::ON.fraction() - 512.0 / 1023.0).abs() < f64::EPSILON);
    }
}
