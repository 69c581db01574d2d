// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed percentage type.
//!
//! This module provides the type-safe percentage value accepted on the speed
//! command channel and reported on the speed status channel.

use std::fmt;

use crate::error::ValueError;
use crate::types::Preset;

/// Fan speed as a percentage (0-100).
///
/// Zero means the fan is off; any non-zero value runs the motor. The
/// percentage also determines the discrete preset bucket reported to
/// observers, see [`bucket()`](Self::bucket).
///
/// # Examples
///
/// ```
/// use purifan::types::{Percentage, Preset};
///
/// let speed = Percentage::new(50).unwrap();
/// assert_eq!(speed.value(), 50);
/// assert_eq!(speed.bucket(), Preset::Medium);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Percentage(u8);

impl Percentage {
    /// Minimum percentage value.
    pub const MIN: u8 = 0;

    /// Maximum percentage value.
    pub const MAX: u8 = 100;

    /// The fan is off.
    pub const ZERO: Self = Self(0);

    /// The fan runs at full speed.
    pub const FULL: Self = Self(100);

    /// Creates a new percentage value.
    ///
    /// # Arguments
    ///
    /// * `value` - The percentage (0-100)
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is greater than 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::MAX {
            return Err(ValueError::OutOfRange {
                min: u16::from(Self::MIN),
                max: u16::from(Self::MAX),
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a percentage, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns whether the percentage means "off".
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the discrete preset this percentage falls into.
    ///
    /// Bucketing rule: above 66 is [`Preset::High`], above 33 is
    /// [`Preset::Medium`], above 0 is [`Preset::Low`], zero is
    /// [`Preset::Off`]. External observers rely on these exact boundaries.
    #[must_use]
    pub const fn bucket(&self) -> Preset {
        if self.0 > 66 {
            Preset::High
        } else if self.0 > 33 {
            Preset::Medium
        } else if self.0 > 0 {
            Preset::Low
        } else {
            Preset::Off
        }
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Percentage {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_valid() {
        for v in 0..=100 {
            let pct = Percentage::new(v).unwrap();
            assert_eq!(pct.value(), v);
        }
    }

    #[test]
    fn percentage_invalid() {
        assert!(Percentage::new(101).is_err());
        assert!(Percentage::new(255).is_err());
    }

    #[test]
    fn percentage_clamped() {
        assert_eq!(Percentage::clamped(150).value(), 100);
        assert_eq!(Percentage::clamped(42).value(), 42);
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(Percentage::new(100).unwrap().bucket(), Preset::High);
        assert_eq!(Percentage::new(67).unwrap().bucket(), Preset::High);
        assert_eq!(Percentage::new(66).unwrap().bucket(), Preset::Medium);
        assert_eq!(Percentage::new(34).unwrap().bucket(), Preset::Medium);
        assert_eq!(Percentage::new(33).unwrap().bucket(), Preset::Low);
        assert_eq!(Percentage::new(1).unwrap().bucket(), Preset::Low);
        assert_eq!(Percentage::new(0).unwrap().bucket(), Preset::Off);
    }

    #[test]
    fn zero_is_off() {
        assert!(Percentage::ZERO.is_zero());
        assert!(!Percentage::FULL.is_zero());
        assert_eq!(Percentage::default(), Percentage::ZERO);
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(Percentage::new(50).unwrap().to_string(), "50");
    }
}
