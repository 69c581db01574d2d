// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discrete fan presets and their mode table.
//!
//! This module defines the four named operating levels together with the
//! static lookup table tying each level to its reported percentage, PWM
//! frequency, duty cycle, wire label, and numeric code.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;
use crate::types::{Duty, Frequency, Percentage, PowerState};

/// A discrete fan operating level.
///
/// Each preset carries its full mode-table row. The frequency values for
/// [`Low`](Self::Low) and [`Medium`](Self::Medium) are tuned constants and
/// intentionally differ from what the percentage formula yields at 33% and
/// 66%; the two resolution paths stay separate (see
/// [`SpeedCurve`](crate::control::SpeedCurve)).
///
/// # Examples
///
/// ```
/// use purifan::types::Preset;
///
/// let preset = Preset::Medium;
/// assert_eq!(preset.code(), 2);
/// assert_eq!(preset.label(), "medium");
/// assert_eq!(preset.frequency().value(), 225);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Fan stopped.
    #[default]
    Off,
    /// Lowest running level.
    Low,
    /// Middle running level.
    Medium,
    /// Highest running level.
    High,
}

impl Preset {
    /// All presets in code order.
    pub const ALL: [Self; 4] = [Self::Off, Self::Low, Self::Medium, Self::High];

    /// Returns the numeric wire code (0-3).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Looks a preset up by its numeric wire code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    /// Looks a preset up by a wire keyword.
    ///
    /// Matching is exact (no case folding): the lowercase labels plus the
    /// `"ON"`/`"OFF"` power aliases, where `"ON"` selects [`Preset::High`].
    /// Unknown spellings return `None`.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "off" | "OFF" => Some(Self::Off),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" | "ON" => Some(Self::High),
            _ => None,
        }
    }

    /// Returns the lowercase wire label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Returns the percentage reported for this preset.
    #[must_use]
    pub const fn percentage(self) -> Percentage {
        Percentage::clamped(match self {
            Self::Off => 0,
            Self::Low => 33,
            Self::Medium => 66,
            Self::High => 100,
        })
    }

    /// Returns the mode-table PWM frequency for this preset.
    #[must_use]
    pub const fn frequency(self) -> Frequency {
        Frequency::clamped(match self {
            Self::Off => 1,
            Self::Low => 152,
            Self::Medium => 225,
            Self::High => 300,
        })
    }

    /// Returns the PWM duty for this preset.
    #[must_use]
    pub const fn duty(self) -> Duty {
        match self {
            Self::Off => Duty::OFF,
            _ => Duty::ON,
        }
    }

    /// Returns the power state implied by this preset.
    #[must_use]
    pub const fn power(self) -> PowerState {
        match self {
            Self::Off => PowerState::Off,
            _ => PowerState::On,
        }
    }

    /// Returns the next preset in the cyclic button order.
    ///
    /// Off advances to Low, then Medium, High, and back to Off.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::Low,
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Off,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Preset {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s).ok_or_else(|| ValueError::UnknownPreset(s.to_string()))
    }
}
