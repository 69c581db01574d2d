// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Percentage-to-output mapping.

use crate::state::ResolvedTarget;
use crate::types::{Duty, Frequency, Percentage, Preset};

/// Maps speed requests to PWM output targets.
///
/// Two resolution paths exist and deliberately stay separate: arbitrary
/// percentages go through the linear frequency formula, discrete presets use
/// the tuned mode-table values. The table's Low entry (152 Hz) is one hertz
/// below what the formula yields at 33%; unifying the paths would shift
/// observed motor behavior at the preset boundaries.
///
/// # Examples
///
/// ```
/// use purifan::control::SpeedCurve;
/// use purifan::types::{Percentage, Preset};
///
/// let curve = SpeedCurve::default();
///
/// let target = curve.resolve(Percentage::new(50).unwrap());
/// assert_eq!(target.frequency().value(), 190);
/// assert_eq!(target.preset(), Preset::Medium);
///
/// let low = curve.resolve_preset(Preset::Low);
/// assert_eq!(low.frequency().value(), 152);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedCurve {
    max_frequency: Frequency,
}

impl SpeedCurve {
    /// Default PWM frequency ceiling in hertz.
    pub const DEFAULT_MAX_HERTZ: u16 = 300;

    /// Creates a curve with the given frequency ceiling, clamped to the
    /// hardware PWM range.
    #[must_use]
    pub const fn new(max_hertz: u16) -> Self {
        Self {
            max_frequency: Frequency::clamped(max_hertz),
        }
    }

    /// Returns the configured frequency ceiling.
    #[must_use]
    pub const fn max_frequency(&self) -> Frequency {
        self.max_frequency
    }

    /// Resolves an arbitrary percentage to an output target.
    ///
    /// A non-zero percentage maps to `round(percentage * 2.2 + 80)` hertz,
    /// clamped to `[1, max_frequency]`, at the fixed running duty; zero
    /// resolves to the off row of the mode table. The reported preset is the
    /// percentage bucket (over 66 high, over 33 medium, over 0 low).
    #[must_use]
    pub fn resolve(&self, percentage: Percentage) -> ResolvedTarget {
        if percentage.is_zero() {
            return self.resolve_preset(Preset::Off);
        }
        let raw = (f64::from(percentage.value()) * 2.2 + 80.0).round();
        // Safe: raw is within [82, 300] for valid percentages
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let hertz = raw as u16;
        let frequency = Frequency::clamped(hertz.min(self.max_frequency.value()));
        ResolvedTarget::new(frequency, Duty::ON, percentage, percentage.bucket())
    }

    /// Resolves a discrete preset through the mode table.
    ///
    /// Table frequencies are used verbatim, except that the configured
    /// ceiling still applies when it is set below a table entry.
    #[must_use]
    pub fn resolve_preset(&self, preset: Preset) -> ResolvedTarget {
        let hertz = preset.frequency().value().min(self.max_frequency.value());
        ResolvedTarget::new(
            Frequency::clamped(hertz),
            preset.duty(),
            preset.percentage(),
            preset,
        )
    }
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_HERTZ)
    }
}
