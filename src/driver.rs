// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Actuator output.
//!
//! The reconciler drives the motor through the [`OutputDriver`] trait;
//! [`SysfsPwm`] implements it over the Linux PWM class. Platforms with a
//! different actuator path implement the trait themselves.

use std::path::PathBuf;

use crate::error::DriverError;
use crate::types::{Duty, Frequency};

/// Applies resolved output targets to the physical actuator.
///
/// Implementations must be idempotent: applying the same target twice in a
/// row leaves the hardware in the same state and is not an error.
pub trait OutputDriver {
    /// Drives the actuator to the given frequency and duty.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverError`] when the hardware rejects the write; the
    /// caller keeps its previous state in that case.
    fn apply(&mut self, frequency: Frequency, duty: Duty) -> Result<(), DriverError>;
}

impl<T: OutputDriver + ?Sized> OutputDriver for &mut T {
    fn apply(&mut self, frequency: Frequency, duty: Duty) -> Result<(), DriverError> {
        (**self).apply(frequency, duty)
    }
}

/// PWM output through the Linux sysfs PWM class.
///
/// Expects the path of an already exported channel directory (for example
/// `/sys/class/pwm/pwmchip0/pwm0`) containing the `period`, `duty_cycle`
/// and `enable` attributes. Opening the driver parks the channel at the
/// idle frequency with zero duty and enables it; "off" keeps the channel
/// enabled at zero duty.
///
/// # Examples
///
/// ```no_run
/// use purifan::driver::SysfsPwm;
///
/// let driver = SysfsPwm::open("/sys/class/pwm/pwmchip0/pwm0")?;
/// # Ok::<(), purifan::error::DriverError>(())
/// ```
#[derive(Debug)]
pub struct SysfsPwm {
    channel_dir: PathBuf,
}

impl SysfsPwm {
    /// Opens an exported PWM channel and parks it at idle.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::NotAvailable` if the channel directory lacks
    /// the PWM attributes, or `DriverError::Io` if the initial writes fail.
    pub fn open(channel_dir: impl Into<PathBuf>) -> Result<Self, DriverError> {
        let channel_dir = channel_dir.into();
        for attribute in ["period", "duty_cycle", "enable"] {
            if !channel_dir.join(attribute).exists() {
                return Err(DriverError::NotAvailable(
                    channel_dir.display().to_string(),
                ));
            }
        }
        let mut driver = Self { channel_dir };
        driver.apply(Frequency::IDLE, Duty::OFF)?;
        driver.write_attribute("enable", 1)?;
        tracing::debug!(channel = %driver.channel_dir.display(), "PWM channel opened");
        Ok(driver)
    }

    fn write_attribute(&self, attribute: &str, value: u64) -> Result<(), DriverError> {
        std::fs::write(self.channel_dir.join(attribute), value.to_string())?;
        Ok(())
    }
}

impl OutputDriver for SysfsPwm {
    fn apply(&mut self, frequency: Frequency, duty: Duty) -> Result<(), DriverError> {
        let period_ns = frequency.period_ns();
        let duty_ns = period_ns * u64::from(duty.value()) / u64::from(Duty::MAX);
        // The kernel rejects a duty_cycle wider than the period, so zero it
        // before the period changes.
        self.write_attribute("duty_cycle", 0)?;
        self.write_attribute("period", period_ns)?;
        self.write_attribute("duty_cycle", duty_ns)?;
        tracing::trace!(
            frequency = %frequency,
            duty = %duty,
            period_ns,
            duty_ns,
            "PWM target written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn scratch_channel() -> PathBuf {
        static SEQ: AtomicU32 = AtomicU32::new(0);
        let dir = std::env::temp_dir().join(format!(
            "purifan-pwm-{}-{}",
            std::process::id(),
            SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::create_dir_all(&dir).unwrap();
        for attribute in ["period", "duty_cycle", "enable"] {
            std::fs::write(dir.join(attribute), "0").unwrap();
        }
        dir
    }

    fn read_attribute(dir: &std::path::Path, attribute: &str) -> String {
        std::fs::read_to_string(dir.join(attribute)).unwrap()
    }

    #[test]
    fn open_requires_pwm_attributes() {
        let missing = std::env::temp_dir().join("purifan-pwm-does-not-exist");
        assert!(matches!(
            SysfsPwm::open(missing),
            Err(DriverError::NotAvailable(_))
        ));
    }

    #[test]
    fn open_parks_channel_at_idle() {
        let dir = scratch_channel();
        SysfsPwm::open(&dir).unwrap();
        assert_eq!(read_attribute(&dir, "period"), "1000000000");
        assert_eq!(read_attribute(&dir, "duty_cycle"), "0");
        assert_eq!(read_attribute(&dir, "enable"), "1");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn apply_writes_scaled_values() {
        let dir = scratch_channel();
        let mut driver = SysfsPwm::open(&dir).unwrap();
        driver
            .apply(Frequency::new(190).unwrap(), Duty::ON)
            .unwrap();
        assert_eq!(read_attribute(&dir, "period"), "5263157");
        assert_eq!(read_attribute(&dir, "duty_cycle"), "2634151");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn apply_is_repeatable() {
        let dir = scratch_channel();
        let mut driver = SysfsPwm::open(&dir).unwrap();
        for _ in 0..2 {
            driver.apply(Frequency::new(225).unwrap(), Duty::ON).unwrap();
        }
        assert_eq!(read_attribute(&dir, "period"), "4444444");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
