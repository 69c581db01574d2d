// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device configuration.
//!
//! Configuration is provisioned out-of-band (a setup portal writes a JSON
//! document); this module provides the typed view of that document plus the
//! validation applied before the controller starts. Persistence and the
//! portal itself are not part of this library.

use crate::error::ConfigError;
use crate::types::Frequency;

fn default_broker_port() -> u16 {
    1883
}

fn default_max_frequency() -> u16 {
    crate::control::SpeedCurve::DEFAULT_MAX_HERTZ
}

/// The physical button arrangement of the device.
///
/// The two layouts are mutually exclusive and fixed per hardware variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonLayout {
    /// Three momentary buttons, one per running level; releasing all of
    /// them stops the fan.
    ThreeButton,
    /// A single button; each press advances to the next preset in cyclic
    /// order.
    OneButton,
}

impl ButtonLayout {
    /// Returns the configuration string for this layout.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ThreeButton => "three_button",
            Self::OneButton => "one_button",
        }
    }
}

/// Configuration for one fan device.
///
/// # Examples
///
/// ```
/// use purifan::config::{ButtonLayout, DeviceConfig};
///
/// let config = DeviceConfig::new(
///     "192.168.1.50",
///     "purifier",
///     "a4cf12e9",
///     "bedroom_purifier",
///     ButtonLayout::ThreeButton,
/// )
/// .with_credentials("fan", "secret");
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DeviceConfig {
    /// Broker host name or IP address.
    pub broker_host: String,
    /// Broker TCP port (default 1883).
    #[serde(default = "default_broker_port")]
    pub broker_port: u16,
    /// Optional broker user name.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional broker password.
    #[serde(default)]
    pub password: Option<String>,
    /// Device family name; first component of every bus topic.
    pub device_type: String,
    /// Unique device identifier; bus client id and second topic component.
    pub device_id: String,
    /// Entity identifier for the automation hub; the display name is
    /// derived from it.
    pub entity_id: String,
    /// Physical button arrangement.
    pub layout: ButtonLayout,
    /// Highest PWM frequency the motor may be driven at (default 300 Hz).
    #[serde(default = "default_max_frequency")]
    pub max_frequency: u16,
}

impl DeviceConfig {
    /// Creates a configuration with default port and frequency ceiling.
    #[must_use]
    pub fn new(
        broker_host: impl Into<String>,
        device_type: impl Into<String>,
        device_id: impl Into<String>,
        entity_id: impl Into<String>,
        layout: ButtonLayout,
    ) -> Self {
        Self {
            broker_host: broker_host.into(),
            broker_port: default_broker_port(),
            username: None,
            password: None,
            device_type: device_type.into(),
            device_id: device_id.into(),
            entity_id: entity_id.into(),
            layout,
            max_frequency: default_max_frequency(),
        }
    }

    /// Sets broker credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the broker TCP port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.broker_port = port;
        self
    }

    /// Sets the PWM frequency ceiling.
    #[must_use]
    pub fn with_max_frequency(mut self, hertz: u16) -> Self {
        self.max_frequency = hertz;
        self
    }

    /// Parses and validates a provisioned JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the document does not parse, or any
    /// [`validate`](Self::validate) error for unusable values.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for missing or unusable values.
    ///
    /// Identity fields flow into bus topic strings, so they must be
    /// non-empty and free of the bus wildcard and separator characters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` for absent required values and
    /// `ConfigError::Invalid` for present but unusable ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.broker_host.is_empty() {
            return Err(ConfigError::Missing("broker_host"));
        }
        if self.broker_port == 0 {
            return Err(ConfigError::Invalid {
                field: "broker_port",
                message: "port must be non-zero".to_string(),
            });
        }
        Self::check_topic_component("device_type", &self.device_type)?;
        Self::check_topic_component("device_id", &self.device_id)?;
        if self.entity_id.is_empty() {
            return Err(ConfigError::Missing("entity_id"));
        }
        if Frequency::new(self.max_frequency).is_err() {
            return Err(ConfigError::Invalid {
                field: "max_frequency",
                message: format!(
                    "{} is outside [{}, {}] Hz",
                    self.max_frequency,
                    Frequency::MIN,
                    Frequency::MAX
                ),
            });
        }
        Ok(())
    }

    fn check_topic_component(field: &'static str, value: &str) -> Result<(), ConfigError> {
        if value.is_empty() {
            return Err(ConfigError::Missing(field));
        }
        if value.contains(['/', '+', '#']) || value.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                field,
                message: format!("{value:?} is not usable in a topic"),
            });
        }
        Ok(())
    }

    /// Returns broker credentials when both parts are configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) => Some((user, pass)),
            _ => None,
        }
    }
}
