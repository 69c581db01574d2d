// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `purifan` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! value validation, wire-command decoding, bus communication, configuration,
//! and actuator output.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when running a
/// fan controller.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A wire command could not be decoded.
    #[error("invalid command: {0}")]
    Command(#[from] InvalidCommand),

    /// Error occurred during bus communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The device configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The actuator output could not be driven.
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// An unknown preset name was provided.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

/// Reasons a received wire command is discarded.
///
/// Commands that fail to decode are dropped without changing the output
/// state; the reason is logged but never propagated to the bus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidCommand {
    /// The payload is not valid UTF-8.
    #[error("payload is not valid UTF-8")]
    NotUtf8,

    /// The speed channel requires a numeric payload.
    #[error("payload {0:?} is not a number")]
    NotNumeric(String),

    /// A numeric percentage is outside [0, 100].
    #[error("percentage {0} is out of range [0, 100]")]
    PercentageOutOfRange(i64),

    /// A numeric preset code has no table entry.
    #[error("unknown preset code {0}")]
    UnknownPresetCode(i64),

    /// A keyword payload matches no preset alias.
    #[error("unknown preset keyword {0:?}")]
    UnknownPresetKeyword(String),

    /// The message arrived on a topic no command channel is bound to.
    #[error("no command channel for topic {0:?}")]
    UnmappedTopic(String),
}

/// Errors related to bus communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// MQTT client request failed.
    #[error("MQTT error: {0}")]
    Mqtt(#[from] rumqttc::ClientError),

    /// MQTT event loop reported a broken connection.
    #[error("MQTT connection error: {0}")]
    Connection(#[from] rumqttc::ConnectionError),

    /// A wire document could not be encoded.
    #[error("payload encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Connection establishment timed out.
    #[error("connection timed out after {0} ms")]
    Timeout(u64),

    /// The bus session is down and the retry budget is spent.
    #[error("bus connection lost")]
    Disconnected,
}

/// Errors related to device configuration.
///
/// Configuration is provisioned externally; these errors are handed back to
/// the provisioning flow rather than handled inside the control loop.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration value is absent or empty.
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    /// A configuration value is present but unusable.
    #[error("invalid configuration value for {field}: {message}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// The configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to driving the actuator output.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Writing a PWM attribute failed.
    #[error("PWM write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The PWM channel is not present or not exported.
    #[error("PWM channel not available: {0}")]
    NotAvailable(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
