// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `purifan` - network-attached speed control for PWM fan hardware.
//!
//! This library reconciles fan commands from two sources, an MQTT broker
//! and physical buttons, into a single PWM output and mirrors every
//! accepted change back to the network as status publications.
//!
//! # Supported Features
//!
//! - **Power control**: ON/OFF commands with preset keyword aliases
//! - **Speed control**: percentages mapped onto a linear frequency curve
//! - **Preset modes**: off/low/medium/high with cyclic button stepping
//! - **Discovery**: Home Assistant MQTT discovery with availability
//! - **Resilience**: bounded reconnects, button control survives outages
//!
//! # Quick Start
//!
//! ```no_run
//! use purifan::{ButtonLayout, ButtonPort, DeviceConfig, FanController, SysfsPwm};
//!
//! struct Gpio;
//!
//! impl ButtonPort for Gpio {
//!     fn is_pressed(&mut self, _index: u8) -> bool {
//!         false
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> purifan::Result<()> {
//!     let config = DeviceConfig::new(
//!         "broker.local",
//!         "purifier",
//!         "a4cf12e9",
//!         "bedroom_fan",
//!         ButtonLayout::ThreeButton,
//!     )
//!     .with_credentials("fan", "secret");
//!
//!     let driver = SysfsPwm::open("/sys/class/pwm/pwmchip0/pwm0")?;
//!     let mut controller = FanController::connect(&config, driver, Gpio).await?;
//!     controller.run().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration from JSON
//!
//! ```
//! # fn main() -> purifan::Result<()> {
//! use purifan::DeviceConfig;
//!
//! let config = DeviceConfig::from_json(
//!     r#"{
//!         "broker_host": "broker.local",
//!         "device_type": "purifier",
//!         "device_id": "a4cf12e9",
//!         "entity_id": "bedroom_fan",
//!         "layout": "three_button"
//!     }"#,
//! )?;
//! assert_eq!(config.broker_port, 1883);
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod control;
mod controller;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod input;
pub mod protocol;
pub mod state;
pub mod types;

pub use command::{Command, CommandChannel};
pub use config::{ButtonLayout, DeviceConfig};
pub use control::{CommandReconciler, SpeedCurve};
pub use controller::{FanController, POLL_PERIOD};
pub use discovery::Announcement;
pub use driver::{OutputDriver, SysfsPwm};
pub use error::{
    ConfigError, DriverError, Error, InvalidCommand, ProtocolError, Result, ValueError,
};
pub use input::{ButtonPad, ButtonPort};
pub use protocol::{
    BusSession, ConnectionSupervisor, InboundMessage, MqttSession, MqttStatusPublisher,
    StatusPublisher, TopicSet,
};
pub use state::{OutputState, ResolvedTarget};
pub use types::{Duty, Frequency, Percentage, PowerState, Preset};
