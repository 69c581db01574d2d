// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Home Assistant MQTT discovery announcements.
//!
//! A fan announces itself once at startup by publishing a JSON document
//! to the `homeassistant/fan/<device_id>/config` topic. Home Assistant
//! reads the abbreviated keys and creates a fan entity wired to the
//! device's command and state topics.

use serde::Serialize;

use crate::config::DeviceConfig;
use crate::error::ProtocolError;
use crate::protocol::{AVAILABILITY_OFFLINE, AVAILABILITY_ONLINE, TopicSet};
use crate::types::Preset;

/// Manufacturer string reported in the discovery device block.
const MANUFACTURER: &str = "purifan";

/// The discovery document for one fan entity.
///
/// Field names follow Home Assistant's abbreviated MQTT discovery keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    #[serde(skip)]
    topic: String,
    name: String,
    #[serde(rename = "uniq_id")]
    unique_id: String,
    #[serde(rename = "obj_id")]
    object_id: String,
    #[serde(rename = "avty_t")]
    availability_topic: String,
    #[serde(rename = "pl_avail")]
    payload_available: String,
    #[serde(rename = "pl_not_avail")]
    payload_not_available: String,
    #[serde(rename = "stat_t")]
    state_topic: String,
    #[serde(rename = "cmd_t")]
    command_topic: String,
    #[serde(rename = "pct_stat_t")]
    percentage_state_topic: String,
    #[serde(rename = "pct_cmd_t")]
    percentage_command_topic: String,
    #[serde(rename = "pr_mode_stat_t")]
    preset_mode_state_topic: String,
    #[serde(rename = "pr_mode_cmd_t")]
    preset_mode_command_topic: String,
    #[serde(rename = "pr_modes")]
    preset_modes: Vec<Preset>,
    device: DeviceInfo,
}

/// Device registry entry grouping the fan's entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct DeviceInfo {
    #[serde(rename = "ids")]
    identifiers: [String; 2],
    #[serde(rename = "mf")]
    manufacturer: String,
    model: String,
    name: String,
    #[serde(rename = "sw")]
    software_version: String,
}

impl Announcement {
    /// Builds the discovery document for a configured device.
    #[must_use]
    pub fn new(config: &DeviceConfig, topics: &TopicSet) -> Self {
        Self {
            topic: format!("homeassistant/fan/{}/config", config.device_id),
            name: friendly_name(&config.entity_id),
            unique_id: config.device_id.clone(),
            object_id: config.entity_id.clone(),
            availability_topic: topics.availability().to_string(),
            payload_available: AVAILABILITY_ONLINE.to_string(),
            payload_not_available: AVAILABILITY_OFFLINE.to_string(),
            state_topic: topics.state().to_string(),
            command_topic: topics.power_command().to_string(),
            percentage_state_topic: topics.speed_state().to_string(),
            percentage_command_topic: topics.speed_command().to_string(),
            preset_mode_state_topic: topics.mode_state().to_string(),
            preset_mode_command_topic: topics.mode_command().to_string(),
            preset_modes: Preset::ALL.to_vec(),
            device: DeviceInfo {
                identifiers: [config.device_type.clone(), config.device_id.clone()],
                manufacturer: MANUFACTURER.to_string(),
                model: capitalize(&config.device_type),
                name: format!("{} air purifier", capitalize(&config.device_type)),
                software_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// Returns the discovery topic this document must be published to.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Serializes the document to its wire form.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Encoding` if serialization fails.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Derives a display name from an entity identifier.
///
/// Underscores become spaces and the first letter is uppercased, so
/// `bedroom_fan` reads as `Bedroom fan`.
fn friendly_name(entity_id: &str) -> String {
    capitalize(&entity_id.replace('_', " "))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
