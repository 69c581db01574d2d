// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bus topic layout.
//!
//! All topics follow the fixed pattern `/{device_type}/{device_id}/{suffix}/`
//! including the leading and trailing slash; existing observers subscribe on
//! these exact strings, so the shape is not negotiable.

use crate::command::CommandChannel;

/// The fixed topic strings of one device.
///
/// Derived once from the configured identity at startup and immutable
/// afterwards.
///
/// # Examples
///
/// ```
/// use purifan::protocol::TopicSet;
///
/// let topics = TopicSet::new("purifier", "a4cf12e9");
/// assert_eq!(topics.state(), "/purifier/a4cf12e9/state/");
/// assert_eq!(topics.speed_command(), "/purifier/a4cf12e9/speed_set/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSet {
    state: String,
    power_command: String,
    speed_state: String,
    speed_command: String,
    mode_state: String,
    mode_command: String,
    availability: String,
}

impl TopicSet {
    /// Builds the topic set for a device identity.
    #[must_use]
    pub fn new(device_type: &str, device_id: &str) -> Self {
        let topic = |suffix: &str| format!("/{device_type}/{device_id}/{suffix}/");
        Self {
            state: topic("state"),
            power_command: topic("set"),
            speed_state: topic("speed_state"),
            speed_command: topic("speed_set"),
            mode_state: topic("mode_state"),
            mode_command: topic("mode_set"),
            availability: topic("availability"),
        }
    }

    /// Topic reporting the power state.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Topic receiving on/off commands.
    #[must_use]
    pub fn power_command(&self) -> &str {
        &self.power_command
    }

    /// Topic reporting the speed percentage.
    #[must_use]
    pub fn speed_state(&self) -> &str {
        &self.speed_state
    }

    /// Topic receiving percentage commands.
    #[must_use]
    pub fn speed_command(&self) -> &str {
        &self.speed_command
    }

    /// Topic reporting the current preset.
    #[must_use]
    pub fn mode_state(&self) -> &str {
        &self.mode_state
    }

    /// Topic receiving preset commands.
    #[must_use]
    pub fn mode_command(&self) -> &str {
        &self.mode_command
    }

    /// Topic carrying the retained availability marker.
    #[must_use]
    pub fn availability(&self) -> &str {
        &self.availability
    }

    /// The three topics the device subscribes to.
    #[must_use]
    pub fn command_topics(&self) -> [&str; 3] {
        [&self.power_command, &self.speed_command, &self.mode_command]
    }

    /// Classifies an inbound topic into its command channel.
    #[must_use]
    pub fn channel_for(&self, topic: &str) -> Option<CommandChannel> {
        if topic == self.power_command {
            Some(CommandChannel::Power)
        } else if topic == self.speed_command {
            Some(CommandChannel::Speed)
        } else if topic == self.mode_command {
            Some(CommandChannel::Mode)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_strings_keep_wire_shape() {
        let topics = TopicSet::new("purifier", "a4cf12e9");
        assert_eq!(topics.state(), "/purifier/a4cf12e9/state/");
        assert_eq!(topics.power_command(), "/purifier/a4cf12e9/set/");
        assert_eq!(topics.speed_state(), "/purifier/a4cf12e9/speed_state/");
        assert_eq!(topics.speed_command(), "/purifier/a4cf12e9/speed_set/");
        assert_eq!(topics.mode_state(), "/purifier/a4cf12e9/mode_state/");
        assert_eq!(topics.mode_command(), "/purifier/a4cf12e9/mode_set/");
        assert_eq!(topics.availability(), "/purifier/a4cf12e9/availability/");
    }

    #[test]
    fn channel_classification() {
        let topics = TopicSet::new("purifier", "a4cf12e9");
        assert_eq!(
            topics.channel_for("/purifier/a4cf12e9/set/"),
            Some(CommandChannel::Power)
        );
        assert_eq!(
            topics.channel_for("/purifier/a4cf12e9/speed_set/"),
            Some(CommandChannel::Speed)
        );
        assert_eq!(
            topics.channel_for("/purifier/a4cf12e9/mode_set/"),
            Some(CommandChannel::Mode)
        );
        assert_eq!(topics.channel_for("/purifier/a4cf12e9/state/"), None);
        assert_eq!(topics.channel_for("/other/a4cf12e9/set/"), None);
    }

    #[test]
    fn subscription_list_covers_command_topics() {
        let topics = TopicSet::new("purifier", "a4cf12e9");
        let subs = topics.command_topics();
        assert_eq!(subs.len(), 3);
        for topic in subs {
            assert!(topics.channel_for(topic).is_some());
        }
    }
}
