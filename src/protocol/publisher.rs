// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status publication.
//!
//! After every accepted command the device reports three values: power
//! state, speed percentage, and preset label, in exactly that order —
//! observers infer "on-ness" from the first frame before reading the
//! percentage. Publishing is fire-and-forget and never blocks the control
//! loop.

use rumqttc::{AsyncClient, QoS};

use crate::protocol::TopicSet;
use crate::state::OutputState;

/// Emits the canonical status frames for an output state.
pub trait StatusPublisher {
    /// Publishes the three status values in the fixed order.
    ///
    /// Failures are absorbed by the implementation; a missed status frame
    /// degrades observability, never control.
    fn publish(&mut self, state: &OutputState);
}

impl<T: StatusPublisher + ?Sized> StatusPublisher for &mut T {
    fn publish(&mut self, state: &OutputState) {
        (**self).publish(state);
    }
}

fn status_frames<'a>(topics: &'a TopicSet, state: &OutputState) -> [(&'a str, String); 3] {
    [
        (topics.state(), state.power().as_str().to_string()),
        (topics.speed_state(), state.percentage().to_string()),
        (topics.mode_state(), state.preset().label().to_string()),
    ]
}

/// Publishes status frames over MQTT.
///
/// Uses the client's non-blocking publish path; a full request queue or a
/// down session leaves the frame unconfirmed and is only logged. Frames are
/// not retained — the availability marker is the retained signal.
#[derive(Debug, Clone)]
pub struct MqttStatusPublisher {
    client: AsyncClient,
    topics: TopicSet,
}

impl MqttStatusPublisher {
    /// Creates a publisher for the given client and topic set.
    #[must_use]
    pub fn new(client: AsyncClient, topics: TopicSet) -> Self {
        Self { client, topics }
    }

    fn send(&self, topic: &str, payload: String) {
        if let Err(error) = self
            .client
            .try_publish(topic, QoS::AtMostOnce, false, payload)
        {
            tracing::warn!(topic = %topic, error = %error, "Status publish unconfirmed");
        } else {
            tracing::debug!(topic = %topic, "Status published");
        }
    }
}

impl StatusPublisher for MqttStatusPublisher {
    fn publish(&mut self, state: &OutputState) {
        for (topic, payload) in status_frames(&self.topics, state) {
            self.send(topic, payload);
        }
    }
}
