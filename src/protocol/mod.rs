// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MQTT transport for command intake and status publication.
//!
//! This module owns everything that touches the broker: topic layout,
//! session establishment, inbound message draining and outbound status
//! frames.
//!
//! # Components
//!
//! - [`TopicSet`]: the per-device topic family
//! - [`MqttSession`]: a connected broker session with last-will wiring
//! - [`ConnectionSupervisor`]: bounded reconnect policy around a session
//! - [`MqttStatusPublisher`]: fire-and-forget status frame publication

mod publisher;
mod session;
mod supervisor;
mod topics;

pub use publisher::{MqttStatusPublisher, StatusPublisher};
pub use session::{AVAILABILITY_OFFLINE, AVAILABILITY_ONLINE, MqttSession};
pub use supervisor::ConnectionSupervisor;
pub use topics::TopicSet;

use crate::error::ProtocolError;

/// A message received from the broker, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// The topic the message arrived on.
    pub topic: String,
    /// The raw payload bytes.
    pub payload: Vec<u8>,
}

impl InboundMessage {
    /// Creates an inbound message from a topic and raw payload.
    #[must_use]
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

/// Trait for broker sessions that deliver inbound messages.
///
/// The control loop polls the session once per tick and never blocks on
/// it; implementations must bound how long a single call can take.
#[allow(async_fn_in_trait)]
pub trait BusSession {
    /// Collects the messages that arrived since the last call.
    ///
    /// Returns an empty vector when nothing is pending.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the session is no longer usable.
    async fn drain(&mut self) -> Result<Vec<InboundMessage>, ProtocolError>;

    /// Makes one bounded attempt to re-establish the session.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the attempt does not complete in time.
    async fn reconnect(&mut self) -> Result<(), ProtocolError>;
}
