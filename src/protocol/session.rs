// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broker session establishment and event draining.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, LastWill, MqttOptions, Packet, QoS};

use super::{BusSession, InboundMessage, TopicSet};
use crate::config::DeviceConfig;
use crate::discovery::Announcement;
use crate::error::ProtocolError;

/// Availability payload published while the session is healthy.
pub const AVAILABILITY_ONLINE: &str = "online";

/// Availability payload installed as the broker-side last will.
pub const AVAILABILITY_OFFLINE: &str = "offline";

/// How long to wait for the initial `CONNACK`.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a single reconnect attempt may take.
const RECONNECT_WINDOW: Duration = Duration::from_secs(3);

/// Grace period granted to each event-loop poll while draining.
const DRAIN_GRACE: Duration = Duration::from_millis(25);

/// Upper bound on events absorbed per drain call.
const DRAIN_EVENT_LIMIT: usize = 32;

/// Broker keep-alive interval.
const KEEP_ALIVE: Duration = Duration::from_secs(30);

/// A connected MQTT session for one fan device.
///
/// The session subscribes to the device's command topics on connect and
/// installs a retained `offline` last will so the broker marks the fan
/// unavailable if the connection drops without a clean shutdown.
pub struct MqttSession {
    client: AsyncClient,
    event_loop: EventLoop,
    topics: TopicSet,
}

impl MqttSession {
    /// Connects to the broker and subscribes to the command topics.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Timeout` if the broker does not acknowledge
    /// the connection within 10 seconds, or `ProtocolError::Connection` if
    /// the transport fails outright.
    pub async fn connect(config: &DeviceConfig, topics: TopicSet) -> Result<Self, ProtocolError> {
        let options = mqtt_options(config, &topics);
        let (client, event_loop) = AsyncClient::new(options, 10);
        let mut session = Self {
            client,
            event_loop,
            topics,
        };

        session.await_connack(CONNECT_TIMEOUT).await?;
        session.subscribe_commands().await?;
        tracing::info!(
            host = %config.broker_host,
            port = config.broker_port,
            "Connected to MQTT broker"
        );
        Ok(session)
    }

    /// Returns a clonable handle to the underlying MQTT client.
    #[must_use]
    pub fn client(&self) -> AsyncClient {
        self.client.clone()
    }

    /// Publishes the discovery announcement, then marks the fan online.
    ///
    /// The availability marker is retained so late subscribers see the
    /// current state without waiting for a refresh.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Encoding` if the announcement cannot be
    /// serialized, or an MQTT error if the publish cannot be queued.
    pub async fn announce(&mut self, announcement: &Announcement) -> Result<(), ProtocolError> {
        let payload = announcement.to_json()?;
        self.client
            .publish(announcement.topic(), QoS::AtMostOnce, false, payload)
            .await?;
        self.publish_online();
        tracing::info!(topic = %announcement.topic(), "Discovery announcement published");
        Ok(())
    }

    /// Drives the event loop until a `CONNACK` arrives or the window closes.
    async fn await_connack(&mut self, window: Duration) -> Result<(), ProtocolError> {
        let wait = async {
            loop {
                match self.event_loop.poll().await {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => return Ok(()),
                    Ok(_) => {}
                    Err(error) => return Err(ProtocolError::from(error)),
                }
            }
        };
        match tokio::time::timeout(window, wait).await {
            Ok(result) => result,
            Err(_) => Err(ProtocolError::Timeout(
                u64::try_from(window.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }

    async fn subscribe_commands(&mut self) -> Result<(), ProtocolError> {
        for topic in self.topics.command_topics() {
            self.client.subscribe(topic, QoS::AtMostOnce).await?;
        }
        tracing::debug!("Subscribed to command topics");
        Ok(())
    }

    /// Refreshes the retained availability marker.
    fn publish_online(&self) {
        let topic = self.topics.availability();
        if let Err(error) = self
            .client
            .try_publish(topic, QoS::AtMostOnce, true, AVAILABILITY_ONLINE)
        {
            tracing::warn!(error = %error, topic = %topic, "Availability publish unconfirmed");
        }
    }

    async fn absorb(
        &mut self,
        event: Event,
        inbound: &mut Vec<InboundMessage>,
    ) -> Result<(), ProtocolError> {
        match event {
            Event::Incoming(Packet::Publish(publish)) => {
                tracing::debug!(
                    topic = %publish.topic,
                    bytes = publish.payload.len(),
                    "Message received"
                );
                inbound.push(InboundMessage::new(publish.topic, publish.payload.to_vec()));
            }
            Event::Incoming(Packet::ConnAck(_)) => {
                // The event loop reconnected underneath us; the broker has
                // forgotten our subscriptions and availability.
                tracing::info!("Broker session re-established");
                self.subscribe_commands().await?;
                self.publish_online();
            }
            Event::Incoming(Packet::SubAck(_)) => {
                tracing::debug!("Subscription confirmed");
            }
            Event::Incoming(Packet::Disconnect) => {
                tracing::warn!("Broker requested disconnect");
            }
            _ => {}
        }
        Ok(())
    }
}

impl BusSession for MqttSession {
    async fn drain(&mut self) -> Result<Vec<InboundMessage>, ProtocolError> {
        let mut inbound = Vec::new();
        for _ in 0..DRAIN_EVENT_LIMIT {
            match tokio::time::timeout(DRAIN_GRACE, self.event_loop.poll()).await {
                Err(_) => break,
                Ok(Ok(event)) => self.absorb(event, &mut inbound).await?,
                Ok(Err(error)) => return Err(error.into()),
            }
        }
        Ok(inbound)
    }

    async fn reconnect(&mut self) -> Result<(), ProtocolError> {
        tracing::debug!("Attempting broker reconnect");
        self.await_connack(RECONNECT_WINDOW).await?;
        self.subscribe_commands().await?;
        self.publish_online();
        tracing::info!("Reconnected to MQTT broker");
        Ok(())
    }
}

/// Builds the MQTT options for a device session.
///
/// The device identifier doubles as the MQTT client identifier, matching
/// the one-session-per-device model.
fn mqtt_options(config: &DeviceConfig, topics: &TopicSet) -> MqttOptions {
    let mut options = MqttOptions::new(
        &config.device_id,
        &config.broker_host,
        config.broker_port,
    );
    options.set_keep_alive(KEEP_ALIVE);
    options.set_clean_session(true);
    options.set_last_will(LastWill::new(
        topics.availability(),
        AVAILABILITY_OFFLINE,
        QoS::AtMostOnce,
        true,
    ));
    if let Some((username, password)) = config.credentials() {
        options.set_credentials(username, password);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ButtonLayout;

    fn config() -> DeviceConfig {
        DeviceConfig::new(
            "broker.local",
            "purifier",
            "a4cf12e9",
            "bedroom_fan",
            ButtonLayout::ThreeButton,
        )
    }

    #[test]
    fn options_use_device_identity() {
        let config = config();
        let topics = TopicSet::new(&config.device_type, &config.device_id);
        let options = mqtt_options(&config, &topics);

        assert_eq!(options.client_id(), "a4cf12e9");
        assert_eq!(options.broker_address(), ("broker.local".to_string(), 1883));
    }

    #[test]
    fn options_install_offline_last_will() {
        let config = config();
        let topics = TopicSet::new(&config.device_type, &config.device_id);
        let options = mqtt_options(&config, &topics);

        let will = options.last_will().unwrap();
        assert_eq!(will.topic, "/purifier/a4cf12e9/availability/");
        assert_eq!(will.message.as_ref(), b"offline");
        assert!(will.retain);
    }

    #[test]
    fn options_carry_credentials_when_both_present() {
        let config = config().with_credentials("fan", "secret");
        let topics = TopicSet::new(&config.device_type, &config.device_id);
        let options = mqtt_options(&config, &topics);

        assert_eq!(
            options.credentials(),
            Some(rumqttc::Login::new("fan", "secret"))
        );
    }
}
