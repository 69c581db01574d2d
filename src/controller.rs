// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The top-level control loop joining bus, buttons and output.

use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::command::Command;
use crate::config::DeviceConfig;
use crate::control::{CommandReconciler, SpeedCurve};
use crate::discovery::Announcement;
use crate::driver::OutputDriver;
use crate::error::{Error, InvalidCommand};
use crate::input::{ButtonPad, ButtonPort};
use crate::protocol::{
    BusSession, ConnectionSupervisor, InboundMessage, MqttSession, MqttStatusPublisher,
    StatusPublisher, TopicSet,
};
use crate::state::OutputState;

/// Interval between control loop ticks.
///
/// Both the bus and the buttons are sampled once per tick, so this also
/// bounds how quickly a command takes effect.
pub const POLL_PERIOD: Duration = Duration::from_millis(500);

/// Single-threaded controller for one fan.
///
/// Each tick drains the broker session, applies any decoded commands,
/// then samples the buttons. All paths converge on the same
/// [`CommandReconciler`], so bus and button commands can never disagree
/// about the fan's state.
///
/// # Examples
///
/// ```no_run
/// use purifan::{ButtonLayout, ButtonPort, DeviceConfig, FanController, SysfsPwm};
///
/// struct Gpio;
///
/// impl ButtonPort for Gpio {
///     fn is_pressed(&mut self, _index: u8) -> bool {
///         false
///     }
/// }
///
/// # async fn demo() -> Result<(), purifan::Error> {
/// let config = DeviceConfig::new(
///     "broker.local",
///     "purifier",
///     "a4cf12e9",
///     "bedroom_fan",
///     ButtonLayout::ThreeButton,
/// );
/// let driver = SysfsPwm::open("/sys/class/pwm/pwmchip0/pwm0")?;
/// let mut controller = FanController::connect(&config, driver, Gpio).await?;
/// controller.run().await;
/// # Ok(())
/// # }
/// ```
pub struct FanController<D, B, S, P> {
    reconciler: CommandReconciler<D, P>,
    pad: ButtonPad<B>,
    supervisor: ConnectionSupervisor<S>,
    topics: TopicSet,
}

impl<D, B> FanController<D, B, MqttSession, MqttStatusPublisher>
where
    D: OutputDriver,
    B: ButtonPort,
{
    /// Connects to the broker and brings the fan online.
    ///
    /// Runs the full startup sequence: validate the configuration,
    /// connect and subscribe, publish the all-off status, announce the
    /// fan for discovery and mark it available.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is unusable and
    /// `Error::Protocol` if the broker cannot be reached.
    pub async fn connect(config: &DeviceConfig, driver: D, port: B) -> Result<Self, Error> {
        config.validate()?;

        let topics = TopicSet::new(&config.device_type, &config.device_id);
        let mut session = MqttSession::connect(config, topics.clone()).await?;
        let publisher = MqttStatusPublisher::new(session.client(), topics.clone());

        let curve = SpeedCurve::new(config.max_frequency);
        let mut reconciler = CommandReconciler::new(curve, config.layout, driver, publisher);
        reconciler.publish_state();

        session.announce(&Announcement::new(config, &topics)).await?;
        tracing::info!(device_id = %config.device_id, "Fan controller started");

        Ok(Self {
            reconciler,
            pad: ButtonPad::new(port, config.layout),
            supervisor: ConnectionSupervisor::new(session),
            topics,
        })
    }
}

impl<D, B, S, P> FanController<D, B, S, P>
where
    D: OutputDriver,
    B: ButtonPort,
    S: BusSession,
    P: StatusPublisher,
{
    /// Assembles a controller from pre-built parts.
    ///
    /// `connect` is the usual entry point; this constructor exists for
    /// callers that manage their own session or transport.
    #[must_use]
    pub fn from_parts(
        reconciler: CommandReconciler<D, P>,
        pad: ButtonPad<B>,
        supervisor: ConnectionSupervisor<S>,
        topics: TopicSet,
    ) -> Self {
        Self {
            reconciler,
            pad,
            supervisor,
            topics,
        }
    }

    /// Returns the state the controller last applied.
    #[must_use]
    pub const fn state(&self) -> OutputState {
        self.reconciler.state()
    }

    /// Returns whether the broker session is currently healthy.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.supervisor.is_online()
    }

    /// Runs one control cycle: drain the bus, then sample the buttons.
    ///
    /// Bus errors are absorbed here; a fan with a dead broker session
    /// keeps answering its buttons.
    pub async fn step(&mut self) {
        match self.supervisor.poll_incoming().await {
            Ok(messages) => {
                for message in messages {
                    self.apply_inbound(&message);
                }
            }
            Err(_) => {
                // Already logged by the supervisor; buttons are still
                // served below.
            }
        }

        if let Some(command) = self.pad.poll() {
            self.reconciler.handle(command);
        }
    }

    /// Runs the control loop until the owning task is cancelled.
    pub async fn run(&mut self) {
        let mut ticker = tokio::time::interval(POLL_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.step().await;
        }
    }

    fn apply_inbound(&mut self, message: &InboundMessage) {
        match decode_inbound(&self.topics, message) {
            Ok(command) => {
                self.reconciler.handle(command);
            }
            Err(reason) => {
                tracing::debug!(
                    reason = %reason,
                    topic = %message.topic,
                    "Discarding inbound message"
                );
            }
        }
    }
}

/// Routes an inbound message to its channel and decodes the payload.
fn decode_inbound(
    topics: &TopicSet,
    message: &InboundMessage,
) -> Result<Command, InvalidCommand> {
    let channel = topics
        .channel_for(&message.topic)
        .ok_or_else(|| InvalidCommand::UnmappedTopic(message.topic.clone()))?;
    Command::decode(channel, &message.payload)
}
