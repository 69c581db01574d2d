// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The command-reconciliation state machine.

use crate::command::Command;
use crate::config::ButtonLayout;
use crate::control::SpeedCurve;
use crate::driver::OutputDriver;
use crate::error::InvalidCommand;
use crate::protocol::StatusPublisher;
use crate::state::{OutputState, ResolvedTarget};
use crate::types::Preset;

/// Unifies bus commands and button edges into one output state.
///
/// Every accepted command runs the same pipeline: resolve a target, drive
/// the actuator, update the owned [`OutputState`], publish the three status
/// frames. Faults never escape — undecodable commands and refused driver
/// writes both resolve to "no state change".
///
/// The reconciler is the only writer of the output state; it runs on the
/// single control-loop thread and holds the actuator exclusively.
///
/// # Examples
///
/// ```no_run
/// use purifan::command::Command;
/// use purifan::config::ButtonLayout;
/// use purifan::control::{CommandReconciler, SpeedCurve};
/// use purifan::driver::SysfsPwm;
/// use purifan::protocol::{MqttStatusPublisher, TopicSet};
/// use purifan::types::Preset;
/// use rumqttc::{AsyncClient, MqttOptions};
///
/// let options = MqttOptions::new("a4cf12e9", "broker.local", 1883);
/// let (client, _event_loop) = AsyncClient::new(options, 10);
/// let topics = TopicSet::new("purifier", "a4cf12e9");
/// let driver = SysfsPwm::open("/sys/class/pwm/pwmchip0/pwm0")?;
/// let mut reconciler = CommandReconciler::new(
///     SpeedCurve::default(),
///     ButtonLayout::OneButton,
///     driver,
///     MqttStatusPublisher::new(client, topics),
/// );
/// reconciler.handle(Command::Preset(Preset::Low));
/// # Ok::<(), purifan::error::DriverError>(())
/// ```
#[derive(Debug)]
pub struct CommandReconciler<D, P> {
    curve: SpeedCurve,
    layout: ButtonLayout,
    state: OutputState,
    driver: D,
    publisher: P,
}

impl<D: OutputDriver, P: StatusPublisher> CommandReconciler<D, P> {
    /// Creates a reconciler in the all-off boot state.
    pub fn new(curve: SpeedCurve, layout: ButtonLayout, driver: D, publisher: P) -> Self {
        Self {
            curve,
            layout,
            state: OutputState::off(),
            driver,
            publisher,
        }
    }

    /// Returns the current output state.
    #[must_use]
    pub const fn state(&self) -> OutputState {
        self.state
    }

    /// Runs one command through the pipeline.
    ///
    /// Returns the new state when the command was applied, or `None` when
    /// it was discarded (invalid input or refused driver write). Identical
    /// consecutive commands are applied and published again each time; the
    /// actuator write is idempotent and observers rely on the echo.
    pub fn handle(&mut self, command: Command) -> Option<OutputState> {
        let target = match self.resolve(command) {
            Ok(target) => target,
            Err(reason) => {
                tracing::debug!(reason = %reason, ?command, "Discarding command");
                return None;
            }
        };
        if let Err(error) = self.driver.apply(target.frequency(), target.duty()) {
            tracing::warn!(error = %error, "Output apply failed, keeping previous state");
            return None;
        }
        self.state = target.state();
        tracing::debug!(state = %self.state, frequency = %target.frequency(), "Command applied");
        self.publisher.publish(&self.state);
        Some(self.state)
    }

    /// Publishes the current state without changing it.
    ///
    /// Used once at startup so observers see the boot state before any
    /// command arrives.
    pub fn publish_state(&mut self) {
        self.publisher.publish(&self.state);
    }

    fn resolve(&self, command: Command) -> Result<ResolvedTarget, InvalidCommand> {
        match command {
            Command::Percentage(percentage) => Ok(self.curve.resolve(percentage)),
            Command::Preset(preset) => Ok(self.curve.resolve_preset(preset)),
            Command::ButtonEdge(level) => match self.layout {
                ButtonLayout::ThreeButton => Preset::from_code(level)
                    .map(|preset| self.curve.resolve_preset(preset))
                    .ok_or(InvalidCommand::UnknownPresetCode(i64::from(level))),
                ButtonLayout::OneButton => {
                    Ok(self.curve.resolve_preset(self.state.preset().next()))
                }
            },
        }
    }
}
