// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end control scenarios over in-memory fakes.
//!
//! These tests drive the public controller API through multi-step
//! sessions mixing bus commands and button presses, asserting the exact
//! output frames a fan would see.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use purifan::{
    BusSession, ButtonLayout, ButtonPad, ButtonPort, CommandReconciler, ConnectionSupervisor,
    DriverError, Duty, FanController, Frequency, InboundMessage, OutputDriver, OutputState,
    Preset, ProtocolError, SpeedCurve, StatusPublisher, TopicSet,
};

#[derive(Default)]
struct RecordingDriver {
    applied: Vec<(u16, u16)>,
}

impl OutputDriver for RecordingDriver {
    fn apply(&mut self, frequency: Frequency, duty: Duty) -> Result<(), DriverError> {
        self.applied.push((frequency.value(), duty.value()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingPublisher {
    frames: Vec<(String, String, String)>,
}

impl StatusPublisher for RecordingPublisher {
    fn publish(&mut self, state: &OutputState) {
        self.frames.push((
            state.power().to_string(),
            state.percentage().to_string(),
            state.preset().to_string(),
        ));
    }
}

#[derive(Clone, Default)]
struct SharedPort {
    pressed: Rc<Cell<[bool; 3]>>,
}

impl SharedPort {
    fn press(&self, index: usize) {
        let mut levels = self.pressed.get();
        levels[index] = true;
        self.pressed.set(levels);
    }

    fn release_all(&self) {
        self.pressed.set([false; 3]);
    }
}

impl ButtonPort for SharedPort {
    fn is_pressed(&mut self, index: u8) -> bool {
        self.pressed.get()[usize::from(index)]
    }
}

#[derive(Default)]
struct ScriptedSession {
    drains: VecDeque<Result<Vec<InboundMessage>, ProtocolError>>,
    broken: bool,
    reconnect_calls: Rc<Cell<u32>>,
}

impl ScriptedSession {
    fn delivering(
        batches: impl IntoIterator<Item = Vec<InboundMessage>>,
    ) -> Self {
        Self {
            drains: batches.into_iter().map(Ok).collect(),
            ..Self::default()
        }
    }

    fn always_broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }
}

impl BusSession for ScriptedSession {
    async fn drain(&mut self) -> Result<Vec<InboundMessage>, ProtocolError> {
        if self.broken {
            return Err(ProtocolError::Disconnected);
        }
        self.drains.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn reconnect(&mut self) -> Result<(), ProtocolError> {
        self.reconnect_calls.set(self.reconnect_calls.get() + 1);
        Err(ProtocolError::Disconnected)
    }
}

fn message(topic: &str, payload: &[u8]) -> InboundMessage {
    InboundMessage::new(topic, payload.to_vec())
}

type TestController<'a> = FanController<
    &'a mut RecordingDriver,
    SharedPort,
    ScriptedSession,
    &'a mut RecordingPublisher,
>;

fn controller<'a>(
    layout: ButtonLayout,
    driver: &'a mut RecordingDriver,
    publisher: &'a mut RecordingPublisher,
    port: SharedPort,
    session: ScriptedSession,
) -> TestController<'a> {
    let reconciler = CommandReconciler::new(
        SpeedCurve::new(SpeedCurve::DEFAULT_MAX_HERTZ),
        layout,
        driver,
        publisher,
    );
    FanController::from_parts(
        reconciler,
        ButtonPad::new(port, layout),
        ConnectionSupervisor::new(session),
        TopicSet::new("purifier", "a4cf12e9"),
    )
}

#[tokio::test]
async fn three_button_session_walkthrough() {
    let mut driver = RecordingDriver::default();
    let mut publisher = RecordingPublisher::default();
    let port = SharedPort::default();
    let session = ScriptedSession::delivering([
        vec![message("/purifier/a4cf12e9/speed_set/", b"66")],
        vec![message("/purifier/a4cf12e9/mode_set/", b"high")],
        vec![message("/purifier/a4cf12e9/set/", b"OFF")],
    ]);
    let mut controller = controller(
        ButtonLayout::ThreeButton,
        &mut driver,
        &mut publisher,
        port.clone(),
        session,
    );

    controller.step().await;
    assert_eq!(controller.state().preset(), Preset::Medium);

    controller.step().await;
    assert_eq!(controller.state().preset(), Preset::High);
    assert_eq!(controller.state().percentage().value(), 100);

    controller.step().await;
    assert!(!controller.state().is_on());

    // The lowest button takes over after the network turned the fan off.
    port.press(0);
    controller.step().await;
    assert_eq!(controller.state().preset(), Preset::Low);

    port.release_all();
    controller.step().await;
    assert!(!controller.state().is_on());

    drop(controller);
    assert_eq!(
        driver.applied,
        vec![(225, 512), (300, 512), (1, 0), (152, 512), (1, 0)]
    );
    assert_eq!(
        publisher.frames,
        vec![
            ("ON".to_string(), "66".to_string(), "medium".to_string()),
            ("ON".to_string(), "100".to_string(), "high".to_string()),
            ("OFF".to_string(), "0".to_string(), "off".to_string()),
            ("ON".to_string(), "33".to_string(), "low".to_string()),
            ("OFF".to_string(), "0".to_string(), "off".to_string()),
        ]
    );
}

#[tokio::test]
async fn one_button_cycles_through_every_preset() {
    let mut driver = RecordingDriver::default();
    let mut publisher = RecordingPublisher::default();
    let port = SharedPort::default();
    let mut controller = controller(
        ButtonLayout::OneButton,
        &mut driver,
        &mut publisher,
        port.clone(),
        ScriptedSession::delivering([]),
    );

    let mut seen = Vec::new();
    for _ in 0..5 {
        port.press(0);
        controller.step().await;
        seen.push(controller.state().preset());
        port.release_all();
        controller.step().await;
    }

    assert_eq!(
        seen,
        vec![
            Preset::Low,
            Preset::Medium,
            Preset::High,
            Preset::Off,
            Preset::Low
        ]
    );
    drop(controller);
    // Releases produce no edge in the one-button layout.
    assert_eq!(driver.applied.len(), 5);
}

#[tokio::test]
async fn one_button_advances_from_network_set_state() {
    let mut driver = RecordingDriver::default();
    let mut publisher = RecordingPublisher::default();
    let port = SharedPort::default();
    let session =
        ScriptedSession::delivering([vec![message("/purifier/a4cf12e9/speed_set/", b"50")]]);
    let mut controller = controller(
        ButtonLayout::OneButton,
        &mut driver,
        &mut publisher,
        port.clone(),
        session,
    );

    controller.step().await;
    assert_eq!(controller.state().preset(), Preset::Medium);

    port.press(0);
    controller.step().await;

    // The cycle continues from where the network left the fan.
    assert_eq!(controller.state().preset(), Preset::High);
}

#[tokio::test]
async fn percentage_and_preset_commands_stay_distinct_at_low() {
    let mut speed_driver = RecordingDriver::default();
    let mut speed_publisher = RecordingPublisher::default();
    let session =
        ScriptedSession::delivering([vec![message("/purifier/a4cf12e9/speed_set/", b"33")]]);
    let mut by_speed = controller(
        ButtonLayout::ThreeButton,
        &mut speed_driver,
        &mut speed_publisher,
        SharedPort::default(),
        session,
    );
    by_speed.step().await;
    drop(by_speed);

    let mut mode_driver = RecordingDriver::default();
    let mut mode_publisher = RecordingPublisher::default();
    let session =
        ScriptedSession::delivering([vec![message("/purifier/a4cf12e9/mode_set/", b"low")]]);
    let mut by_mode = controller(
        ButtonLayout::ThreeButton,
        &mut mode_driver,
        &mut mode_publisher,
        SharedPort::default(),
        session,
    );
    by_mode.step().await;
    drop(by_mode);

    // 33% resolves through the curve, the low preset through the table.
    assert_eq!(speed_driver.applied, vec![(153, 512)]);
    assert_eq!(mode_driver.applied, vec![(152, 512)]);
}

#[tokio::test]
async fn reconnect_attempts_stop_after_the_budget() {
    let mut driver = RecordingDriver::default();
    let mut publisher = RecordingPublisher::default();
    let session = ScriptedSession::always_broken();
    let reconnects = Rc::clone(&session.reconnect_calls);
    let port = SharedPort::default();
    let mut controller = controller(
        ButtonLayout::ThreeButton,
        &mut driver,
        &mut publisher,
        port.clone(),
        session,
    );

    for _ in 0..20 {
        controller.step().await;
    }

    assert_eq!(reconnects.get(), 5);
    assert!(!controller.is_online());

    // Buttons keep working in the degraded state.
    port.press(2);
    controller.step().await;
    assert_eq!(controller.state().preset(), Preset::High);
}
