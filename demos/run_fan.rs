// SPDX-License-Identifier: MPL-2.0

//! Test program: run a fan controller against a live MQTT broker.
//!
//! This example demonstrates:
//! - The full startup sequence: connect, subscribe, announce, go online
//! - Driving the control loop with `FanController::run`
//! - Swapping the PWM driver for a console stand-in on machines without
//!   exported PWM channels
//!
//! # Usage
//!
//! ```bash
//! cargo run --example run_fan -- <host> [port] [username] [password]
//! ```
//!
//! # Example
//!
//! ```bash
//! # Without authentication (default port 1883)
//! cargo run --example run_fan -- 192.168.1.50
//!
//! # With authentication
//! cargo run --example run_fan -- 192.168.1.50 1883 mqtt_user mqtt_pass
//! ```
//!
//! Once running, publish commands to the device's topics:
//!
//! ```bash
//! mosquitto_pub -h 192.168.1.50 -t /purifier/demo0001/speed_set/ -m 66
//! mosquitto_pub -h 192.168.1.50 -t /purifier/demo0001/mode_set/ -m high
//! mosquitto_pub -h 192.168.1.50 -t /purifier/demo0001/set/ -m OFF
//! ```

use std::env;

use purifan::{
    ButtonLayout, ButtonPort, DeviceConfig, DriverError, Duty, FanController, Frequency,
    OutputDriver,
};

/// Prints every output frame instead of writing to sysfs.
struct ConsolePwm;

impl OutputDriver for ConsolePwm {
    fn apply(&mut self, frequency: Frequency, duty: Duty) -> Result<(), DriverError> {
        println!("PWM -> {frequency} Hz at duty {duty}/1023");
        Ok(())
    }
}

/// Button port with nothing wired up.
struct NoButtons;

impl ButtonPort for NoButtons {
    fn is_pressed(&mut self, _index: u8) -> bool {
        false
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <host> [port] [username] [password]", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  cargo run --example run_fan -- 192.168.1.50");
        eprintln!("  cargo run --example run_fan -- 192.168.1.50 1883 user pass");
        std::process::exit(1);
    }

    let host = &args[1];
    let port: u16 = args.get(2).and_then(|p| p.parse().ok()).unwrap_or(1883);

    let mut config = DeviceConfig::new(
        host,
        "purifier",
        "demo0001",
        "demo_fan",
        ButtonLayout::ThreeButton,
    )
    .with_port(port);

    if args.len() >= 5 {
        config = config.with_credentials(&args[3], &args[4]);
    }

    println!("Connecting to MQTT broker {host}:{port}...");

    let mut controller = FanController::connect(&config, ConsolePwm, NoButtons).await?;

    println!("Connected! Fan announced as 'Demo fan' (device demo0001).");
    println!();
    println!("Command topics:");
    println!("  /purifier/demo0001/set/        ON | OFF | off | low | medium | high");
    println!("  /purifier/demo0001/speed_set/  0-100");
    println!("  /purifier/demo0001/mode_set/   off | low | medium | high | 0-3");
    println!();
    println!("Running control loop (Ctrl-C to stop)...");

    controller.run().await;
    Ok(())
}
