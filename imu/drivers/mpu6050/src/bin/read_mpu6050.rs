use anyhow::{Context, Result};
use clap::Parser;
use mpu6050_ypr::cli::SerialArgs;
use mpu6050_ypr::{InputReader, OrientationState, Poll, SerialLineSource};
use std::thread;
use std::time::Duration;

/// Print yaw/pitch/roll readings from an MPU6050 serial stream.
#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    serial: SerialArgs,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mpu6050_ypr=info,read_mpu6050=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = args.serial.to_config();
    let source = SerialLineSource::open(&config)
        .with_context(|| format!("Failed to connect to {}", config.port))?;
    println!("Successfully connected to {}", source.name());

    let mut reader = InputReader::new(source);
    let mut state = OrientationState::default();

    loop {
        match reader.poll(&mut state)? {
            Poll::Updated(ypr) => println!(
                "yaw: {: >10.3} pitch: {: >10.3} roll: {: >10.3}",
                ypr.yaw, ypr.pitch, ypr.roll
            ),
            Poll::Ignored => {}
            // Nothing buffered yet, so avoid spinning on the port.
            Poll::Idle => thread::sleep(Duration::from_millis(5)),
        }
    }
}
