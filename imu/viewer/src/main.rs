use anyhow::{Context, Result};
use clap::Parser;
use imu_viewer::pacing::SystemClock;
use imu_viewer::window::WindowSurface;
use imu_viewer::{ShutdownReason, Visualizer, CUBE};
use mpu6050_ypr::cli::SerialArgs;
use mpu6050_ypr::SerialLineSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Show the orientation reported by an MPU6050 as a rotating cube.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(flatten)]
    serial: SerialArgs,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mpu_visualizer=info,imu_viewer=info,mpu6050_ypr=info".into()
            }),
        )
        .init();

    let args = Args::parse();
    let config = args.serial.to_config();

    let interrupt = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&interrupt);
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))
        .context("Failed to install Ctrl+C handler")?;

    let visualizer = Visualizer::start(
        || SerialLineSource::open(&config),
        || WindowSurface::open(&CUBE),
        SystemClock,
        interrupt,
    )
    .with_context(|| format!("Failed to connect to {}", config.port))?;

    println!("Connected. Reading data...");
    let summary = visualizer.run();

    match summary.reason {
        ShutdownReason::UserQuit => {
            info!(frames = summary.frames, "Window closed");
            Ok(())
        }
        ShutdownReason::Interrupted => {
            println!("Stopping.");
            Ok(())
        }
        ShutdownReason::Failed(e) => {
            Err(anyhow::Error::new(e).context(format!("Lost connection to {}", config.port)))
        }
    }
}
