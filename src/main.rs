//! Gati demo - drives the simulated robot through a reference sequence
//!
//! Usage:
//! - `gati <path>` (positional)
//! - `gati --config <path>` / `gati -c <path>`
//!
//! Defaults to `gati.toml`; built-in sprocket chassis defaults are used when
//! that file does not exist.

use gati::devices::MockMotorDriver;
use gati::{AppConfig, MotionController, Result, StopAction};
use std::env;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Parse config path from command line arguments
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "gati.toml".to_string()
}

fn main() -> Result<()> {
    let config_path = parse_config_path();
    let config_found = Path::new(&config_path).exists();
    let config = if config_found {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("Gati v{} starting...", env!("CARGO_PKG_VERSION"));
    if config_found {
        log::info!("Using config: {}", config_path);
    } else {
        log::info!("Config {} not found, using sprocket defaults", config_path);
    }

    let geometry = config.chassis.geometry()?;
    let motors = MockMotorDriver::with_config(config.simulation.clone());
    let mut robot =
        MotionController::new(Arc::new(motors), geometry).with_brake(config.motion.brake);
    let speed = config.motion.default_speed;

    // Let the sampling thread observe the end of the last move
    let settle = || thread::sleep(Duration::from_millis(config.odometry.sample_interval_ms * 4 + 10));

    robot.turn_right(speed, 90.0)?;
    robot.straight(speed, 500.0)?;
    robot.arc_right(speed, 150.0, 700.0)?;

    robot.start_odometry(config.odometry.start_params())?;

    robot.go_to_coordinate(speed, 300.0, 300.0)?;
    settle();
    robot.go_to_coordinate(speed, 0.0, 0.0)?;
    settle();
    robot.turn_to_angle(speed, 90.0)?;
    settle();

    robot.stop_odometry();
    robot.stop(StopAction::Coast)?;

    let pose = robot.pose();
    let encoders = robot.encoder_sample();
    println!(
        "Final pose: x={:.1}mm y={:.1}mm heading={:.1}° (encoders L={} R={})",
        pose.x_mm,
        pose.y_mm,
        pose.heading_deg(),
        encoders.left_ticks,
        encoders.right_ticks
    );

    Ok(())
}
