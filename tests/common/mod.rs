//! Test utilities for Gati integration tests.

#![allow(dead_code)]

use gati::devices::mock::{MockConfig, MockMotorDriver};
use gati::{MotionController, Pose, Wheel, WheelGeometry};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Axle track of the reference chassis (mm).
pub const AXLE_TRACK_MM: f64 = 121.7;

/// Reference chassis: 42mm sprocket wheels, 121.7mm axle track.
pub fn geometry() -> WheelGeometry {
    WheelGeometry::from_wheel(Wheel::sprocket(), AXLE_TRACK_MM).unwrap()
}

/// Controller over an instant mock (motion completes without delay).
pub fn instant_robot() -> (MockMotorDriver, MotionController) {
    robot(MockConfig::default())
}

/// Controller over a mock that paces motion in real time, so the
/// odometry thread sees every step of a move.
pub fn paced_robot() -> (MockMotorDriver, MotionController) {
    robot(MockConfig {
        step_degrees: 5.0,
        step_delay_ms: 1,
        ..MockConfig::default()
    })
}

pub fn robot(config: MockConfig) -> (MockMotorDriver, MotionController) {
    let motors = MockMotorDriver::with_config(config);
    let controller = MotionController::new(Arc::new(motors.clone()), geometry());
    (motors, controller)
}

/// Poll `pose` until `predicate` holds or five seconds pass.
pub fn wait_for_pose(pose: impl Fn() -> Pose, predicate: impl Fn(&Pose) -> bool) -> Pose {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let current = pose();
        if predicate(&current) || Instant::now() > deadline {
            return current;
        }
        thread::sleep(Duration::from_millis(1));
    }
}

/// Give the sampling thread time to integrate the last move.
pub fn settle() {
    thread::sleep(Duration::from_millis(30));
}

/// Signed smallest difference between two headings in degrees.
pub fn heading_error_deg(actual_rad: f64, expected_deg: f64) -> f64 {
    let diff = (actual_rad.to_degrees() - expected_deg).rem_euclid(360.0);
    if diff > 180.0 { diff - 360.0 } else { diff }
}
