//! Gati - Motion control and odometry for differential-drive robots
//!
//! Turns high-level motion commands (drive a distance, spin in place, drive
//! an arc, go to a coordinate) into per-wheel commands, while a background
//! thread integrates wheel-encoder ticks into a pose estimate.
//!
//! ## Layout
//!
//! - [`geometry`]: Wheel and chassis dimensions
//! - [`kinematics`]: Pure wheel-command math
//! - [`odometry`]: Pose integration and the background tracker
//! - [`motion`]: The [`MotionController`] that ties it together
//! - [`drivers`]: The [`MotorDriver`] trait hardware bindings implement
//! - [`devices`]: A simulated motor pair for tests and demos
//!
//! ## Example
//!
//! ```no_run
//! use gati::devices::MockMotorDriver;
//! use gati::odometry::TrackerStart;
//! use gati::{MotionController, Wheel, WheelGeometry};
//! use std::sync::Arc;
//!
//! # fn main() -> gati::Result<()> {
//! let geometry = WheelGeometry::from_wheel(Wheel::ev3_tire(), 128.0)?;
//! let mut robot = MotionController::new(Arc::new(MockMotorDriver::new()), geometry);
//!
//! robot.turn_right(40.0, 90.0)?;
//! robot.straight(40.0, 500.0)?;
//! robot.arc_right(80.0, 150.0, 700.0)?;
//!
//! robot.start_odometry(TrackerStart::default())?;
//! robot.go_to_coordinate(40.0, 300.0, 300.0)?;
//! robot.turn_to_angle(40.0, 90.0)?;
//! robot.stop_odometry();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod devices;
pub mod drivers;
pub mod error;
pub mod geometry;
pub mod kinematics;
pub mod motion;
pub mod odometry;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use drivers::{MotorDriver, StopAction, WheelSide};
pub use error::{Error, Result};
pub use geometry::{Wheel, WheelGeometry};
pub use motion::{MotionController, MotionRequest};
pub use odometry::{Pose, PoseTracker, TrackerStart, TrackerState};
