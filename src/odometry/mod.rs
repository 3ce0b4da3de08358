//! Encoder odometry
//!
//! - [`pose`]: Pose and raw encoder sample types
//! - [`integrator`]: Single integration step from tick deltas to pose
//! - [`tracker`]: Background thread that keeps the pose current

pub mod integrator;
pub mod pose;
pub mod tracker;

pub use integrator::OdometryIntegrator;
pub use pose::{EncoderSample, Pose};
pub use tracker::{PoseTracker, TrackerStart, TrackerState};
