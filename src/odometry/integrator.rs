//! Encoder integration step
//!
//! Dead reckoning after David Anderson's IMU odometry article: each sample's
//! tick deltas become wheel travel, the travel difference rotates the heading,
//! and the mean travel advances the position along the new heading.

use super::pose::{EncoderSample, Pose};
use crate::geometry::WheelGeometry;
use crate::utils::normalize_heading;

/// Tick delta above which a sample is logged as suspicious
const MAX_REASONABLE_DELTA: i64 = 100_000;

/// Integrates encoder samples into a pose estimate
#[derive(Debug, Clone)]
pub struct OdometryIntegrator {
    geometry: WheelGeometry,
    left_counts_per_rotation: f64,
    right_counts_per_rotation: f64,
    previous: EncoderSample,
    pose: Pose,
}

impl OdometryIntegrator {
    /// Create an integrator
    ///
    /// # Arguments
    /// * `geometry` - Chassis geometry
    /// * `counts_per_rotation` - (left, right) encoder resolution
    /// * `start_pose` - Initial pose estimate
    /// * `baseline` - Encoder counts at `start_pose`
    pub fn new(
        geometry: WheelGeometry,
        counts_per_rotation: (u32, u32),
        start_pose: Pose,
        baseline: EncoderSample,
    ) -> Self {
        Self {
            geometry,
            left_counts_per_rotation: f64::from(counts_per_rotation.0),
            right_counts_per_rotation: f64::from(counts_per_rotation.1),
            previous: baseline,
            pose: start_pose,
        }
    }

    /// Fold a new encoder sample into the pose
    ///
    /// Returns `false` without touching the pose when neither wheel moved.
    pub fn update(&mut self, sample: EncoderSample) -> bool {
        let left_ticks = sample.left_ticks - self.previous.left_ticks;
        let right_ticks = sample.right_ticks - self.previous.right_ticks;

        if left_ticks == 0 && right_ticks == 0 {
            return false;
        }

        if left_ticks.abs() > MAX_REASONABLE_DELTA || right_ticks.abs() > MAX_REASONABLE_DELTA {
            log::warn!(
                "OdometryIntegrator: Large encoder jump detected - ΔL={}, ΔR={} (possible wrap or glitch)",
                left_ticks,
                right_ticks
            );
        }

        self.previous = sample;

        let circumference = self.geometry.wheel_circumference_mm();
        let left_mm = (left_ticks as f64 / self.left_counts_per_rotation) * circumference;
        let right_mm = (right_ticks as f64 / self.right_counts_per_rotation) * circumference;

        let mean_mm = (left_mm + right_mm) / 2.0;

        self.pose.heading_rad += (right_mm - left_mm) / self.geometry.axle_track_mm();
        self.pose.heading_rad = normalize_heading(self.pose.heading_rad);

        self.pose.x_mm += mean_mm * self.pose.heading_rad.cos();
        self.pose.y_mm += mean_mm * self.pose.heading_rad.sin();

        true
    }

    /// Current estimate
    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Counts the next delta is measured from
    #[inline]
    pub fn previous(&self) -> EncoderSample {
        self.previous
    }
}
