//! Pose and encoder sample types

use crate::drivers::MotorDriver;

/// Estimated robot pose in the odometry frame
///
/// Heading is counter-clockwise from the +X axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// X position (mm)
    pub x_mm: f64,
    /// Y position (mm)
    pub y_mm: f64,
    /// Heading (radians)
    pub heading_rad: f64,
}

impl Pose {
    /// Create a pose with heading in radians
    pub fn new(x_mm: f64, y_mm: f64, heading_rad: f64) -> Self {
        Self {
            x_mm,
            y_mm,
            heading_rad,
        }
    }

    /// Create a pose with heading in degrees
    pub fn from_degrees(x_mm: f64, y_mm: f64, heading_deg: f64) -> Self {
        Self::new(x_mm, y_mm, heading_deg.to_radians())
    }

    /// Heading in degrees
    #[inline]
    pub fn heading_deg(&self) -> f64 {
        self.heading_rad.to_degrees()
    }

    /// Straight-line distance to a point
    #[inline]
    pub fn distance_to(&self, x_mm: f64, y_mm: f64) -> f64 {
        (self.x_mm - x_mm).hypot(self.y_mm - y_mm)
    }

    /// Bearing from this pose's position to a point (radians, CCW from +X)
    #[inline]
    pub fn bearing_to(&self, x_mm: f64, y_mm: f64) -> f64 {
        (y_mm - self.y_mm).atan2(x_mm - self.x_mm)
    }
}

/// Raw encoder counts of both drive motors, read together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderSample {
    /// Left motor encoder count
    pub left_ticks: i64,
    /// Right motor encoder count
    pub right_ticks: i64,
}

impl EncoderSample {
    /// Create a sample from known counts
    pub fn new(left_ticks: i64, right_ticks: i64) -> Self {
        Self {
            left_ticks,
            right_ticks,
        }
    }

    /// Sample both encoders as close together as the driver allows
    pub fn read(motors: &dyn MotorDriver) -> Self {
        let (left_ticks, right_ticks) = motors.positions();
        Self {
            left_ticks,
            right_ticks,
        }
    }
}
