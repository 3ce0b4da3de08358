//! Wheel and chassis geometry
//!
//! All lengths are millimetres.

use crate::error::{Error, Result};
use std::f64::consts::PI;

/// A drive wheel described by its tire dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wheel {
    /// Outer tire diameter (mm)
    pub diameter_mm: f64,
    /// Tire width (mm)
    pub width_mm: f64,
}

impl Wheel {
    /// Create a wheel from its tire dimensions
    pub fn new(diameter_mm: f64, width_mm: f64) -> Self {
        Self {
            diameter_mm,
            width_mm,
        }
    }

    /// LEGO EV3 education set tire (56 x 28 mm)
    pub fn ev3_education_set_tire() -> Self {
        Self::new(56.0, 28.0)
    }

    /// LEGO EV3 tire (43.2 x 21 mm)
    pub fn ev3_tire() -> Self {
        Self::new(43.2, 21.0)
    }

    /// 42 x 15 mm sprocket wheel
    pub fn sprocket() -> Self {
        Self::new(42.0, 15.0)
    }

    /// Distance covered by one full wheel revolution
    #[inline]
    pub fn circumference_mm(&self) -> f64 {
        self.diameter_mm * PI
    }
}

/// Immutable geometry of a differential-drive chassis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    wheel_circumference_mm: f64,
    axle_track_mm: f64,
}

impl WheelGeometry {
    /// Create geometry from a wheel circumference and axle track
    ///
    /// Both values must be finite and strictly positive.
    pub fn new(wheel_circumference_mm: f64, axle_track_mm: f64) -> Result<Self> {
        if !(wheel_circumference_mm.is_finite() && wheel_circumference_mm > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "wheel circumference must be positive, got {}",
                wheel_circumference_mm
            )));
        }
        if !(axle_track_mm.is_finite() && axle_track_mm > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "axle track must be positive, got {}",
                axle_track_mm
            )));
        }

        Ok(Self {
            wheel_circumference_mm,
            axle_track_mm,
        })
    }

    /// Create geometry for a chassis fitted with `wheel`
    pub fn from_wheel(wheel: Wheel, axle_track_mm: f64) -> Result<Self> {
        Self::new(wheel.circumference_mm(), axle_track_mm)
    }

    /// Wheel circumference (mm)
    #[inline]
    pub fn wheel_circumference_mm(&self) -> f64 {
        self.wheel_circumference_mm
    }

    /// Distance between the two wheel midpoints (mm)
    #[inline]
    pub fn axle_track_mm(&self) -> f64 {
        self.axle_track_mm
    }

    /// Smallest arc radius the chassis can drive
    #[inline]
    pub fn min_turn_radius_mm(&self) -> f64 {
        self.axle_track_mm / 2.0
    }

    /// Circle traced by one wheel while the robot spins in place
    #[inline]
    pub fn rotation_circumference_mm(&self) -> f64 {
        self.axle_track_mm * PI
    }
}
