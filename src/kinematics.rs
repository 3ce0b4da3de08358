//! Differential-drive kinematics
//!
//! Pure functions that turn distance, angle and radius requests into wheel
//! commands for a given [`WheelGeometry`]. Nothing here blocks or touches
//! hardware; the only failure is an arc the chassis cannot drive.
//!
//! Sign conventions:
//! - Positive speed drives a wheel forward.
//! - Positive in-place degrees rotate clockwise (left forward, right reverse).
//! - Headings grow counter-clockwise, so a clockwise turn lowers the heading.

use crate::error::{Error, Result};
use crate::geometry::WheelGeometry;
use std::f64::consts::PI;

/// Direction of a turn or arc, seen from above
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    /// Counter-clockwise
    Left,
    /// Clockwise
    Right,
}

impl TurnDirection {
    /// The other direction
    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Lowercase name for log output
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// How far a wheel command runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelAmount {
    /// Full wheel revolutions
    Rotations(f64),
    /// Wheel shaft degrees
    Degrees(f64),
}

/// Low-level command for both drive motors
///
/// Speeds are percent of motor maximum. The faster wheel turns by `amount`,
/// the slower one proportionally to its speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelCommand {
    /// Left wheel speed (%)
    pub left_speed: f64,
    /// Right wheel speed (%)
    pub right_speed: f64,
    /// Duration of the command in wheel travel
    pub amount: WheelAmount,
}

/// Wheel plan for rotating in place
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnInPlace {
    /// +1.0 or -1.0
    pub left_sign: f64,
    /// +1.0 or -1.0
    pub right_sign: f64,
    /// Rotations each wheel must turn
    pub rotations: f64,
}

impl TurnInPlace {
    /// Wheel command for this turn at `speed`
    pub fn command(&self, speed: f64) -> WheelCommand {
        WheelCommand {
            left_speed: speed * self.left_sign,
            right_speed: speed * self.right_sign,
            amount: WheelAmount::Rotations(self.rotations),
        }
    }
}

/// Wheel plan for driving along a circular arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcDrive {
    /// Left wheel speed (%)
    pub left_speed: f64,
    /// Right wheel speed (%)
    pub right_speed: f64,
    /// Degrees the outer (faster) wheel turns
    pub outer_wheel_degrees: f64,
}

impl ArcDrive {
    /// Wheel command for this arc
    pub fn command(&self) -> WheelCommand {
        WheelCommand {
            left_speed: self.left_speed,
            right_speed: self.right_speed,
            amount: WheelAmount::Degrees(self.outer_wheel_degrees),
        }
    }
}

/// Shortest rotation between two headings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortestTurn {
    /// Which way to rotate
    pub direction: TurnDirection,
    /// Magnitude in degrees, never above 180
    pub delta_deg: f64,
}

/// Wheel revolutions needed to roll `distance_mm`
#[inline]
pub fn rotations_for_distance(distance_mm: f64, geometry: &WheelGeometry) -> f64 {
    distance_mm / geometry.wheel_circumference_mm()
}

/// Wheel command for driving straight
///
/// A negative distance drives backwards: the speed sign is flipped and the
/// rotation count stays positive.
pub fn straight(speed: f64, distance_mm: f64, geometry: &WheelGeometry) -> WheelCommand {
    let rotations = rotations_for_distance(distance_mm, geometry);
    let speed = if rotations < 0.0 { -speed } else { speed };

    WheelCommand {
        left_speed: speed,
        right_speed: speed,
        amount: WheelAmount::Rotations(rotations.abs()),
    }
}

/// Plan a rotation in place by signed `degrees` (positive = clockwise)
pub fn turn_in_place(degrees: f64, geometry: &WheelGeometry) -> TurnInPlace {
    // Both wheels roll along the circle whose diameter is the axle track
    let distance_mm = (degrees.abs() / 360.0) * geometry.rotation_circumference_mm();
    let rotations = rotations_for_distance(distance_mm, geometry);

    if degrees > 0.0 {
        TurnInPlace {
            left_sign: 1.0,
            right_sign: -1.0,
            rotations,
        }
    } else {
        TurnInPlace {
            left_sign: -1.0,
            right_sign: 1.0,
            rotations,
        }
    }
}

/// Plan a clockwise rotation; the sign of `degrees` is ignored
pub fn turn_right(degrees: f64, geometry: &WheelGeometry) -> TurnInPlace {
    turn_in_place(degrees.abs(), geometry)
}

/// Plan a counter-clockwise rotation; the sign of `degrees` is ignored
pub fn turn_left(degrees: f64, geometry: &WheelGeometry) -> TurnInPlace {
    turn_in_place(-degrees.abs(), geometry)
}

/// Plan an arc of `radius_mm` whose midpoint path is `distance_mm` long
///
/// The outer wheel runs at `speed` and the inner wheel is slowed by the ratio
/// of the inner and outer circle circumferences. Fails with
/// [`Error::InvalidGeometry`] when the radius is below half the axle track.
pub fn arc(
    radius_mm: f64,
    distance_mm: f64,
    speed: f64,
    direction: TurnDirection,
    geometry: &WheelGeometry,
) -> Result<ArcDrive> {
    let min_radius_mm = geometry.min_turn_radius_mm();
    if !(radius_mm >= min_radius_mm) {
        return Err(Error::InvalidGeometry {
            radius_mm,
            min_radius_mm,
        });
    }

    let half_track = geometry.axle_track_mm() / 2.0;
    let circle_outer_mm = 2.0 * PI * (radius_mm + half_track);
    let circle_middle_mm = 2.0 * PI * radius_mm;
    let circle_inner_mm = 2.0 * PI * (radius_mm - half_track);

    let inner_speed = speed * (circle_inner_mm / circle_outer_mm);
    let (left_speed, right_speed) = match direction {
        TurnDirection::Right => (speed, inner_speed),
        TurnDirection::Left => (inner_speed, speed),
    };

    // Fraction of the middle circle, scaled onto the outer circle
    let circle_middle_fraction = distance_mm / circle_middle_mm;
    let outer_final_mm = circle_middle_fraction * circle_outer_mm;
    let outer_wheel_rotations = rotations_for_distance(outer_final_mm, geometry);
    let outer_wheel_degrees = outer_wheel_rotations * 360.0;

    log::debug!(
        "Kinematics: arc {} r={:.1}mm d={:.1}mm - speeds=(L:{:.2}, R:{:.2}), circles=(outer:{:.1}, middle:{:.1}, inner:{:.1}), outer_degrees={:.1}",
        direction.as_str(),
        radius_mm,
        distance_mm,
        left_speed,
        right_speed,
        circle_outer_mm,
        circle_middle_mm,
        circle_inner_mm,
        outer_wheel_degrees
    );

    Ok(ArcDrive {
        left_speed,
        right_speed,
        outer_wheel_degrees,
    })
}

/// Choose the shorter way from `current_deg` to `target_deg`
///
/// Both angles should already be in [0, 360).
pub fn shortest_turn(current_deg: f64, target_deg: f64) -> ShortestTurn {
    let (mut direction, mut delta_deg) = if current_deg > target_deg {
        (TurnDirection::Right, current_deg - target_deg)
    } else {
        (TurnDirection::Left, target_deg - current_deg)
    };

    if delta_deg > 180.0 {
        delta_deg = 360.0 - delta_deg;
        direction = direction.flipped();
    }

    ShortestTurn {
        direction,
        delta_deg,
    }
}
