//! Motion request definitions

use crate::kinematics::TurnDirection;

/// High-level motion request
///
/// Speeds are percent of motor maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionRequest {
    /// Drive straight (negative distance drives backwards)
    Straight {
        /// Distance in mm
        distance_mm: f64,
        speed: f64,
    },

    /// Rotate in place
    TurnInPlace {
        /// Angle in degrees (positive = clockwise)
        degrees: f64,
        speed: f64,
    },

    /// Drive along a circular arc
    Arc {
        /// Radius of the axle midpoint's path in mm
        radius_mm: f64,
        /// Length of the axle midpoint's path in mm
        distance_mm: f64,
        speed: f64,
        direction: TurnDirection,
    },

    /// Face a point and drive to it (needs odometry)
    GoToCoordinate { x_mm: f64, y_mm: f64, speed: f64 },

    /// Rotate to an absolute heading (needs odometry)
    GoToAngle {
        /// Heading in degrees, CCW from +X
        target_degrees: f64,
        speed: f64,
    },
}

impl MotionRequest {
    /// Get request type as string
    pub fn command_type(&self) -> &'static str {
        match self {
            Self::Straight { .. } => "straight",
            Self::TurnInPlace { .. } => "turn_in_place",
            Self::Arc { .. } => "arc",
            Self::GoToCoordinate { .. } => "go_to_coordinate",
            Self::GoToAngle { .. } => "go_to_angle",
        }
    }

    /// Check if this request reads the odometry pose
    pub fn requires_odometry(&self) -> bool {
        matches!(self, Self::GoToCoordinate { .. } | Self::GoToAngle { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_odometry() {
        assert!(
            MotionRequest::GoToAngle {
                target_degrees: 90.0,
                speed: 10.0
            }
            .requires_odometry()
        );
        assert!(
            !MotionRequest::Arc {
                radius_mm: 150.0,
                distance_mm: 700.0,
                speed: 15.0,
                direction: TurnDirection::Right
            }
            .requires_odometry()
        );
    }

    #[test]
    fn test_command_type() {
        let request = MotionRequest::Straight {
            distance_mm: 100.0,
            speed: 20.0,
        };
        assert_eq!(request.command_type(), "straight");
    }
}
