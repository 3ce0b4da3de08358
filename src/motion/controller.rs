//! Motion controller for executing movement commands
//!
//! The controller owns the chassis geometry, a handle to the drive motors and
//! the pose tracker. Every motion call blocks until the motors report the move
//! complete; errors from the motors are passed through unchanged.

use super::commands::MotionRequest;
use crate::drivers::{MotorDriver, StopAction};
use crate::error::{Error, Result};
use crate::geometry::WheelGeometry;
use crate::kinematics::{self, TurnDirection, WheelAmount, WheelCommand};
use crate::odometry::{EncoderSample, Pose, PoseTracker, TrackerStart, TrackerState};
use crate::utils::normalize_degrees;

use std::sync::Arc;

const ODOMETRY_REQUIRED: &str = "odometry must be started to track robot coordinates";

/// Differential-drive motion controller
pub struct MotionController {
    motors: Arc<dyn MotorDriver>,
    geometry: WheelGeometry,
    tracker: PoseTracker,
    /// Brake at the end of each command instead of coasting
    brake: bool,
}

impl MotionController {
    /// Create a controller that brakes after every command
    pub fn new(motors: Arc<dyn MotorDriver>, geometry: WheelGeometry) -> Self {
        log::debug!(
            "MotionController: Initialized with wheel circumference={:.2}mm, axle track={:.2}mm",
            geometry.wheel_circumference_mm(),
            geometry.axle_track_mm()
        );

        let tracker = PoseTracker::new(Arc::clone(&motors), geometry);
        Self {
            motors,
            geometry,
            tracker,
            brake: true,
        }
    }

    /// Set whether commands end by braking or coasting
    pub fn with_brake(mut self, brake: bool) -> Self {
        self.brake = brake;
        self
    }

    /// Chassis geometry
    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    // === Straight Line ===

    /// Drive `distance_mm` in a straight line (negative drives backwards)
    pub fn straight(&self, speed: f64, distance_mm: f64) -> Result<()> {
        let command = kinematics::straight(speed, distance_mm, &self.geometry);
        log::info!(
            "MotionController: Straight {:.1}mm at {:.1}% - {:?}",
            distance_mm,
            speed,
            command.amount
        );
        self.issue(command)
    }

    /// Drive `distance_mm` backwards; the sign of `distance_mm` is ignored
    pub fn backward(&self, speed: f64, distance_mm: f64) -> Result<()> {
        self.straight(speed, -distance_mm.abs())
    }

    // === Turn In Place ===

    /// Rotate in place by signed `degrees` (positive = clockwise)
    pub fn turn(&self, speed: f64, degrees: f64) -> Result<()> {
        let plan = kinematics::turn_in_place(degrees, &self.geometry);
        log::info!(
            "MotionController: Turn {:.1}° at {:.1}% - {:.3} rotations",
            degrees,
            speed,
            plan.rotations
        );
        self.issue(plan.command(speed))
    }

    /// Rotate clockwise in place by `degrees`
    pub fn turn_right(&self, speed: f64, degrees: f64) -> Result<()> {
        self.turn(speed, degrees.abs())
    }

    /// Rotate counter-clockwise in place by `degrees`
    pub fn turn_left(&self, speed: f64, degrees: f64) -> Result<()> {
        self.turn(speed, -degrees.abs())
    }

    // === Arcs ===

    /// Drive clockwise along a circle of `radius_mm` for `distance_mm`
    pub fn arc_right(&self, speed: f64, radius_mm: f64, distance_mm: f64) -> Result<()> {
        self.arc(speed, radius_mm, distance_mm, TurnDirection::Right)
    }

    /// Drive counter-clockwise along a circle of `radius_mm` for `distance_mm`
    pub fn arc_left(&self, speed: f64, radius_mm: f64, distance_mm: f64) -> Result<()> {
        self.arc(speed, radius_mm, distance_mm, TurnDirection::Left)
    }

    fn arc(
        &self,
        speed: f64,
        radius_mm: f64,
        distance_mm: f64,
        direction: TurnDirection,
    ) -> Result<()> {
        let plan = kinematics::arc(radius_mm, distance_mm, speed, direction, &self.geometry)?;
        log::info!(
            "MotionController: Arc {} r={:.1}mm for {:.1}mm - speeds=(L:{:.2}, R:{:.2}), outer wheel {:.1}°",
            direction.as_str(),
            radius_mm,
            distance_mm,
            plan.left_speed,
            plan.right_speed,
            plan.outer_wheel_degrees
        );
        self.issue(plan.command())
    }

    // === Odometry-based Movements ===

    /// Rotate in place to the absolute heading `target_degrees`
    ///
    /// Always takes the shorter way round. Fails with
    /// [`Error::Precondition`] when odometry is not running.
    pub fn turn_to_angle(&self, speed: f64, target_degrees: f64) -> Result<()> {
        if !self.tracker.is_running() {
            return Err(Error::Precondition(ODOMETRY_REQUIRED));
        }

        let target_deg = normalize_degrees(target_degrees);
        let current_deg = normalize_degrees(self.tracker.pose().heading_deg());
        let turn = kinematics::shortest_turn(current_deg, target_deg);

        log::debug!(
            "MotionController: turn_to_angle {:.1}°, current {:.1}°, delta {:.1}°, direction {}",
            target_deg,
            current_deg,
            turn.delta_deg,
            turn.direction.as_str()
        );
        self.log_pose();

        match turn.direction {
            TurnDirection::Right => self.turn_right(speed, turn.delta_deg)?,
            TurnDirection::Left => self.turn_left(speed, turn.delta_deg)?,
        }

        self.log_pose();
        Ok(())
    }

    /// Turn to face (`x_mm`, `y_mm`) and drive straight to it
    ///
    /// The travel distance comes from the pose before the turn; drift during
    /// the turn is not corrected. Fails with [`Error::Precondition`] when
    /// odometry is not running.
    pub fn go_to_coordinate(&self, speed: f64, x_mm: f64, y_mm: f64) -> Result<()> {
        if !self.tracker.is_running() {
            return Err(Error::Precondition(ODOMETRY_REQUIRED));
        }

        self.motors.stop(StopAction::Hold)?;

        let start = self.tracker.pose();
        let bearing_deg = start.bearing_to(x_mm, y_mm).to_degrees();
        let distance_mm = start.distance_to(x_mm, y_mm);

        log::info!(
            "MotionController: Go to ({:.1}, {:.1}) from ({:.1}, {:.1}) - bearing {:.1}°, distance {:.1}mm",
            x_mm,
            y_mm,
            start.x_mm,
            start.y_mm,
            bearing_deg,
            distance_mm
        );

        self.turn_to_angle(speed, bearing_deg)?;
        self.straight(speed, distance_mm)
    }

    /// Run a [`MotionRequest`]
    pub fn execute(&self, request: &MotionRequest) -> Result<()> {
        log::debug!("MotionController: Executing {} request", request.command_type());

        match *request {
            MotionRequest::Straight { distance_mm, speed } => self.straight(speed, distance_mm),
            MotionRequest::TurnInPlace { degrees, speed } => self.turn(speed, degrees),
            MotionRequest::Arc {
                radius_mm,
                distance_mm,
                speed,
                direction,
            } => self.arc(speed, radius_mm, distance_mm, direction),
            MotionRequest::GoToCoordinate { x_mm, y_mm, speed } => {
                self.go_to_coordinate(speed, x_mm, y_mm)
            }
            MotionRequest::GoToAngle {
                target_degrees,
                speed,
            } => self.turn_to_angle(speed, target_degrees),
        }
    }

    /// Stop both motors
    pub fn stop(&self, action: StopAction) -> Result<()> {
        log::info!("MotionController: Stop ({:?})", action);
        self.motors.stop(action)
    }

    // === Odometry ===

    /// Start pose tracking
    pub fn start_odometry(&mut self, params: TrackerStart) -> Result<()> {
        self.tracker.start(params)
    }

    /// Stop pose tracking and wait for the sampling thread to exit
    pub fn stop_odometry(&mut self) {
        self.tracker.stop();
    }

    /// Pose tracker state
    pub fn odometry_state(&self) -> TrackerState {
        self.tracker.state()
    }

    /// Latest pose estimate (frozen once odometry stops)
    pub fn pose(&self) -> Pose {
        self.tracker.pose()
    }

    /// Log the current pose estimate at debug level
    pub fn log_pose(&self) {
        let pose = self.tracker.pose();
        log::debug!(
            "MotionController: odometry angle {:.1}° at ({:.0}, {:.0})",
            pose.heading_deg(),
            pose.x_mm,
            pose.y_mm
        );
    }

    /// Raw encoder counts right now
    pub fn encoder_sample(&self) -> EncoderSample {
        EncoderSample::read(self.motors.as_ref())
    }

    /// Send a wheel command to the motors
    fn issue(&self, command: WheelCommand) -> Result<()> {
        let result = match command.amount {
            WheelAmount::Rotations(rotations) => self.motors.run_for_rotations(
                command.left_speed,
                command.right_speed,
                rotations,
                self.brake,
            ),
            WheelAmount::Degrees(degrees) => self.motors.run_for_degrees(
                command.left_speed,
                command.right_speed,
                degrees,
                self.brake,
            ),
        };

        if let Err(ref e) = result {
            log::warn!("MotionController: Command {:?} failed: {}", command, e);
        }
        result
    }
}
