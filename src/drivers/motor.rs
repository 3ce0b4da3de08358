//! Motor driver trait

use crate::error::Result;

/// One side of the drive train
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelSide {
    Left,
    Right,
}

/// What the motors do once a command finishes or on an explicit stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopAction {
    /// Remove power and let the wheels roll
    #[default]
    Coast,
    /// Short the windings for a quick stop
    Brake,
    /// Actively hold the current position
    Hold,
}

impl StopAction {
    /// Brake flag of a motion command as a stop action
    pub fn from_brake(brake: bool) -> Self {
        if brake { Self::Brake } else { Self::Coast }
    }
}

/// Paired drive motors of a differential-drive robot
///
/// Methods take `&self`: position reads come from the odometry thread while a
/// run command blocks the caller thread, so implementations keep their own
/// interior synchronization.
pub trait MotorDriver: Send + Sync {
    /// Run both motors until the faster one has turned `rotations`
    ///
    /// # Arguments
    /// * `left_speed` - Left motor speed in percent (-100 to 100)
    /// * `right_speed` - Right motor speed in percent (-100 to 100)
    /// * `rotations` - Revolutions of the faster motor
    /// * `brake` - Brake on completion instead of coasting
    ///
    /// Blocks until the move is complete. Fails with
    /// [`Error::ActuatorFault`](crate::Error::ActuatorFault) when it cannot.
    fn run_for_rotations(
        &self,
        left_speed: f64,
        right_speed: f64,
        rotations: f64,
        brake: bool,
    ) -> Result<()>;

    /// Run both motors until the faster one has turned `degrees`
    ///
    /// Same contract as [`run_for_rotations`](Self::run_for_rotations).
    fn run_for_degrees(
        &self,
        left_speed: f64,
        right_speed: f64,
        degrees: f64,
        brake: bool,
    ) -> Result<()>;

    /// Current encoder count of one motor
    fn position(&self, side: WheelSide) -> i64;

    /// Current (left, right) encoder counts
    ///
    /// Drivers that can latch both encoders at once should override this so
    /// the two counts come from the same instant.
    fn positions(&self) -> (i64, i64) {
        (self.position(WheelSide::Left), self.position(WheelSide::Right))
    }

    /// Encoder counts per full motor revolution
    fn counts_per_rotation(&self, side: WheelSide) -> u32;

    /// Stop both motors
    fn stop(&self, action: StopAction) -> Result<()>;
}
