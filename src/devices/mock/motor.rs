//! Mock motor driver for testing
//!
//! Records every command and simulates encoder counts with tank-drive
//! semantics: the faster motor turns the commanded amount and the slower one
//! turns in proportion to its speed.

use super::config::MockConfig;
use super::encoder_sim::EncoderSimulator;
use super::noise::NoiseGenerator;
use crate::drivers::{MotorDriver, StopAction, WheelSide};
use crate::error::{Error, Result};

use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;

/// A command received by the mock driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorCall {
    Rotations {
        left_speed: f64,
        right_speed: f64,
        rotations: f64,
        brake: bool,
    },
    Degrees {
        left_speed: f64,
        right_speed: f64,
        degrees: f64,
        brake: bool,
    },
    Stop(StopAction),
}

impl MotorCall {
    /// Whether this call moves the wheels
    pub fn is_actuation(&self) -> bool {
        !matches!(self, Self::Stop(_))
    }

    /// How the motors end up once this call completes
    pub fn stop_action(&self) -> StopAction {
        match *self {
            Self::Rotations { brake, .. } | Self::Degrees { brake, .. } => {
                StopAction::from_brake(brake)
            }
            Self::Stop(action) => action,
        }
    }
}

/// Mock motor driver
#[derive(Clone)]
pub struct MockMotorDriver {
    config: MockConfig,
    state: Arc<Mutex<MockMotorState>>,
}

struct MockMotorState {
    encoder: EncoderSimulator,
    calls: Vec<MotorCall>,
    pending_fault: Option<String>,
}

impl MockMotorDriver {
    /// Create a mock with default configuration
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    /// Create a mock with custom configuration
    pub fn with_config(config: MockConfig) -> Self {
        let noise = NoiseGenerator::new(config.random_seed);
        let encoder = EncoderSimulator::new(config.counts_per_rotation, config.slip_stddev, noise);

        Self {
            config,
            state: Arc::new(Mutex::new(MockMotorState {
                encoder,
                calls: Vec::new(),
                pending_fault: None,
            })),
        }
    }

    /// All calls received so far
    pub fn calls(&self) -> Vec<MotorCall> {
        self.state.lock().calls.clone()
    }

    /// Calls that moved the wheels
    pub fn actuation_calls(&self) -> Vec<MotorCall> {
        self.state
            .lock()
            .calls
            .iter()
            .copied()
            .filter(MotorCall::is_actuation)
            .collect()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Make the next run command fail with an actuator fault
    pub fn fail_next(&self, reason: &str) {
        self.state.lock().pending_fault = Some(reason.to_string());
    }

    /// Overwrite both encoder counters
    pub fn set_positions(&self, left: i64, right: i64) {
        self.state.lock().encoder.set_ticks(left, right);
    }

    /// Move both encoder counters by whole counts in one atomic update
    pub fn advance_positions(&self, left: i64, right: i64) {
        self.state.lock().encoder.add_ticks(left, right);
    }

    /// Simulate a run of the faster motor by `degrees`
    fn run(&self, left_speed: f64, right_speed: f64, degrees: f64, call: MotorCall) -> Result<()> {
        for speed in [left_speed, right_speed] {
            if !speed.is_finite() || speed.abs() > 100.0 {
                return Err(Error::InvalidParameter(format!(
                    "speed must be within -100..=100 percent, got {}",
                    speed
                )));
            }
        }
        if !(self.config.step_degrees.is_finite() && self.config.step_degrees > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "step_degrees must be positive, got {}",
                self.config.step_degrees
            )));
        }

        {
            let mut state = self.state.lock();
            state.calls.push(call);

            if let Some(reason) = state.pending_fault.take() {
                log::warn!("MockMotorDriver: Injected fault - {}", reason);
                return Err(Error::ActuatorFault(reason));
            }
        }

        let max_speed = left_speed.abs().max(right_speed.abs());
        if max_speed == 0.0 || degrees == 0.0 || !degrees.is_finite() {
            return Ok(());
        }

        let left_total = degrees * left_speed / max_speed;
        let right_total = degrees * right_speed / max_speed;

        let steps = (degrees.abs() / self.config.step_degrees).ceil().max(1.0) as u64;
        let delay = self.config.step_delay();

        for _ in 0..steps {
            self.state
                .lock()
                .encoder
                .advance(left_total / steps as f64, right_total / steps as f64);
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        let (left, right) = self.state.lock().encoder.ticks();
        log::debug!(
            "MockMotorDriver: Ran {:.1}° at (L:{:.1}, R:{:.1}) in {} steps, {:?} - encoders L={} R={}",
            degrees,
            left_speed,
            right_speed,
            steps,
            call.stop_action(),
            left,
            right
        );

        Ok(())
    }
}

impl Default for MockMotorDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorDriver for MockMotorDriver {
    fn run_for_rotations(
        &self,
        left_speed: f64,
        right_speed: f64,
        rotations: f64,
        brake: bool,
    ) -> Result<()> {
        let call = MotorCall::Rotations {
            left_speed,
            right_speed,
            rotations,
            brake,
        };
        self.run(left_speed, right_speed, rotations * 360.0, call)
    }

    fn run_for_degrees(
        &self,
        left_speed: f64,
        right_speed: f64,
        degrees: f64,
        brake: bool,
    ) -> Result<()> {
        let call = MotorCall::Degrees {
            left_speed,
            right_speed,
            degrees,
            brake,
        };
        self.run(left_speed, right_speed, degrees, call)
    }

    fn position(&self, side: WheelSide) -> i64 {
        let (left, right) = self.state.lock().encoder.ticks();
        match side {
            WheelSide::Left => left,
            WheelSide::Right => right,
        }
    }

    fn positions(&self) -> (i64, i64) {
        self.state.lock().encoder.ticks()
    }

    fn counts_per_rotation(&self, _side: WheelSide) -> u32 {
        self.config.counts_per_rotation
    }

    fn stop(&self, action: StopAction) -> Result<()> {
        self.state.lock().calls.push(MotorCall::Stop(action));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls() {
        let motors = MockMotorDriver::new();
        motors.run_for_rotations(20.0, 20.0, 1.0, true).unwrap();
        motors.stop(StopAction::Hold).unwrap();

        assert_eq!(
            motors.calls(),
            vec![
                MotorCall::Rotations {
                    left_speed: 20.0,
                    right_speed: 20.0,
                    rotations: 1.0,
                    brake: true
                },
                MotorCall::Stop(StopAction::Hold),
            ]
        );
        assert_eq!(motors.actuation_calls().len(), 1);
    }

    #[test]
    fn test_one_rotation_moves_full_count() {
        let motors = MockMotorDriver::with_config(MockConfig {
            step_degrees: 90.0,
            ..MockConfig::default()
        });
        motors.run_for_rotations(50.0, 50.0, 1.0, false).unwrap();
        assert_eq!(motors.positions(), (360, 360));
    }

    #[test]
    fn test_slower_wheel_turns_proportionally() {
        let motors = MockMotorDriver::with_config(MockConfig {
            step_degrees: 360.0,
            ..MockConfig::default()
        });
        motors.run_for_degrees(-40.0, 20.0, 720.0, true).unwrap();
        assert_eq!(motors.positions(), (-720, 360));
    }

    #[test]
    fn test_injected_fault() {
        let motors = MockMotorDriver::new();
        motors.fail_next("stalled");

        match motors.run_for_degrees(10.0, 10.0, 90.0, true) {
            Err(Error::ActuatorFault(reason)) => assert_eq!(reason, "stalled"),
            other => panic!("expected ActuatorFault, got {:?}", other),
        }
        assert_eq!(motors.positions(), (0, 0));

        // Only the next command fails
        assert!(motors.run_for_degrees(10.0, 10.0, 90.0, true).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_speed() {
        let motors = MockMotorDriver::new();
        assert!(matches!(
            motors.run_for_rotations(150.0, 0.0, 1.0, true),
            Err(Error::InvalidParameter(_))
        ));
        assert_eq!(motors.positions(), (0, 0));

        // Rejected commands never reach the motors
        assert!(motors.calls().is_empty());
        assert!(motors.actuation_calls().is_empty());
    }

    #[test]
    fn test_rejects_non_positive_step() {
        for step_degrees in [0.0, -5.0, f64::NAN] {
            let motors = MockMotorDriver::with_config(MockConfig {
                step_degrees,
                ..MockConfig::default()
            });
            assert!(matches!(
                motors.run_for_degrees(50.0, 50.0, 90.0, true),
                Err(Error::InvalidParameter(_))
            ));
            assert!(motors.calls().is_empty());
        }
    }

    #[test]
    fn test_stop_action_of_calls() {
        let motors = MockMotorDriver::new();
        motors.run_for_degrees(10.0, 10.0, 10.0, true).unwrap();
        motors.run_for_degrees(10.0, 10.0, 10.0, false).unwrap();
        motors.stop(StopAction::Hold).unwrap();

        let actions: Vec<StopAction> = motors.calls().iter().map(MotorCall::stop_action).collect();
        assert_eq!(
            actions,
            vec![StopAction::Brake, StopAction::Coast, StopAction::Hold]
        );

        motors.clear_calls();
        assert!(motors.calls().is_empty());
        assert_eq!(motors.positions(), (20, 20));
    }

    #[test]
    fn test_clones_share_state() {
        let motors = MockMotorDriver::new();
        let handle = motors.clone();
        handle.advance_positions(3, 4);
        assert_eq!(motors.position(WheelSide::Left), 3);
        assert_eq!(motors.position(WheelSide::Right), 4);
    }
}
