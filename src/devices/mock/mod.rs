//! Mock drive motors for hardware-free testing
//!
//! The mock simulates a pair of encoder-equipped motors:
//!
//! | Component | Simulation Method |
//! |-----------|-------------------|
//! | Run commands | Tank-drive split of the commanded shaft travel |
//! | Wheel encoders | Whole counts with carried fractions + slip noise |
//! | Faults | One-shot injected `ActuatorFault` |
//!
//! Motion is simulated in steps of `step_degrees`. With a non-zero
//! `step_delay_ms` each step also takes real time, which lets the odometry
//! thread observe a move while it is in progress.

pub mod config;
pub mod encoder_sim;
pub mod motor;
pub mod noise;

pub use config::MockConfig;
pub use motor::{MockMotorDriver, MotorCall};
