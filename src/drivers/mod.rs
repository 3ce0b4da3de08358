//! Device driver traits

pub mod motor;

pub use motor::{MotorDriver, StopAction, WheelSide};
