//! Motor driver implementations

pub mod mock;

pub use mock::MockMotorDriver;
