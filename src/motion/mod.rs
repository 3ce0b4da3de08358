//! Motion control subsystem

pub mod commands;
pub mod controller;

pub use commands::MotionRequest;
pub use controller::MotionController;
