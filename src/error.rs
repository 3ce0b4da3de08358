//! Error types for Gati

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Gati error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requested arc is tighter than the chassis can drive
    #[error("Invalid geometry: radius {radius_mm:.1}mm is less than minimum turn radius {min_radius_mm:.1}mm")]
    InvalidGeometry {
        /// Requested arc radius
        radius_mm: f64,
        /// Half the axle track
        min_radius_mm: f64,
    },

    /// Operation needs odometry tracking to be running
    #[error("Precondition failed: {0}")]
    Precondition(&'static str),

    /// Motor could not complete a command
    #[error("Actuator fault: {0}")]
    ActuatorFault(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}
