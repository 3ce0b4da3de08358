//! Configuration for Gati
//!
//! Loads robot geometry, odometry and motion defaults from a TOML file.

use crate::devices::mock::MockConfig;
use crate::error::Result;
use crate::geometry::{Wheel, WheelGeometry};
use crate::odometry::TrackerStart;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    pub chassis: ChassisConfig,
    #[serde(default)]
    pub odometry: OdometryConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub simulation: MockConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chassis dimensions
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChassisConfig {
    /// Tire outer diameter (mm)
    pub wheel_diameter_mm: f64,
    /// Tire width (mm)
    #[serde(default)]
    pub wheel_width_mm: f64,
    /// Distance between the wheel midpoints (mm)
    ///
    /// Calibrate by driving full circles: adjust until the robot ends
    /// exactly where it started.
    pub axle_track_mm: f64,
}

/// Pose tracker start parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OdometryConfig {
    #[serde(default = "default_initial_heading")]
    pub initial_heading_deg: f64,
    #[serde(default)]
    pub initial_x_mm: f64,
    #[serde(default)]
    pub initial_y_mm: f64,
    /// Encoder sampling period; 0 busy-polls
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
}

/// Motion defaults
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MotionConfig {
    /// Speed used by the demo sequence (percent)
    #[serde(default = "default_speed")]
    pub default_speed: f64,
    /// Brake at the end of each command instead of coasting
    #[serde(default = "default_brake")]
    pub brake: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_initial_heading() -> f64 {
    90.0
}

fn default_sample_interval_ms() -> u64 {
    5
}

fn default_speed() -> f64 {
    15.0
}

fn default_brake() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OdometryConfig {
    fn default() -> Self {
        Self {
            initial_heading_deg: default_initial_heading(),
            initial_x_mm: 0.0,
            initial_y_mm: 0.0,
            sample_interval_ms: default_sample_interval_ms(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            default_speed: default_speed(),
            brake: default_brake(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ChassisConfig {
    /// Tire described by this configuration
    pub fn wheel(&self) -> Wheel {
        Wheel::new(self.wheel_diameter_mm, self.wheel_width_mm)
    }

    /// Validated chassis geometry
    pub fn geometry(&self) -> Result<WheelGeometry> {
        WheelGeometry::from_wheel(self.wheel(), self.axle_track_mm)
    }
}

impl OdometryConfig {
    /// Tracker start parameters
    pub fn start_params(&self) -> TrackerStart {
        TrackerStart {
            heading_deg: self.initial_heading_deg,
            x_mm: self.initial_x_mm,
            y_mm: self.initial_y_mm,
            sample_interval: Duration::from_millis(self.sample_interval_ms),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use gati::config::AppConfig;
    ///
    /// let config = AppConfig::from_file("gati.toml")?;
    /// # Ok::<(), gati::Error>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Defaults for the sprocket-wheel chassis
    ///
    /// The axle track is measured between the inner edges of the tires plus
    /// the tire width's effective contact offset.
    pub fn sprocket_defaults() -> Self {
        let wheel = Wheel::sprocket();
        Self {
            chassis: ChassisConfig {
                wheel_diameter_mm: wheel.diameter_mm,
                wheel_width_mm: wheel.width_mm,
                axle_track_mm: 100.0 + wheel.width_mm * 0.7826,
            },
            odometry: OdometryConfig::default(),
            motion: MotionConfig::default(),
            simulation: MockConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::sprocket_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::sprocket_defaults();
        assert_eq!(config.chassis.wheel_diameter_mm, 42.0);
        assert_relative_eq!(config.chassis.axle_track_mm, 111.739, epsilon = 1e-9);
        assert_eq!(config.odometry.initial_heading_deg, 90.0);
        assert_eq!(config.odometry.sample_interval_ms, 5);
        assert_eq!(config.motion.default_speed, 15.0);
        assert!(config.motion.brake);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::sprocket_defaults();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[chassis]"));
        assert!(toml_string.contains("[odometry]"));
        assert!(toml_string.contains("[motion]"));
        assert!(toml_string.contains("[simulation]"));
        assert!(toml_string.contains("[logging]"));
        assert!(toml_string.contains("wheel_diameter_mm = 42.0"));
    }

    #[test]
    fn test_toml_deserialization_with_defaults() {
        let toml_content = r#"
[chassis]
wheel_diameter_mm = 56.0
axle_track_mm = 121.7

[odometry]
sample_interval_ms = 0
"#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.chassis.wheel_width_mm, 0.0);
        assert_eq!(config.odometry.initial_heading_deg, 90.0);
        assert_eq!(config.odometry.sample_interval_ms, 0);
        assert_eq!(config.motion, MotionConfig::default());
        assert_eq!(config.simulation, MockConfig::default());

        let start = config.odometry.start_params();
        assert!(start.sample_interval.is_zero());

        let geometry = config.chassis.geometry().unwrap();
        assert_relative_eq!(geometry.wheel_circumference_mm(), 56.0 * std::f64::consts::PI);
        assert_relative_eq!(geometry.min_turn_radius_mm(), 60.85);
    }

    #[test]
    fn test_invalid_chassis_rejected() {
        let mut config = AppConfig::sprocket_defaults();
        config.chassis.axle_track_mm = 0.0;
        assert!(config.chassis.geometry().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gati.toml");

        let mut config = AppConfig::sprocket_defaults();
        config.logging.level = "debug".to_string();
        config.to_file(&path).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            AppConfig::from_file("/nonexistent/gati.toml"),
            Err(crate::Error::Io(_))
        ));
    }
}
