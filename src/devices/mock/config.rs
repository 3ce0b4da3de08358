//! Mock motor simulation configuration
//!
//! | Parameter | Default | Meaning |
//! |-----------|---------|---------|
//! | counts_per_rotation | 360 | EV3 large motor encoder resolution |
//! | step_degrees | 10.0 | Motor degrees simulated per step |
//! | step_delay_ms | 0 | Real-time pause per step (0 = instant) |
//! | slip_stddev | 0.0 | Multiplicative wheel slip noise |
//! | random_seed | 42 | Noise seed (0 = random each run) |

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Mock motor simulation parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MockConfig {
    /// Encoder counts per motor revolution
    #[serde(default = "default_counts_per_rotation")]
    pub counts_per_rotation: u32,

    /// Motor shaft degrees advanced per simulation step
    #[serde(default = "default_step_degrees")]
    pub step_degrees: f64,

    /// Pause after each simulation step (milliseconds)
    #[serde(default)]
    pub step_delay_ms: u64,

    /// Standard deviation of per-step wheel slip (fraction of travel)
    #[serde(default)]
    pub slip_stddev: f64,

    /// Noise seed, 0 for non-deterministic
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
}

fn default_counts_per_rotation() -> u32 {
    360
}

fn default_step_degrees() -> f64 {
    10.0
}

fn default_random_seed() -> u64 {
    42
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            counts_per_rotation: default_counts_per_rotation(),
            step_degrees: default_step_degrees(),
            step_delay_ms: 0,
            slip_stddev: 0.0,
            random_seed: default_random_seed(),
        }
    }
}

impl MockConfig {
    /// Pause after each simulation step
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}
