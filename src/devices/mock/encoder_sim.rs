//! Encoder simulator for the mock motors
//!
//! Converts simulated shaft travel into whole encoder counts, carrying the
//! fractional remainder between steps and applying optional slip noise.

use super::noise::NoiseGenerator;

/// Encoder pair of a differential-drive robot
pub struct EncoderSimulator {
    counts_per_rotation: f64,
    slip_stddev: f64,
    noise: NoiseGenerator,
    /// Fractional counts not yet emitted (left)
    left_accumulator: f64,
    /// Fractional counts not yet emitted (right)
    right_accumulator: f64,
    left_ticks: i64,
    right_ticks: i64,
}

impl EncoderSimulator {
    /// Create a simulator with both counters at zero
    pub fn new(counts_per_rotation: u32, slip_stddev: f64, noise: NoiseGenerator) -> Self {
        Self {
            counts_per_rotation: f64::from(counts_per_rotation),
            slip_stddev,
            noise,
            left_accumulator: 0.0,
            right_accumulator: 0.0,
            left_ticks: 0,
            right_ticks: 0,
        }
    }

    /// Advance both shafts by the given signed degrees
    ///
    /// # Returns
    /// (left_ticks, right_ticks) after the step
    pub fn advance(&mut self, left_degrees: f64, right_degrees: f64) -> (i64, i64) {
        let left_slip = 1.0 + self.noise.gaussian(self.slip_stddev);
        let right_slip = 1.0 + self.noise.gaussian(self.slip_stddev);

        self.left_accumulator += left_degrees / 360.0 * self.counts_per_rotation * left_slip;
        self.right_accumulator += right_degrees / 360.0 * self.counts_per_rotation * right_slip;

        let left_whole = self.left_accumulator.trunc();
        let right_whole = self.right_accumulator.trunc();
        self.left_accumulator -= left_whole;
        self.right_accumulator -= right_whole;

        self.left_ticks += left_whole as i64;
        self.right_ticks += right_whole as i64;

        (self.left_ticks, self.right_ticks)
    }

    /// Add whole counts directly, bypassing slip
    pub fn add_ticks(&mut self, left: i64, right: i64) {
        self.left_ticks += left;
        self.right_ticks += right;
    }

    /// Overwrite both counters and drop any fractional remainder
    pub fn set_ticks(&mut self, left: i64, right: i64) {
        self.left_ticks = left;
        self.right_ticks = right;
        self.left_accumulator = 0.0;
        self.right_accumulator = 0.0;
    }

    /// Current (left, right) counts
    #[inline]
    pub fn ticks(&self) -> (i64, i64) {
        (self.left_ticks, self.right_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator(slip_stddev: f64) -> EncoderSimulator {
        EncoderSimulator::new(360, slip_stddev, NoiseGenerator::new(42))
    }

    #[test]
    fn test_forward_rotation() {
        let mut encoder = simulator(0.0);
        for _ in 0..4 {
            encoder.advance(90.0, 90.0);
        }
        assert_eq!(encoder.ticks(), (360, 360));
    }

    #[test]
    fn test_fractional_counts_carry_over() {
        let mut encoder = EncoderSimulator::new(2, 0.0, NoiseGenerator::new(42));

        // 0.25 counts per step on the left, -0.5 on the right
        for _ in 0..8 {
            encoder.advance(45.0, -90.0);
        }
        assert_eq!(encoder.ticks(), (2, -4));
    }

    #[test]
    fn test_slip_perturbs_counts() {
        let mut encoder = simulator(0.05);
        for _ in 0..100 {
            encoder.advance(36.0, 36.0);
        }

        let (left, right) = encoder.ticks();
        // 3600 nominal counts with a few percent of jitter
        assert!(left > 3400 && left < 3800, "left={}", left);
        assert!(right > 3400 && right < 3800, "right={}", right);
    }

    #[test]
    fn test_set_and_add_ticks() {
        let mut encoder = simulator(0.0);
        encoder.set_ticks(1000, -1000);
        encoder.add_ticks(5, 5);
        assert_eq!(encoder.ticks(), (1005, -995));
    }
}
