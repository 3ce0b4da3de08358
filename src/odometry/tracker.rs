//! Background pose tracker
//!
//! Owns a sampling thread that polls the drive encoders and integrates them
//! into a shared [`Pose`]. The thread is the only writer of the pose while
//! tracking runs; callers read consistent snapshots through [`PoseTracker::pose`].

use super::integrator::OdometryIntegrator;
use super::pose::{EncoderSample, Pose};
use crate::drivers::{MotorDriver, WheelSide};
use crate::error::{Error, Result};
use crate::geometry::WheelGeometry;

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default sampling period
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(5);

/// Tracker lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Stopped,
    Running,
}

/// Parameters for starting a tracking session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerStart {
    /// Initial heading (degrees, CCW from +X)
    pub heading_deg: f64,
    /// Initial X position (mm)
    pub x_mm: f64,
    /// Initial Y position (mm)
    pub y_mm: f64,
    /// Sleep between samples; zero busy-polls the encoders and pins a core
    pub sample_interval: Duration,
}

impl Default for TrackerStart {
    fn default() -> Self {
        Self {
            heading_deg: 90.0,
            x_mm: 0.0,
            y_mm: 0.0,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
        }
    }
}

impl TrackerStart {
    /// Start at a given pose with the default sampling interval
    pub fn at(x_mm: f64, y_mm: f64, heading_deg: f64) -> Self {
        Self {
            heading_deg,
            x_mm,
            y_mm,
            ..Self::default()
        }
    }

    /// Override the sampling interval
    pub fn with_interval(mut self, sample_interval: Duration) -> Self {
        self.sample_interval = sample_interval;
        self
    }
}

/// Continuously running odometry estimator
pub struct PoseTracker {
    motors: Arc<dyn MotorDriver>,
    geometry: WheelGeometry,
    pose: Arc<Mutex<Pose>>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl PoseTracker {
    /// Create a stopped tracker
    pub fn new(motors: Arc<dyn MotorDriver>, geometry: WheelGeometry) -> Self {
        Self {
            motors,
            geometry,
            pose: Arc::new(Mutex::new(Pose::default())),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Reset the pose and start the sampling thread
    ///
    /// Fails with [`Error::InvalidParameter`] when either motor reports zero
    /// encoder counts per rotation. The encoder baseline is the motors' current counts, so ticks turned
    /// before this call never show up as motion. Starting an already running
    /// tracker restarts it from the new pose.
    pub fn start(&mut self, params: TrackerStart) -> Result<()> {
        if self.worker.is_some() {
            log::warn!("PoseTracker: Start requested while running - restarting");
            self.stop();
        }

        let counts = (
            self.motors.counts_per_rotation(WheelSide::Left),
            self.motors.counts_per_rotation(WheelSide::Right),
        );
        if counts.0 == 0 || counts.1 == 0 {
            return Err(Error::InvalidParameter(format!(
                "encoder counts per rotation must be non-zero, got L={} R={}",
                counts.0, counts.1
            )));
        }

        let start_pose = Pose::from_degrees(params.x_mm, params.y_mm, params.heading_deg);
        let baseline = EncoderSample::read(self.motors.as_ref());
        let integrator = OdometryIntegrator::new(self.geometry, counts, start_pose, baseline);

        *self.pose.lock() = start_pose;
        self.running.store(true, Ordering::Release);

        let motors = Arc::clone(&self.motors);
        let pose = Arc::clone(&self.pose);
        let running = Arc::clone(&self.running);
        let interval = params.sample_interval;

        let spawned = thread::Builder::new()
            .name("gati-odometry".to_string())
            .spawn(move || run_sampling_loop(motors, integrator, pose, running, interval));

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                log::info!(
                    "PoseTracker: Started at ({:.1}, {:.1}) heading {:.1}°, baseline L={} R={}, interval {:?}",
                    params.x_mm,
                    params.y_mm,
                    params.heading_deg,
                    baseline.left_ticks,
                    baseline.right_ticks,
                    interval
                );
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::Release);
                Err(e.into())
            }
        }
    }

    /// Stop the sampling thread and wait for it to exit
    ///
    /// The pose is frozen once this returns.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);

        match self.worker.take() {
            Some(handle) => {
                if let Err(e) = handle.join() {
                    log::error!("PoseTracker: Sampling thread panicked: {:?}", e);
                }
                let pose = self.pose();
                log::info!(
                    "PoseTracker: Stopped at ({:.1}, {:.1}) heading {:.1}°",
                    pose.x_mm,
                    pose.y_mm,
                    pose.heading_deg()
                );
            }
            None => log::warn!("PoseTracker: Stop requested while not running"),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> TrackerState {
        if self.worker.is_some() {
            TrackerState::Running
        } else {
            TrackerState::Stopped
        }
    }

    /// Whether the sampling thread is active
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state() == TrackerState::Running
    }

    /// Latest pose estimate
    pub fn pose(&self) -> Pose {
        *self.pose.lock()
    }
}

impl Drop for PoseTracker {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop();
        }
    }
}

/// Sampling loop body, runs until `running` is cleared
fn run_sampling_loop(
    motors: Arc<dyn MotorDriver>,
    mut integrator: OdometryIntegrator,
    pose: Arc<Mutex<Pose>>,
    running: Arc<AtomicBool>,
    interval: Duration,
) {
    log::debug!("PoseTracker: Sampling loop started");

    let mut updates: u64 = 0;
    let mut last_log = Instant::now();

    while running.load(Ordering::Acquire) {
        let sample = EncoderSample::read(motors.as_ref());

        if integrator.update(sample) {
            *pose.lock() = integrator.pose();
            updates += 1;

            // Throttled to 1Hz
            if last_log.elapsed() >= Duration::from_secs(1) {
                let current = integrator.pose();
                log::debug!(
                    "PoseTracker: Pose ({:.1}, {:.1}) heading {:.1}° after {} updates",
                    current.x_mm,
                    current.y_mm,
                    current.heading_deg(),
                    updates
                );
                last_log = Instant::now();
            }
        }

        if interval.is_zero() {
            std::hint::spin_loop();
        } else {
            thread::sleep(interval);
        }
    }

    log::debug!("PoseTracker: Sampling loop exited after {} updates", updates);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::mock::{MockConfig, MockMotorDriver};
    use crate::geometry::Wheel;
    use approx::assert_abs_diff_eq;

    fn tracker() -> (MockMotorDriver, PoseTracker) {
        let motors = MockMotorDriver::new();
        let geometry = WheelGeometry::from_wheel(Wheel::sprocket(), 121.7).unwrap();
        let tracker = PoseTracker::new(Arc::new(motors.clone()), geometry);
        (motors, tracker)
    }

    fn wait_for(tracker: &PoseTracker, predicate: impl Fn(Pose) -> bool) -> Pose {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let pose = tracker.pose();
            if predicate(pose) || Instant::now() > deadline {
                return pose;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_state_transitions() {
        let (_motors, mut tracker) = tracker();
        assert_eq!(tracker.state(), TrackerState::Stopped);

        tracker.start(TrackerStart::default()).unwrap();
        assert_eq!(tracker.state(), TrackerState::Running);

        tracker.stop();
        assert_eq!(tracker.state(), TrackerState::Stopped);

        // Stopping twice is harmless
        tracker.stop();
        assert!(!tracker.is_running());
    }

    #[test]
    fn test_start_resets_pose() {
        let (_motors, mut tracker) = tracker();
        tracker.start(TrackerStart::at(10.0, 20.0, 0.0)).unwrap();
        assert_eq!(tracker.pose(), Pose::new(10.0, 20.0, 0.0));
        tracker.stop();
    }

    #[test]
    fn test_baseline_ignores_prior_ticks() {
        let (motors, mut tracker) = tracker();
        motors.set_positions(50_000, 48_000);

        tracker.start(TrackerStart::default()).unwrap();
        thread::sleep(Duration::from_millis(30));
        tracker.stop();

        assert_eq!(tracker.pose(), Pose::from_degrees(0.0, 0.0, 90.0));
    }

    #[test]
    fn test_tracks_straight_motion() {
        let (motors, mut tracker) = tracker();
        tracker
            .start(TrackerStart::at(0.0, 0.0, 0.0).with_interval(Duration::from_millis(1)))
            .unwrap();

        // One full wheel rotation on each side
        motors.advance_positions(360, 360);
        let pose = wait_for(&tracker, |p| p.x_mm > 0.0);
        tracker.stop();

        assert_abs_diff_eq!(pose.x_mm, 42.0 * std::f64::consts::PI, epsilon = 1e-9);
        assert_eq!(pose.y_mm, 0.0);
        assert_eq!(pose.heading_rad, 0.0);
    }

    #[test]
    fn test_pose_frozen_after_stop() {
        let (motors, mut tracker) = tracker();
        tracker
            .start(TrackerStart::default().with_interval(Duration::ZERO))
            .unwrap();
        tracker.stop();
        let frozen = tracker.pose();

        motors.advance_positions(720, 720);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(tracker.pose(), frozen);
    }

    #[test]
    fn test_zero_counts_per_rotation_rejected() {
        let motors = MockMotorDriver::with_config(MockConfig {
            counts_per_rotation: 0,
            ..MockConfig::default()
        });
        let geometry = WheelGeometry::from_wheel(Wheel::sprocket(), 121.7).unwrap();
        let mut tracker = PoseTracker::new(Arc::new(motors.clone()), geometry);
        let before = tracker.pose();

        assert!(matches!(
            tracker.start(TrackerStart::at(10.0, 10.0, 0.0)),
            Err(Error::InvalidParameter(_))
        ));
        assert_eq!(tracker.state(), TrackerState::Stopped);

        motors.advance_positions(10, 10);
        thread::sleep(Duration::from_millis(30));
        let pose = tracker.pose();
        assert_eq!(pose, before);
        assert!(pose.x_mm.is_finite() && pose.heading_rad.is_finite());
    }

    #[test]
    fn test_restart_while_running() {
        let (_motors, mut tracker) = tracker();
        tracker.start(TrackerStart::default()).unwrap();
        tracker.start(TrackerStart::at(5.0, 5.0, 180.0)).unwrap();

        assert!(tracker.is_running());
        assert_eq!(tracker.pose(), Pose::from_degrees(5.0, 5.0, 180.0));
    }
}
