//! Differential-drive kinematics.
//!
//! A `(linear, angular)` body velocity command is decomposed into left and
//! right wheel angular velocities:
//!
//! ```text
//! right = (v + ω · w/2) / r
//! left  = (v − ω · w/2) / r
//! ```
//!
//! where `w` is the track width and `r` the wheel radius.
//!
//! # Example
//!
//! ```rust
//! use simplus_hal::drive::DifferentialDrive;
//!
//! let drive = DifferentialDrive::new(0.02, 0.05);
//! let wheels = drive.wheel_velocities(0.05, 0.0);
//! assert!((wheels.left - 2.5).abs() < 1e-9);
//! assert!((wheels.right - 2.5).abs() < 1e-9);
//! ```

use simplus_types::{Pose3D, SimError};
use tracing::debug;

use crate::robot::RobotDriver;

/// Per-wheel angular velocities in rad/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelVelocities {
    pub left: f64,
    pub right: f64,
}

/// Geometry of a two-wheeled differential-drive base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialDrive {
    /// Wheel radius in metres.
    pub wheel_radius: f64,
    /// Distance between the wheel contact points in metres.
    pub track_width: f64,
}

impl DifferentialDrive {
    pub fn new(wheel_radius: f64, track_width: f64) -> Self {
        Self {
            wheel_radius,
            track_width,
        }
    }

    /// Derive the track width from the wheel joint positions expressed in the
    /// robot base frame.  The wider of the x and y separations is taken, so
    /// the result does not depend on which base axis the wheels sit on.
    ///
    /// Drivers that can query the wheel joints go through
    /// [`RobotLayout::calibrate_track_width`][crate::robot::RobotLayout::calibrate_track_width],
    /// which converts world positions into the base frame first.
    pub fn track_width_from(left: Pose3D, right: Pose3D) -> f64 {
        let dx = (left.x - right.x).abs();
        let dy = (left.y - right.y).abs();
        dx.max(dy)
    }

    /// Decompose a body velocity command into wheel velocities.
    pub fn wheel_velocities(&self, linear: f64, angular: f64) -> WheelVelocities {
        let half_track = angular * self.track_width / 2.0;
        WheelVelocities {
            left: (linear - half_track) / self.wheel_radius,
            right: (linear + half_track) / self.wheel_radius,
        }
    }

    /// Send a body velocity command to `driver`.
    pub fn apply(
        &self,
        driver: &mut impl RobotDriver,
        linear: f64,
        angular: f64,
    ) -> Result<WheelVelocities, SimError> {
        let wheels = self.wheel_velocities(linear, angular);
        debug!(linear, angular, left = wheels.left, right = wheels.right, "drive command");
        driver.set_motor_velocities(wheels.left, wheels.right)?;
        Ok(wheels)
    }
}
