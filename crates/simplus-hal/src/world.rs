//! [`WorldQuery`] – read access to the simulated world.
//!
//! The zone registry calls [`WorldQuery::lookup_object_position`] once per
//! reference name at build time; the tick runner calls
//! [`WorldQuery::lookup_robot_pose`] once per tick.  The client-facing
//! [`RobotPose`] is assembled by [`report_robot_pose`].  Every lookup may block on
//! the remote API.  Timeouts belong to the implementation, not the caller.

use std::f64::consts::FRAC_PI_2;

use simplus_types::{Pose3D, RobotPose, SimError};

/// Read-only queries against the simulated world.
pub trait WorldQuery {
    /// Absolute position of the object called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ObjectNotFound`] when the simulation has no object
    /// with that name, or [`SimError::Transport`] when the query itself fails.
    fn lookup_object_position(&self, name: &str) -> Result<Pose3D, SimError>;

    /// True world position of the robot base, whatever the GPS setting.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Transport`] when the query fails.
    fn lookup_robot_pose(&self) -> Result<Pose3D, SimError>;

    /// Robot base orientation as Euler angles in radians.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Transport`] when the query fails.
    fn lookup_robot_orientation(&self) -> Result<[f64; 3], SimError>;
}

/// Query the pose reported to game clients.  Scoring always uses the true
/// position from [`WorldQuery::lookup_robot_pose`] instead.
pub fn report_robot_pose(
    world: &(impl WorldQuery + ?Sized),
    gps_enabled: bool,
) -> Result<RobotPose, SimError> {
    let position = world.lookup_robot_pose()?;
    let euler_rad = world.lookup_robot_orientation()?;
    Ok(robot_pose_from_sim(position, euler_rad, gps_enabled))
}

/// Convert a raw simulator pose (position plus Euler angles in radians) into
/// the [`RobotPose`] reported to clients.
///
/// Each angle is shifted by π/2 before conversion to degrees, so a robot
/// lying flat at zero rotation reads `90°` on every axis.  With GPS disabled
/// the position is replaced by the origin.
pub fn robot_pose_from_sim(position: Pose3D, euler_rad: [f64; 3], gps_enabled: bool) -> RobotPose {
    let [roll, pitch, yaw] = euler_rad.map(|a| (a + FRAC_PI_2).to_degrees());
    RobotPose {
        position: if gps_enabled { position } else { Pose3D::origin() },
        roll,
        pitch,
        yaw,
        gps_enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rotation_reads_ninety_degrees() {
        let pose = robot_pose_from_sim(Pose3D::new(1.0, 2.0, 0.1), [0.0, 0.0, 0.0], true);
        assert!((pose.roll - 90.0).abs() < 1e-9);
        assert!((pose.pitch - 90.0).abs() < 1e-9);
        assert!((pose.yaw - 90.0).abs() < 1e-9);
        assert_eq!(pose.position, Pose3D::new(1.0, 2.0, 0.1));
    }

    #[test]
    fn negative_half_pi_reads_zero() {
        let pose = robot_pose_from_sim(Pose3D::origin(), [0.0, 0.0, -FRAC_PI_2], true);
        assert!(pose.yaw.abs() < 1e-9);
    }

    #[test]
    fn report_combines_position_and_orientation() {
        use crate::sim::SimWorld;

        let world = SimWorld::builder()
            .with_robot_position(Pose3D::new(0.5, 0.5, 0.0))
            .with_robot_orientation([0.0, 0.0, FRAC_PI_2])
            .build();
        let pose = report_robot_pose(&world, true).unwrap();
        assert_eq!(pose.position, Pose3D::new(0.5, 0.5, 0.0));
        assert!((pose.yaw - 180.0).abs() < 1e-9);

        let hidden = report_robot_pose(&world, false).unwrap();
        assert_eq!(hidden.position, Pose3D::origin());
        // The scoring position is unaffected.
        assert_eq!(world.lookup_robot_pose().unwrap(), Pose3D::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn gps_disabled_hides_position() {
        let pose = robot_pose_from_sim(Pose3D::new(1.0, 2.0, 3.0), [0.0, 0.0, 0.0], false);
        assert_eq!(pose.position, Pose3D::origin());
        assert!(!pose.gps_enabled);
        // Orientation is still reported.
        assert!((pose.yaw - 90.0).abs() < 1e-9);
    }
}
