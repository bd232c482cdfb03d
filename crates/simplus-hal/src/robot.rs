//! [`RobotDriver`] – commands and sensor reads against the simulated robot,
//! and [`RobotLayout`], the naming scheme for its parts.

use serde::{Deserialize, Serialize};
use simplus_types::{Pose3D, SimError};

use crate::drive::DifferentialDrive;
use crate::sensor::{CameraImage, IndicatorColor, ProximityReading, Rgb};
use crate::world::WorldQuery;

/// Synchronous access to the robot's actuators and sensors.
///
/// Every call may block on the remote API and may fail with
/// [`SimError::Transport`]; callers propagate those errors untouched.
pub trait RobotDriver {
    /// Set wheel joint target velocities in rad/s.
    fn set_motor_velocities(&mut self, left: f64, right: f64) -> Result<(), SimError>;

    /// Read proximity sensor `index` (`0 <= index < proximity_count`).
    fn read_proximity_sensor(&mut self, index: usize) -> Result<ProximityReading, SimError>;

    /// Read color sensor `index` (`0` centre, `1` left, `2` right).
    fn read_color_sensor(&mut self, index: usize) -> Result<Rgb, SimError>;

    /// Grab the current camera frame.
    fn read_camera_image(&mut self) -> Result<CameraImage, SimError>;

    /// Switch the indicator LED.
    fn set_indicator_color(&mut self, color: IndicatorColor) -> Result<(), SimError>;
}

/// Suffixes of the three color sensors, centre first.
pub const COLOR_SENSOR_SUFFIXES: [&str; 3] = ["", "_l", "_r"];

/// Names of the robot's parts inside the simulation scene.
///
/// An immutable value: build one per robot and pass it where needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotLayout {
    /// Scene object of the robot base; its pose is the robot pose.
    pub base: String,
    /// Prefix shared by every part below.
    pub namespace: String,
    pub left_motor: String,
    pub right_motor: String,
    /// Wheel radius in metres.
    pub wheel_radius: f64,
    /// Wheel separation in metres, for when the wheel joints cannot be
    /// queried.  See [`RobotLayout::calibrate_track_width`].
    pub track_width: f64,
    pub proximity_count: usize,
    pub proximity_prefix: String,
    pub camera: String,
    /// Optional joint used to pan the camera.
    pub camera_joint: Option<String>,
    pub color_sensor_prefix: String,
    pub gps_enabled: bool,
}

impl Default for RobotLayout {
    fn default() -> Self {
        Self {
            base: "ePuck_base".to_string(),
            namespace: "ePuck_".to_string(),
            left_motor: "leftJoint".to_string(),
            right_motor: "rightJoint".to_string(),
            wheel_radius: 0.02,
            track_width: 0.052,
            proximity_count: 8,
            proximity_prefix: "proxSensor".to_string(),
            camera: "camera".to_string(),
            camera_joint: None,
            color_sensor_prefix: "lightSensor".to_string(),
            gps_enabled: true,
        }
    }
}

impl RobotLayout {
    fn scoped(&self, name: &str) -> String {
        format!("{}{}", self.namespace, name)
    }

    /// Drive geometry from the configured wheel radius and track width.
    pub fn drive(&self) -> DifferentialDrive {
        DifferentialDrive::new(self.wheel_radius, self.track_width)
    }

    /// Measure the wheel separation from the wheel joint positions in
    /// `world` and store it in `track_width`.
    ///
    /// The joint offset is rotated into the base frame by the robot yaw
    /// before [`DifferentialDrive::track_width_from`] is applied.
    ///
    /// # Errors
    ///
    /// [`SimError::ObjectNotFound`] when a joint is missing from the scene;
    /// `track_width` is left unchanged.
    pub fn calibrate_track_width<W: WorldQuery + ?Sized>(
        &mut self,
        world: &W,
    ) -> Result<f64, SimError> {
        let left = world.lookup_object_position(&self.left_motor_name())?;
        let right = world.lookup_object_position(&self.right_motor_name())?;
        let yaw = world.lookup_robot_orientation()?[2];

        let (sin, cos) = yaw.sin_cos();
        let (dx, dy) = (left.x - right.x, left.y - right.y);
        let offset = Pose3D::new(cos * dx + sin * dy, cos * dy - sin * dx, 0.0);
        self.track_width = DifferentialDrive::track_width_from(offset, Pose3D::origin());
        Ok(self.track_width)
    }

    pub fn left_motor_name(&self) -> String {
        self.scoped(&self.left_motor)
    }

    pub fn right_motor_name(&self) -> String {
        self.scoped(&self.right_motor)
    }

    pub fn camera_name(&self) -> String {
        self.scoped(&self.camera)
    }

    pub fn camera_joint_name(&self) -> Option<String> {
        self.camera_joint.as_deref().map(|j| self.scoped(j))
    }

    /// Scene names of the proximity sensors.  Sensors are numbered from 1 in
    /// the scene while indices start at 0.
    pub fn proximity_sensor_names(&self) -> Vec<String> {
        (1..=self.proximity_count)
            .map(|i| format!("{}{}{}", self.namespace, self.proximity_prefix, i))
            .collect()
    }

    /// Scene names of the centre, left and right color sensors.
    pub fn color_sensor_names(&self) -> Vec<String> {
        COLOR_SENSOR_SUFFIXES
            .iter()
            .map(|s| format!("{}{}{}", self.namespace, self.color_sensor_prefix, s))
            .collect()
    }
}
