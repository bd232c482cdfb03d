//! [`SimWorld`] – in-process stand-in for the simulator remote API.
//!
//! Holds a static table of named object positions and a scripted robot, and
//! implements [`WorldQuery`], [`RobotDriver`] and [`GameServer`] so the full
//! scoring stack runs in unit tests and offline replays without a simulator.
//!
//! # Stub behaviour
//!
//! | Call | Stub behaviour |
//! |---|---|
//! | `lookup_object_position` | Returns the registered position, or `ObjectNotFound`. |
//! | `lookup_robot_pose` | Returns the position last set with [`SimWorld::set_robot_position`]. |
//! | `lookup_robot_orientation` | Returns the scripted Euler angles. |
//! | `set_motor_velocities` | Records the command; read back with [`SimWorld::motor_velocities`]. |
//! | `read_proximity_sensor` | Returns the scripted reading, or no detection. |
//! | `read_color_sensor` | Returns the scripted colour, or black. Indices above 2 fail. |
//! | `read_camera_image` | Returns a blank 4×4 RGB frame. |
//! | `set_indicator_color` | Records the colour. |
//! | `register_team` | Assigns ids `0, 1, ...` in registration order; a known name keeps its id. |
//! | `set_score` | Records the score; read back with [`SimWorld::team_score`]. Unknown ids fail. |
//! | `match_started` | `true` while the state is [`SimState::Running`]. |
//! | `server_time_ms` | Returns the clock moved with [`SimWorld::advance_clock`]. |
//! | `start_simulation` / `stop_simulation` / `pause_simulation` | Set the state. |
//!
//! After [`SimWorld::disconnect`] every call fails with
//! [`SimError::Transport`].
//!
//! # Example
//!
//! ```rust
//! use simplus_hal::{SimWorld, WorldQuery};
//! use simplus_types::Pose3D;
//!
//! let world = SimWorld::builder()
//!     .with_object("box", Pose3D::new(1.0, 0.0, 0.0))
//!     .build();
//!
//! assert_eq!(world.lookup_object_position("box").unwrap(), Pose3D::new(1.0, 0.0, 0.0));
//! assert!(world.lookup_object_position("crate").is_err());
//! ```

use std::collections::HashMap;

use simplus_types::{Pose3D, SimError};

use crate::game::{GameServer, SimState};
use crate::robot::{COLOR_SENSOR_SUFFIXES, RobotDriver};
use crate::sensor::{CameraImage, IndicatorColor, ProximityReading, Rgb};
use crate::world::WorldQuery;

/// An in-memory simulated world.  Construct with [`SimWorld::builder`].
#[derive(Debug, Clone)]
pub struct SimWorld {
    objects: HashMap<String, Pose3D>,
    robot_position: Pose3D,
    robot_euler_rad: [f64; 3],
    proximity: HashMap<usize, ProximityReading>,
    colors: HashMap<usize, Rgb>,
    motor_velocities: Option<(f64, f64)>,
    indicator: IndicatorColor,
    teams: Vec<String>,
    scores: HashMap<u32, f64>,
    state: SimState,
    clock_ms: u64,
    connected: bool,
}

impl SimWorld {
    /// Create a new builder with an empty scene.
    pub fn builder() -> SimWorldBuilder {
        SimWorldBuilder::default()
    }

    /// Move the robot base to `position`.
    pub fn set_robot_position(&mut self, position: Pose3D) {
        self.robot_position = position;
    }

    /// Script the next reading of proximity sensor `index`.
    pub fn set_proximity(&mut self, index: usize, reading: ProximityReading) {
        self.proximity.insert(index, reading);
    }

    /// Last wheel velocities commanded, if any.
    pub fn motor_velocities(&self) -> Option<(f64, f64)> {
        self.motor_velocities
    }

    /// Colour the indicator LED currently shows.
    pub fn indicator(&self) -> IndicatorColor {
        self.indicator
    }

    /// Last score shown for `team_id`.
    pub fn team_score(&self, team_id: u32) -> Option<f64> {
        self.scores.get(&team_id).copied()
    }

    pub fn team_name(&self, team_id: u32) -> Option<&str> {
        self.teams.get(team_id as usize).map(String::as_str)
    }

    /// Move the simulator clock forward by `ms`.
    pub fn advance_clock(&mut self, ms: u64) {
        self.clock_ms += ms;
    }

    /// Simulate a dropped connection: every later call fails.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    fn ensure_connected(&self, component: &str) -> Result<(), SimError> {
        if self.connected {
            Ok(())
        } else {
            Err(SimError::Transport {
                component: component.to_string(),
                details: "simulator connection closed".to_string(),
            })
        }
    }
}

impl WorldQuery for SimWorld {
    fn lookup_object_position(&self, name: &str) -> Result<Pose3D, SimError> {
        self.ensure_connected("world")?;
        self.objects
            .get(name)
            .copied()
            .ok_or_else(|| SimError::ObjectNotFound(name.to_string()))
    }

    fn lookup_robot_pose(&self) -> Result<Pose3D, SimError> {
        self.ensure_connected("robot_base")?;
        Ok(self.robot_position)
    }

    fn lookup_robot_orientation(&self) -> Result<[f64; 3], SimError> {
        self.ensure_connected("robot_base")?;
        Ok(self.robot_euler_rad)
    }
}

impl RobotDriver for SimWorld {
    fn set_motor_velocities(&mut self, left: f64, right: f64) -> Result<(), SimError> {
        self.ensure_connected("motors")?;
        self.motor_velocities = Some((left, right));
        Ok(())
    }

    fn read_proximity_sensor(&mut self, index: usize) -> Result<ProximityReading, SimError> {
        self.ensure_connected("proximity_sensor")?;
        Ok(self.proximity.get(&index).copied().unwrap_or_default())
    }

    fn read_color_sensor(&mut self, index: usize) -> Result<Rgb, SimError> {
        self.ensure_connected("color_sensor")?;
        if index >= COLOR_SENSOR_SUFFIXES.len() {
            return Err(SimError::Transport {
                component: "color_sensor".to_string(),
                details: format!("no color sensor at index {index}"),
            });
        }
        Ok(self.colors.get(&index).copied().unwrap_or_default())
    }

    fn read_camera_image(&mut self) -> Result<CameraImage, SimError> {
        self.ensure_connected("camera")?;
        Ok(CameraImage {
            width: 4,
            height: 4,
            pixels: vec![0u8; 4 * 4 * 3],
        })
    }

    fn set_indicator_color(&mut self, color: IndicatorColor) -> Result<(), SimError> {
        self.ensure_connected("indicator")?;
        self.indicator = color;
        Ok(())
    }
}

impl GameServer for SimWorld {
    fn register_team(&mut self, name: &str) -> Result<u32, SimError> {
        self.ensure_connected("game_manager")?;
        let index = match self.teams.iter().position(|t| t == name) {
            Some(index) => index,
            None => {
                self.teams.push(name.to_string());
                self.teams.len() - 1
            }
        };
        Ok(index as u32)
    }

    fn set_score(&mut self, team_id: u32, score: f64) -> Result<(), SimError> {
        self.ensure_connected("game_manager")?;
        if team_id as usize >= self.teams.len() {
            return Err(SimError::Transport {
                component: "game_manager".to_string(),
                details: format!("no team registered with id {team_id}"),
            });
        }
        self.scores.insert(team_id, score);
        Ok(())
    }

    fn match_started(&mut self) -> Result<bool, SimError> {
        self.ensure_connected("game_manager")?;
        Ok(self.state == SimState::Running)
    }

    fn sim_state(&mut self) -> Result<SimState, SimError> {
        self.ensure_connected("simulation")?;
        Ok(self.state)
    }

    fn server_time_ms(&mut self) -> Result<u64, SimError> {
        self.ensure_connected("simulation")?;
        Ok(self.clock_ms)
    }

    fn start_simulation(&mut self) -> Result<(), SimError> {
        self.ensure_connected("simulation")?;
        self.state = SimState::Running;
        Ok(())
    }

    fn stop_simulation(&mut self) -> Result<(), SimError> {
        self.ensure_connected("simulation")?;
        self.state = SimState::Stopped;
        Ok(())
    }

    fn pause_simulation(&mut self) -> Result<(), SimError> {
        self.ensure_connected("simulation")?;
        self.state = SimState::Paused;
        Ok(())
    }
}

/// Builder for [`SimWorld`].
#[derive(Debug, Clone)]
pub struct SimWorldBuilder {
    objects: HashMap<String, Pose3D>,
    robot_position: Pose3D,
    robot_euler_rad: [f64; 3],
    colors: HashMap<usize, Rgb>,
    state: SimState,
}

impl Default for SimWorldBuilder {
    fn default() -> Self {
        Self {
            objects: HashMap::new(),
            robot_position: Pose3D::origin(),
            robot_euler_rad: [0.0; 3],
            colors: HashMap::new(),
            state: SimState::Running,
        }
    }
}

impl SimWorldBuilder {
    /// Place a named object.  A later call with the same name replaces it.
    pub fn with_object(mut self, name: impl Into<String>, position: Pose3D) -> Self {
        self.objects.insert(name.into(), position);
        self
    }

    pub fn with_robot_position(mut self, position: Pose3D) -> Self {
        self.robot_position = position;
        self
    }

    /// Robot orientation as simulator Euler angles in radians.
    pub fn with_robot_orientation(mut self, euler_rad: [f64; 3]) -> Self {
        self.robot_euler_rad = euler_rad;
        self
    }

    pub fn with_color(mut self, index: usize, color: Rgb) -> Self {
        self.colors.insert(index, color);
        self
    }

    /// Initial simulation state.  Defaults to running, so the match counts as
    /// started.
    pub fn with_sim_state(mut self, state: SimState) -> Self {
        self.state = state;
        self
    }

    /// Consume the builder and return the world.
    pub fn build(self) -> SimWorld {
        SimWorld {
            objects: self.objects,
            robot_position: self.robot_position,
            robot_euler_rad: self.robot_euler_rad,
            proximity: HashMap::new(),
            colors: self.colors,
            motor_velocities: None,
            indicator: IndicatorColor::Off,
            teams: Vec::new(),
            scores: HashMap::new(),
            state: self.state,
            clock_ms: 0,
            connected: true,
        }
    }
}
