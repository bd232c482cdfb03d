//! `simplus-hal` – simulator collaborator boundary
//!
//! Everything the scoring stack needs from the physics simulator, expressed
//! as traits so the remote-API client can be swapped for an in-process stub.
//!
//! # Modules
//!
//! - [`world`] – [`WorldQuery`][world::WorldQuery]: named-object and robot
//!   pose lookups used by the zone registry and the tick runner.
//! - [`robot`] – [`RobotDriver`][robot::RobotDriver] plus
//!   [`RobotLayout`][robot::RobotLayout], the naming scheme that maps robot
//!   parts to simulator object names.
//! - [`sensor`] – decoded sensor readings and the indicator LED colours.
//! - [`drive`] – differential-drive kinematics.
//! - [`game`] – [`GameServer`][game::GameServer]: team registration, score
//!   display and simulation run control.
//! - [`sim`] – [`SimWorld`][sim::SimWorld], an in-memory world for tests and
//!   offline replays.

pub mod drive;
pub mod game;
pub mod robot;
pub mod sensor;
pub mod sim;
pub mod world;

pub use drive::{DifferentialDrive, WheelVelocities};
pub use game::{GameServer, SimState};
pub use robot::{RobotDriver, RobotLayout};
pub use sensor::{CameraImage, IndicatorColor, ProximityReading, Rgb};
pub use sim::SimWorld;
pub use world::{WorldQuery, report_robot_pose};
