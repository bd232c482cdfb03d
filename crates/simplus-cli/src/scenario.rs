//! Offline replay scenarios.
//!
//! A scenario fixes the scene (named object positions, robot orientation)
//! and scripts the robot position and client command for every tick.
//!
//! ```toml
//! state = "running"
//!
//! [[objects]]
//! name = "box"
//! position = { x = 1.0, y = 0.0, z = 0.0 }
//!
//! [[ticks]]
//! robot = { x = 0.9, y = 0.0, z = 0.0 }
//!
//! [ticks.command]
//! linear = 0.1
//! indicator = "green"
//! actions = [{ kind = "pickup", x = 1.0, y = 0.0, z = 0.0 }]
//! ```

use serde::Deserialize;
use simplus_hal::{SimState, SimWorld};
use simplus_runtime::RobotCommand;
use simplus_types::{Pose3D, ReferenceObject};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub objects: Vec<ReferenceObject>,
    /// Robot orientation as simulator Euler angles in radians.
    #[serde(default)]
    pub orientation: [f64; 3],
    /// Simulation state when the replay starts.  Anything but running means
    /// the match never starts.
    #[serde(default = "default_state")]
    pub state: SimState,
    #[serde(default)]
    pub ticks: Vec<ScenarioTick>,
}

fn default_state() -> SimState {
    SimState::Running
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioTick {
    /// True robot position for this tick.
    pub robot: Pose3D,
    #[serde(default)]
    pub command: RobotCommand,
}

impl Scenario {
    pub fn parse(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| format!("Failed to parse scenario: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scenario at {}: {}", path.display(), e))?;
        Self::parse(&raw)
    }

    /// Build the in-process world for this scenario, robot at the first
    /// scripted position.
    pub fn world(&self) -> SimWorld {
        let start = self
            .ticks
            .first()
            .map(|t| t.robot)
            .unwrap_or_else(Pose3D::origin);
        self.objects
            .iter()
            .fold(SimWorld::builder(), |b, obj| {
                b.with_object(obj.name.clone(), obj.position)
            })
            .with_robot_position(start)
            .with_robot_orientation(self.orientation)
            .with_sim_state(self.state)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplus_hal::{IndicatorColor, WorldQuery};

    const SAMPLE: &str = r#"
orientation = [0.0, 0.0, 1.5]

[[objects]]
name = "box"
position = { x = 1.0, y = 0.0, z = 0.0 }

[[objects]]
name = "pit"
position = { x = -1.0, y = 0.0, z = 0.0 }

[[ticks]]
robot = { x = 0.5, y = 0.0, z = 0.0 }

[ticks.command]
linear = 0.1
indicator = "green"
actions = [{ kind = "pickup", x = 1.0, y = 0.0, z = 0.0 }]

[[ticks]]
robot = { x = -1.0, y = 0.0, z = 0.0 }
"#;

    #[test]
    fn parses_objects_and_ticks() {
        let s = Scenario::parse(SAMPLE).unwrap();
        assert_eq!(s.objects.len(), 2);
        assert_eq!(s.ticks.len(), 2);
        assert_eq!(s.state, SimState::Running);
        let first = &s.ticks[0].command;
        assert_eq!(first.linear, 0.1);
        assert_eq!(first.angular, 0.0);
        assert_eq!(first.indicator, IndicatorColor::Green);
        assert_eq!(first.actions[0].kind, "pickup");
        // A tick without a command table gets the idle command.
        assert_eq!(s.ticks[1].command, RobotCommand::default());
    }

    #[test]
    fn world_places_objects_and_robot() {
        let s = Scenario::parse(SAMPLE).unwrap();
        let w = s.world();
        assert_eq!(
            w.lookup_object_position("pit").unwrap(),
            Pose3D::new(-1.0, 0.0, 0.0)
        );
        assert_eq!(w.lookup_robot_pose().unwrap(), Pose3D::new(0.5, 0.0, 0.0));
        assert_eq!(w.lookup_robot_orientation().unwrap(), [0.0, 0.0, 1.5]);
    }

    #[test]
    fn rejects_malformed_scenario() {
        let err = Scenario::parse("[[ticks]]\nrobot = 3").unwrap_err();
        assert!(err.starts_with("Failed to parse scenario"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let err = Scenario::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.contains("Failed to read scenario"));
    }
}
