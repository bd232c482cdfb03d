use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point in the simulated world, in metres, world frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Pose3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The world origin.
    pub fn origin() -> Self {
        Self::default()
    }

    /// Euclidean distance between two points.
    pub fn distance_to(&self, other: &Pose3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Full robot pose as reported to game clients.
///
/// Orientation angles are in degrees.  When GPS is disabled the position is
/// reported as the origin so clients have to rely on dead reckoning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotPose {
    pub position: Pose3D,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub gps_enabled: bool,
}

/// A named simulation object whose position anchors a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceObject {
    pub name: String,
    pub position: Pose3D,
}

impl ReferenceObject {
    pub fn new(name: impl Into<String>, position: Pose3D) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// How a single zone evaluation turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneOutcome {
    /// Action zone: pose within the trigger radius, reward applied.
    Success,
    /// Action zone: pose outside the trigger radius, penalty applied.
    Failure,
    /// Trap zone: disarmed trap entered, penalty applied and trap armed.
    Triggered,
    /// Trap zone: still armed, robot has not cleared the outer band.
    Armed,
    /// Trap zone: robot cleared the outer band, trap disarmed.
    Released,
    /// Trap zone: disarmed and out of range.
    Idle,
}

/// Result of evaluating one zone against one pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub zone_id: String,
    pub nearest_object: String,
    pub distance: f64,
    pub score_delta: f64,
    pub outcome: ZoneOutcome,
}

/// An action a game client asks the server to score at a given position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Zone id in the action table, e.g. `"pickup"`.
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ActionRequest {
    pub fn position(&self) -> Pose3D {
        Pose3D::new(self.x, self.y, self.z)
    }
}

/// Global error type spanning configuration, world resolution, and
/// collaborator transport failures.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimError {
    #[error("Config parse error on line {line}, field `{field}`: {details}")]
    ConfigParse {
        line: usize,
        field: String,
        details: String,
    },

    #[error("Object not found in simulation: {0}")]
    ObjectNotFound(String),

    #[error("Zone '{0}' has no reference objects")]
    EmptyZone(String),

    #[error("Transport error on {component}: {details}")]
    Transport { component: String, details: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e.to_string())
    }
}
