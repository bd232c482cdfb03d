//! [`ActionZone`] – stateless proximity scoring.
//!
//! Every evaluation scores independently: `reward_score` when the pose lies
//! within the trigger radius of the nearest reference object (boundary
//! inclusive), `penalty_score` otherwise.  A miss is still an event.

use simplus_types::{Pose3D, ScoreEvent, ZoneOutcome};
use tracing::debug;

use crate::zone::ZoneGeometry;

#[derive(Debug, Clone, PartialEq)]
pub struct ActionZone {
    pub geometry: ZoneGeometry,
    pub reward_score: f64,
    pub penalty_score: f64,
}

impl ActionZone {
    pub fn new(geometry: ZoneGeometry, reward_score: f64, penalty_score: f64) -> Self {
        Self {
            geometry,
            reward_score,
            penalty_score,
        }
    }

    pub fn id(&self) -> &str {
        &self.geometry.id
    }

    /// Score `pose` against this zone.
    pub fn evaluate(&self, pose: &Pose3D) -> ScoreEvent {
        let hit = self.geometry.nearest(pose);
        let (score_delta, outcome) = if hit.distance <= self.geometry.trigger_radius {
            (self.reward_score, ZoneOutcome::Success)
        } else {
            (self.penalty_score, ZoneOutcome::Failure)
        };
        debug!(
            zone = %self.geometry.id,
            x = pose.x,
            y = pose.y,
            z = pose.z,
            nearest = %hit.object.name,
            distance = hit.distance,
            score = score_delta,
            ?outcome,
            "action evaluated"
        );
        ScoreEvent {
            zone_id: self.geometry.id.clone(),
            nearest_object: hit.object.name.clone(),
            distance: hit.distance,
            score_delta,
            outcome,
        }
    }
}
