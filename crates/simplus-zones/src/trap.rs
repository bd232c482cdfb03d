//! [`TrapZone`] – edge-triggered, debounced proximity penalty.
//!
//! # State machine
//!
//! ```text
//!              distance <= r            (emit penalty)
//!   DISARMED ─────────────────────────────────────────▶ ARMED
//!      ▲                                                  │
//!      └──────────────────────────────────────────────────┘
//!              distance >= r + bandgap  (emit 0)
//! ```
//!
//! Every other evaluation emits `0` and keeps the state.  The penalty fires
//! only on the arming edge, never while armed or on release, and the robot
//! must clear the outer band before the trap can fire again.
//!
//! # Example
//!
//! ```rust
//! use simplus_types::{Pose3D, ReferenceObject};
//! use simplus_zones::nearest::ReferenceSet;
//! use simplus_zones::trap::{TrapState, TrapZone};
//! use simplus_zones::zone::ZoneGeometry;
//!
//! let refs = ReferenceSet::new("hole", vec![ReferenceObject::new("pit", Pose3D::origin())]).unwrap();
//! let mut trap = TrapZone::new(ZoneGeometry::new("hole", refs, 1.0), 0.5, 3.0);
//!
//! assert_eq!(trap.evaluate(&Pose3D::new(0.9, 0.0, 0.0)).score_delta, 3.0);
//! assert_eq!(trap.state(), TrapState::Armed);
//! assert_eq!(trap.evaluate(&Pose3D::new(0.5, 0.0, 0.0)).score_delta, 0.0);
//! ```

use simplus_types::{Pose3D, ScoreEvent, ZoneOutcome};
use tracing::{debug, info};

use crate::zone::ZoneGeometry;

/// Arming state of a trap.  Starts [`TrapState::Disarmed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrapState {
    #[default]
    Disarmed,
    Armed,
}

impl TrapState {
    pub fn is_armed(self) -> bool {
        self == TrapState::Armed
    }
}

/// A hysteresis trap.  Owns its [`TrapState`]; evaluation needs `&mut self`,
/// so one trap is never evaluated concurrently with itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TrapZone {
    pub geometry: ZoneGeometry,
    pub bandgap_radius: f64,
    pub penalty: f64,
    state: TrapState,
}

impl TrapZone {
    pub fn new(geometry: ZoneGeometry, bandgap_radius: f64, penalty: f64) -> Self {
        Self {
            geometry,
            bandgap_radius,
            penalty,
            state: TrapState::Disarmed,
        }
    }

    pub fn id(&self) -> &str {
        &self.geometry.id
    }

    pub fn state(&self) -> TrapState {
        self.state
    }

    /// Distance the robot must reach before an armed trap disarms.
    pub fn release_radius(&self) -> f64 {
        self.geometry.trigger_radius + self.bandgap_radius
    }

    /// Force the trap back to [`TrapState::Disarmed`], e.g. between rounds.
    pub fn reset(&mut self) {
        self.state = TrapState::Disarmed;
    }

    /// Evaluate `pose`, advancing the state machine by one step.
    pub fn evaluate(&mut self, pose: &Pose3D) -> ScoreEvent {
        let hit = self.geometry.nearest(pose);
        let distance = hit.distance;

        let (score_delta, outcome) = match self.state {
            TrapState::Disarmed if distance <= self.geometry.trigger_radius => {
                self.state = TrapState::Armed;
                (self.penalty, ZoneOutcome::Triggered)
            }
            TrapState::Disarmed => (0.0, ZoneOutcome::Idle),
            TrapState::Armed if distance >= self.release_radius() => {
                self.state = TrapState::Disarmed;
                (0.0, ZoneOutcome::Released)
            }
            TrapState::Armed => (0.0, ZoneOutcome::Armed),
        };

        match outcome {
            ZoneOutcome::Triggered | ZoneOutcome::Released => info!(
                zone = %self.geometry.id,
                x = pose.x,
                y = pose.y,
                z = pose.z,
                nearest = %hit.object.name,
                distance,
                penalty = score_delta,
                ?outcome,
                "trap state changed"
            ),
            _ => debug!(zone = %self.geometry.id, distance, ?outcome, "trap evaluated"),
        }

        ScoreEvent {
            zone_id: self.geometry.id.clone(),
            nearest_object: hit.object.name.clone(),
            distance,
            score_delta,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nearest::ReferenceSet;
    use simplus_types::ReferenceObject;

    const R: f64 = 1.0;
    const BAND: f64 = 0.5;
    const EPS: f64 = 1e-3;
    const PENALTY: f64 = 2.5;

    fn trap() -> TrapZone {
        let refs = ReferenceSet::new("hole", vec![ReferenceObject::new("pit", Pose3D::origin())])
            .unwrap();
        TrapZone::new(ZoneGeometry::new("hole", refs, R), BAND, PENALTY)
    }

    fn at(d: f64) -> Pose3D {
        Pose3D::new(d, 0.0, 0.0)
    }

    #[test]
    fn starts_disarmed() {
        assert_eq!(trap().state(), TrapState::Disarmed);
        assert!(!trap().state().is_armed());
    }

    #[test]
    fn far_pose_is_idle() {
        let mut t = trap();
        let ev = t.evaluate(&at(5.0));
        assert_eq!(ev.score_delta, 0.0);
        assert_eq!(ev.outcome, ZoneOutcome::Idle);
        assert_eq!(t.state(), TrapState::Disarmed);
    }

    #[test]
    fn full_hysteresis_cycle() {
        let mut t = trap();

        // Approach: fires once and arms.
        let ev = t.evaluate(&at(R - EPS));
        assert_eq!(ev.score_delta, PENALTY);
        assert_eq!(ev.outcome, ZoneOutcome::Triggered);
        assert_eq!(ev.nearest_object, "pit");
        assert_eq!(t.state(), TrapState::Armed);

        // Lingering inside: silent.
        let ev = t.evaluate(&at(0.0));
        assert_eq!(ev.score_delta, 0.0);
        assert_eq!(ev.outcome, ZoneOutcome::Armed);

        // Just outside the trigger radius but inside the band: still armed.
        let ev = t.evaluate(&at(R + EPS));
        assert_eq!(ev.score_delta, 0.0);
        assert_eq!(t.state(), TrapState::Armed);

        // Back in without clearing the band: no second penalty.
        let ev = t.evaluate(&at(R - EPS));
        assert_eq!(ev.score_delta, 0.0);
        assert_eq!(t.state(), TrapState::Armed);

        // Clear the band: release without emitting anything.
        let ev = t.evaluate(&at(R + BAND + EPS));
        assert_eq!(ev.score_delta, 0.0);
        assert_eq!(ev.outcome, ZoneOutcome::Released);
        assert_eq!(t.state(), TrapState::Disarmed);

        // Re-approach fires again.
        let ev = t.evaluate(&at(R - EPS));
        assert_eq!(ev.score_delta, PENALTY);
        assert_eq!(t.state(), TrapState::Armed);
    }

    #[test]
    fn trigger_boundary_is_inclusive() {
        let mut t = trap();
        assert_eq!(t.evaluate(&at(R)).score_delta, PENALTY);
    }

    #[test]
    fn release_boundary_is_inclusive() {
        let mut t = trap();
        t.evaluate(&at(0.0));
        let ev = t.evaluate(&at(R + BAND));
        assert_eq!(ev.outcome, ZoneOutcome::Released);
        assert_eq!(t.state(), TrapState::Disarmed);
    }

    #[test]
    fn zero_bandgap_releases_at_trigger_radius() {
        let refs = ReferenceSet::new("hole", vec![ReferenceObject::new("pit", Pose3D::origin())])
            .unwrap();
        let mut t = TrapZone::new(ZoneGeometry::new("hole", refs, R), 0.0, PENALTY);
        t.evaluate(&at(0.5));
        assert!(t.state().is_armed());
        t.evaluate(&at(R));
        assert_eq!(t.state(), TrapState::Disarmed);
    }

    #[test]
    fn reset_disarms() {
        let mut t = trap();
        t.evaluate(&at(0.0));
        assert!(t.state().is_armed());
        t.reset();
        assert_eq!(t.state(), TrapState::Disarmed);
        assert_eq!(t.evaluate(&at(0.0)).score_delta, PENALTY);
    }

    #[test]
    fn release_radius_sums_band() {
        assert!((trap().release_radius() - (R + BAND)).abs() < 1e-12);
    }
}
