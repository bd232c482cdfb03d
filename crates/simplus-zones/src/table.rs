//! [`ZoneTable`] – zones keyed by id, kept in insertion order.

use std::collections::HashMap;

use simplus_types::{Pose3D, ScoreEvent};

use crate::action::ActionZone;
use crate::config::ZoneKind;
use crate::trap::TrapZone;
use crate::zone::ZoneGeometry;

/// A resolved zone of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Zone {
    Action(ActionZone),
    Trap(TrapZone),
}

impl Zone {
    pub fn id(&self) -> &str {
        &self.geometry().id
    }

    pub fn kind(&self) -> ZoneKind {
        match self {
            Zone::Action(_) => ZoneKind::Action,
            Zone::Trap(_) => ZoneKind::Trap,
        }
    }

    pub fn geometry(&self) -> &ZoneGeometry {
        match self {
            Zone::Action(z) => &z.geometry,
            Zone::Trap(z) => &z.geometry,
        }
    }

    /// Evaluate with the engine matching the zone's kind.
    pub fn evaluate(&mut self, pose: &Pose3D) -> ScoreEvent {
        match self {
            Zone::Action(z) => z.evaluate(pose),
            Zone::Trap(z) => z.evaluate(pose),
        }
    }
}

/// Outcome of sweeping every trap zone once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrapSweep {
    /// Sum of `score_delta` over all trap events.
    pub total_penalty: f64,
    /// One event per trap zone, in table order.
    pub events: Vec<ScoreEvent>,
}

/// Zones keyed by id.
///
/// Inserting an id that already exists replaces that zone in place, keeping
/// its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneTable {
    zones: Vec<Zone>,
    index: HashMap<String, usize>,
}

impl ZoneTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `zone`, returning the zone it replaced, if any.
    pub fn insert(&mut self, zone: Zone) -> Option<Zone> {
        match self.index.get(zone.id()) {
            Some(&pos) => Some(std::mem::replace(&mut self.zones[pos], zone)),
            None => {
                self.index.insert(zone.id().to_string(), self.zones.len());
                self.zones.push(zone);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Zone> {
        self.index.get(id).map(|&pos| &self.zones[pos])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Zone> {
        self.index.get(id).map(|&pos| &mut self.zones[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.zones.iter().map(Zone::id)
    }

    /// Evaluate zone `id` with its own engine.  `None` for unknown ids.
    pub fn evaluate(&mut self, id: &str, pose: &Pose3D) -> Option<ScoreEvent> {
        self.get_mut(id).map(|z| z.evaluate(pose))
    }

    /// Score an action request against action zone `id`.
    ///
    /// Returns `None` when `id` is unknown or names a trap zone; callers
    /// score that as `0`.
    pub fn call_action(&self, id: &str, pose: &Pose3D) -> Option<ScoreEvent> {
        match self.get(id)? {
            Zone::Action(z) => Some(z.evaluate(pose)),
            Zone::Trap(_) => None,
        }
    }

    /// Evaluate every action zone against `pose`, in table order.
    pub fn sweep_actions(&self, pose: &Pose3D) -> Vec<ScoreEvent> {
        self.zones
            .iter()
            .filter_map(|zone| match zone {
                Zone::Action(z) => Some(z.evaluate(pose)),
                Zone::Trap(_) => None,
            })
            .collect()
    }

    /// Evaluate every trap zone exactly once against `pose`.
    pub fn check_traps(&mut self, pose: &Pose3D) -> TrapSweep {
        let mut sweep = TrapSweep::default();
        for zone in &mut self.zones {
            if let Zone::Trap(trap) = zone {
                let event = trap.evaluate(pose);
                sweep.total_penalty += event.score_delta;
                sweep.events.push(event);
            }
        }
        sweep
    }

    /// Disarm every trap.
    pub fn reset_traps(&mut self) {
        for zone in &mut self.zones {
            if let Zone::Trap(trap) = zone {
                trap.reset();
            }
        }
    }
}
