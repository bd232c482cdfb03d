//! [`TickRunner`] – one scoring step per simulation tick.
//!
//! Each call to [`TickRunner::tick`]:
//!
//! 1. reads the robot's true position from the world,
//! 2. sweeps every trap zone once against that position,
//! 3. scores each client action request at the position it names,
//! 4. updates the [`ScoreKeeper`] and forwards every event to the sink.
//!
//! Transport errors from the pose lookup abort the tick before any state
//! changes.  Sink failures are logged and do not affect scoring.
//!
//! # Example
//!
//! ```rust
//! use simplus_hal::SimWorld;
//! use simplus_runtime::{NoopSink, TickRunner};
//! use simplus_types::{ActionRequest, Pose3D};
//! use simplus_zones::{ZoneKind, ZoneRegistry, ZoneTable, parse_zone_table};
//!
//! let world = SimWorld::builder()
//!     .with_object("box", Pose3D::new(1.0, 0.0, 0.0))
//!     .build();
//! let defs = parse_zone_table("pickup;box;1;0.5;10;-1", ZoneKind::Action).unwrap();
//! let actions = ZoneRegistry::new(&world).build(defs).unwrap();
//!
//! let mut runner = TickRunner::new(actions, ZoneTable::new(), NoopSink);
//! let request = ActionRequest { kind: "pickup".into(), x: 1.2, y: 0.0, z: 0.0 };
//! let report = runner.tick(&world, &[request]).unwrap();
//! assert_eq!(report.action_delta, 10.0);
//! assert_eq!(runner.score(), 10.0);
//! ```

use serde::Serialize;
use simplus_hal::WorldQuery;
use simplus_types::{ActionRequest, Pose3D, ScoreEvent, SimError, ZoneOutcome};
use simplus_zones::ZoneTable;
use tracing::{debug, warn};

use crate::score::{ScoreKeeper, ScoreSink};

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// 1-based tick number.
    pub tick: u64,
    /// Robot position the traps were evaluated against.
    pub pose: Pose3D,
    /// Sum of action deltas this tick.
    pub action_delta: f64,
    /// Sum of trap penalties this tick, as a positive magnitude.
    pub trap_penalty: f64,
    /// Team score after this tick.
    pub score: f64,
    /// Trap events in table order, then action events in request order.
    pub events: Vec<ScoreEvent>,
}

pub struct TickRunner<S: ScoreSink> {
    actions: ZoneTable,
    traps: ZoneTable,
    keeper: ScoreKeeper,
    sink: S,
    tick: u64,
}

impl<S: ScoreSink> TickRunner<S> {
    pub fn new(actions: ZoneTable, traps: ZoneTable, sink: S) -> Self {
        Self {
            actions,
            traps,
            keeper: ScoreKeeper::new(),
            sink,
            tick: 0,
        }
    }

    /// Current team score.
    pub fn score(&self) -> f64 {
        self.keeper.total()
    }

    pub fn keeper(&self) -> &ScoreKeeper {
        &self.keeper
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn actions(&self) -> &ZoneTable {
        &self.actions
    }

    pub fn traps(&self) -> &ZoneTable {
        &self.traps
    }

    /// Zero the score and disarm every trap, e.g. between rounds.
    pub fn reset(&mut self) {
        self.keeper = ScoreKeeper::new();
        self.traps.reset_traps();
        self.tick = 0;
    }

    /// Run one tick.  See the module docs for the sequence.
    ///
    /// Requests naming an unknown action zone score `0` and produce no event.
    ///
    /// # Errors
    ///
    /// Propagates the [`SimError`] of a failed robot pose lookup.
    pub fn tick<W: WorldQuery + ?Sized>(
        &mut self,
        world: &W,
        requests: &[ActionRequest],
    ) -> Result<TickReport, SimError> {
        let pose = world.lookup_robot_pose()?;
        self.tick += 1;

        let sweep = self.traps.check_traps(&pose);
        for event in &sweep.events {
            if event.outcome == ZoneOutcome::Triggered {
                self.keeper.charge_trap(event.score_delta);
            }
        }
        let mut events = sweep.events;

        let mut action_delta = 0.0;
        for request in requests {
            match self.actions.call_action(&request.kind, &request.position()) {
                Some(event) => {
                    action_delta += event.score_delta;
                    self.keeper.credit_action(event.score_delta);
                    events.push(event);
                }
                None => warn!(tick = self.tick, kind = %request.kind, "unknown action zone, scored as 0"),
            }
        }

        for event in &events {
            if let Err(e) = self.sink.record(self.tick, event) {
                warn!(tick = self.tick, error = %e, "score sink rejected event");
            }
        }

        debug!(
            tick = self.tick,
            action_delta,
            trap_penalty = sweep.total_penalty,
            score = self.keeper.total(),
            "tick complete"
        );

        Ok(TickReport {
            tick: self.tick,
            pose,
            action_delta,
            trap_penalty: sweep.total_penalty,
            score: self.keeper.total(),
            events,
        })
    }

    /// Flush the sink and hand it back.
    pub fn finish(mut self) -> Result<S, SimError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplus_hal::SimWorld;
    use simplus_zones::{ZoneKind, ZoneRegistry, parse_zone_table};

    /// Keeps every recorded event; can be told to fail.
    #[derive(Default)]
    struct RecordingSink {
        events: Vec<(u64, ScoreEvent)>,
        fail: bool,
        flushed: bool,
    }

    impl ScoreSink for RecordingSink {
        fn record(&mut self, tick: u64, event: &ScoreEvent) -> Result<(), SimError> {
            if self.fail {
                return Err(SimError::Io("disk full".to_string()));
            }
            self.events.push((tick, event.clone()));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), SimError> {
            self.flushed = true;
            Ok(())
        }
    }

    fn world() -> SimWorld {
        SimWorld::builder()
            .with_object("box", Pose3D::new(1.0, 0.0, 0.0))
            .with_object("pit", Pose3D::new(-1.0, 0.0, 0.0))
            .build()
    }

    fn runner(world: &SimWorld, sink: RecordingSink) -> TickRunner<RecordingSink> {
        let registry = ZoneRegistry::new(world);
        let actions = registry
            .build(parse_zone_table("pickup;box;1;0.5;10;-2", ZoneKind::Action).unwrap())
            .unwrap();
        let traps = registry
            .build(parse_zone_table("hole;pit;1;0.3;0.5;4", ZoneKind::Trap).unwrap())
            .unwrap();
        TickRunner::new(actions, traps, sink)
    }

    fn request(kind: &str, x: f64) -> ActionRequest {
        ActionRequest {
            kind: kind.to_string(),
            x,
            y: 0.0,
            z: 0.0,
        }
    }

    #[test]
    fn actions_add_and_traps_subtract() {
        let mut w = world();
        let mut r = runner(&w, RecordingSink::default());

        let report = r
            .tick(&w, &[request("pickup", 1.1), request("pickup", 5.0)])
            .unwrap();
        assert_eq!(report.tick, 1);
        assert_eq!(report.action_delta, 8.0);
        assert_eq!(report.trap_penalty, 0.0);
        assert_eq!(report.score, 8.0);

        w.set_robot_position(Pose3D::new(-1.1, 0.0, 0.0));
        let report = r.tick(&w, &[]).unwrap();
        assert_eq!(report.trap_penalty, 4.0);
        assert_eq!(report.events[0].outcome, ZoneOutcome::Triggered);
        assert_eq!(r.score(), 4.0);

        // Lingering does not charge again.
        let report = r.tick(&w, &[]).unwrap();
        assert_eq!(report.trap_penalty, 0.0);
        assert_eq!(r.score(), 4.0);
        assert_eq!(r.keeper().traps_triggered(), 1);
    }

    #[test]
    fn overlapping_traps_each_count_as_a_trigger() {
        let w = SimWorld::builder()
            .with_object("pit", Pose3D::new(0.0, 0.0, 0.0))
            .with_object("pit_b", Pose3D::new(0.1, 0.0, 0.0))
            .build();
        let registry = ZoneRegistry::new(&w);
        let traps = registry
            .build(
                parse_zone_table("a;pit;1;0.3;0.1;2\nb;pit_b;1;0.3;0.1;3", ZoneKind::Trap)
                    .unwrap(),
            )
            .unwrap();
        let mut r = TickRunner::new(ZoneTable::new(), traps, RecordingSink::default());

        let report = r.tick(&w, &[]).unwrap();
        assert_eq!(report.trap_penalty, 5.0);
        assert_eq!(r.score(), -5.0);
        assert_eq!(r.keeper().traps_triggered(), 2);
    }

    #[test]
    fn zero_penalty_trap_still_counts() {
        let w = SimWorld::builder()
            .with_object("pit", Pose3D::new(0.0, 0.0, 0.0))
            .build();
        let traps = ZoneRegistry::new(&w)
            .build(parse_zone_table("warn;pit;1;0.3;0.1;0", ZoneKind::Trap).unwrap())
            .unwrap();
        let mut r = TickRunner::new(ZoneTable::new(), traps, RecordingSink::default());

        let report = r.tick(&w, &[]).unwrap();
        assert_eq!(report.events[0].outcome, ZoneOutcome::Triggered);
        assert_eq!(r.score(), 0.0);
        assert_eq!(r.keeper().traps_triggered(), 1);
    }

    #[test]
    fn unknown_action_scores_zero_without_event() {
        let w = world();
        let mut r = runner(&w, RecordingSink::default());
        let report = r.tick(&w, &[request("dance", 1.0)]).unwrap();
        assert_eq!(report.action_delta, 0.0);
        // Only the idle trap evaluation.
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].outcome, ZoneOutcome::Idle);
    }

    #[test]
    fn sink_sees_every_event_with_tick() {
        let w = world();
        let mut r = runner(&w, RecordingSink::default());
        r.tick(&w, &[request("pickup", 1.0)]).unwrap();
        r.tick(&w, &[]).unwrap();
        let sink = r.finish().unwrap();
        assert!(sink.flushed);
        let ticks: Vec<u64> = sink.events.iter().map(|(t, _)| *t).collect();
        assert_eq!(ticks, vec![1, 1, 2]);
        assert_eq!(sink.events[1].1.zone_id, "pickup");
    }

    #[test]
    fn sink_failure_does_not_stop_scoring() {
        let w = world();
        let sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };
        let mut r = runner(&w, sink);
        let report = r.tick(&w, &[request("pickup", 1.0)]).unwrap();
        assert_eq!(report.score, 10.0);
    }

    #[test]
    fn pose_failure_aborts_tick() {
        let mut w = world();
        let mut r = runner(&w, RecordingSink::default());
        w.disconnect();
        let err = r.tick(&w, &[request("pickup", 1.0)]).unwrap_err();
        assert!(matches!(err, SimError::Transport { .. }));
        assert_eq!(r.ticks(), 0);
        assert_eq!(r.score(), 0.0);
    }

    #[test]
    fn reset_rearms_traps_and_zeroes_score() {
        let mut w = world();
        w.set_robot_position(Pose3D::new(-1.0, 0.0, 0.0));
        let mut r = runner(&w, RecordingSink::default());
        r.tick(&w, &[]).unwrap();
        assert_eq!(r.score(), -4.0);

        r.reset();
        assert_eq!(r.score(), 0.0);
        assert_eq!(r.ticks(), 0);
        let report = r.tick(&w, &[]).unwrap();
        assert_eq!(report.trap_penalty, 4.0);
    }
}
