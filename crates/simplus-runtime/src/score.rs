//! Team score aggregation and per-event sinks.
//!
//! [`ScoreKeeper`] holds the running total.  Every [`ScoreEvent`] produced
//! during a tick is also handed to a [`ScoreSink`]:
//!
//! - [`NoopSink`] discards events.
//! - [`TracingSink`] emits one structured `info!` line per scoring event.
//! - [`JsonlSink`] writes one JSON object per line, tagged with the tick and
//!   a UTC timestamp, for offline analysis.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use simplus_types::{ScoreEvent, SimError, ZoneOutcome};
use tracing::info;

/// Running team score.
///
/// Action deltas are added as-is (negative failure penalties lower the
/// score).  Trap penalties are positive magnitudes and are subtracted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreKeeper {
    total: f64,
    actions_scored: u64,
    traps_triggered: u64,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn actions_scored(&self) -> u64 {
        self.actions_scored
    }

    pub fn traps_triggered(&self) -> u64 {
        self.traps_triggered
    }

    /// Add the delta of one scored action.
    pub fn credit_action(&mut self, delta: f64) {
        self.total += delta;
        self.actions_scored += 1;
    }

    /// Charge one trap trigger.  Every call counts as a trigger, even when
    /// the trap's penalty is zero.
    pub fn charge_trap(&mut self, penalty: f64) {
        self.total -= penalty;
        self.traps_triggered += 1;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sinks
// ─────────────────────────────────────────────────────────────────────────────

/// Receives every event produced by a tick.
pub trait ScoreSink {
    /// Record `event` from tick `tick`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] when the event cannot be written.
    fn record(&mut self, tick: u64, event: &ScoreEvent) -> Result<(), SimError>;

    /// Flush buffered output.  The default does nothing.
    fn flush(&mut self) -> Result<(), SimError> {
        Ok(())
    }
}

impl<S: ScoreSink + ?Sized> ScoreSink for Box<S> {
    fn record(&mut self, tick: u64, event: &ScoreEvent) -> Result<(), SimError> {
        (**self).record(tick, event)
    }

    fn flush(&mut self) -> Result<(), SimError> {
        (**self).flush()
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ScoreSink for NoopSink {
    fn record(&mut self, _tick: u64, _event: &ScoreEvent) -> Result<(), SimError> {
        Ok(())
    }
}

/// Logs events that move the score.  Idle and armed trap evaluations are
/// skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ScoreSink for TracingSink {
    fn record(&mut self, tick: u64, event: &ScoreEvent) -> Result<(), SimError> {
        if matches!(event.outcome, ZoneOutcome::Idle | ZoneOutcome::Armed) {
            return Ok(());
        }
        info!(
            tick,
            zone = %event.zone_id,
            nearest = %event.nearest_object,
            distance = event.distance,
            delta = event.score_delta,
            outcome = ?event.outcome,
            "score event"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonlRecord<'a> {
    tick: u64,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    event: &'a ScoreEvent,
}

/// Writes one JSON object per event.
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl JsonlSink<BufWriter<File>> {
    /// Create (or truncate) `path` and write events to it.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ScoreSink for JsonlSink<W> {
    fn record(&mut self, tick: u64, event: &ScoreEvent) -> Result<(), SimError> {
        let record = JsonlRecord {
            tick,
            timestamp: Utc::now(),
            event,
        };
        serde_json::to_writer(&mut self.writer, &record)
            .map_err(|e| SimError::Io(e.to_string()))?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SimError> {
        self.writer.flush()?;
        Ok(())
    }
}
