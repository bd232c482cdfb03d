//! `simplus-runtime` – per-tick scoring orchestration
//!
//! # Modules
//!
//! - [`tick`] – [`TickRunner`][tick::TickRunner]: reads the robot pose,
//!   sweeps trap zones, scores client action requests and reports a
//!   [`TickReport`][tick::TickReport].
//! - [`score`] – [`ScoreKeeper`][score::ScoreKeeper], the running team
//!   score, and the [`ScoreSink`][score::ScoreSink] implementations that
//!   receive every event.
//! - [`board`] – [`ScoreBoard`][board::ScoreBoard]: joins the game under a
//!   team name and publishes the running total to the game manager.
//! - [`command`] – [`RobotCommand`][command::RobotCommand]: motion,
//!   indicator and actions requested by a game client for one tick.
//! - [`telemetry`] – [`init_tracing`][telemetry::init_tracing]:
//!   initialises the global `tracing` subscriber with an optional OTLP span
//!   exporter.  Set `OTEL_EXPORTER_OTLP_ENDPOINT` to enable export.

pub mod board;
pub mod command;
pub mod score;
pub mod telemetry;
pub mod tick;

pub use board::ScoreBoard;
pub use command::RobotCommand;
pub use score::{JsonlSink, NoopSink, ScoreKeeper, ScoreSink, TracingSink};
pub use telemetry::{LogFormat, TracerProviderGuard, init_tracing};
pub use tick::{TickReport, TickRunner};
