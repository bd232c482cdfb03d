//! `simplus replay` – run a scenario through the full scoring stack.

use colored::Colorize;
use simplus_hal::{GameServer, WorldQuery, report_robot_pose};
use simplus_runtime::{JsonlSink, ScoreBoard, ScoreSink, TickRunner, TracingSink};
use simplus_types::SimError;
use simplus_zones::{ZoneKind, ZoneRegistry, ZoneTable, load_zone_table};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::scenario::Scenario;

/// Final tallies of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub ticks: u64,
    pub score: f64,
    pub actions_scored: u64,
    pub traps_triggered: u64,
    /// Id the game manager assigned to the team.
    pub team_id: u32,
    /// Total shown by the game manager after the last tick.
    pub published_score: Option<f64>,
    /// Simulator clock at the end of the replay.
    pub server_time_ms: u64,
    /// Wheel separation the drive commands used.
    pub track_width: f64,
}

fn sim_err(e: SimError) -> String {
    e.to_string()
}

/// Load the configured zone tables and resolve them against `world`.
fn build_tables(cfg: &Config, world: &dyn WorldQuery) -> Result<(ZoneTable, ZoneTable), SimError> {
    let registry = ZoneRegistry::new(world);
    let actions = registry.build(load_zone_table(&cfg.action_table, ZoneKind::Action)?)?;
    let traps = match &cfg.trap_table {
        Some(path) => registry.build(load_zone_table(path, ZoneKind::Trap)?)?,
        None => ZoneTable::new(),
    };
    Ok((actions, traps))
}

/// Replay `scenario`, printing one line per tick when `verbose`.
pub fn run(
    cfg: &Config,
    scenario: &Scenario,
    events: Option<&Path>,
    verbose: bool,
) -> Result<ReplaySummary, String> {
    let mut world = scenario.world();
    let (actions, traps) = build_tables(cfg, &world).map_err(sim_err)?;

    let board = ScoreBoard::join(&mut world, &cfg.team_name).map_err(sim_err)?;
    if !board
        .wait_for_start(&mut world, 1, Duration::ZERO)
        .map_err(sim_err)?
    {
        let state = world.sim_state().map_err(sim_err)?;
        return Err(format!("match not started: simulation is {state}"));
    }
    info!(
        actions = actions.len(),
        traps = traps.len(),
        ticks = scenario.ticks.len(),
        "replay starting"
    );

    let sink: Box<dyn ScoreSink> = match events {
        Some(path) => Box::new(JsonlSink::create(path).map_err(sim_err)?),
        None => Box::new(TracingSink),
    };
    let mut runner = TickRunner::new(actions, traps, sink);
    let mut layout = cfg.robot.clone();
    match layout.calibrate_track_width(&world) {
        Ok(width) => info!(track_width = width, "track width measured from wheel joints"),
        Err(SimError::ObjectNotFound(joint)) => debug!(
            %joint,
            track_width = layout.track_width,
            "wheel joint not in scene, using configured track width"
        ),
        Err(e) => return Err(sim_err(e)),
    }
    let drive = layout.drive();

    for step in &scenario.ticks {
        world.set_robot_position(step.robot);
        step.command.apply(&mut world, &drive).map_err(sim_err)?;
        let report = runner
            .tick(&world, &step.command.actions)
            .map_err(sim_err)?;
        world.advance_clock(cfg.tick_ms);
        board.publish(&mut world, report.score).map_err(sim_err)?;

        if verbose {
            let reported = report_robot_pose(&world, cfg.robot.gps_enabled).map_err(sim_err)?;
            let delta = report.action_delta - report.trap_penalty;
            let delta = if delta > 0.0 {
                format!("{delta:+.2}").green()
            } else if delta < 0.0 {
                format!("{delta:+.2}").red()
            } else {
                format!("{delta:+.2}").dimmed()
            };
            println!(
                "  tick {:>4}  pos ({:>6.2}, {:>6.2})  yaw {:>7.1}°  {}  score {}",
                report.tick,
                reported.position.x,
                reported.position.y,
                reported.yaw,
                delta,
                format!("{:.2}", report.score).bold()
            );
        }
    }

    let summary = ReplaySummary {
        ticks: runner.ticks(),
        score: runner.score(),
        actions_scored: runner.keeper().actions_scored(),
        traps_triggered: runner.keeper().traps_triggered(),
        team_id: board.team_id(),
        published_score: world.team_score(board.team_id()),
        server_time_ms: world.server_time_ms().map_err(sim_err)?,
        track_width: layout.track_width,
    };
    runner.finish().map_err(sim_err)?;
    Ok(summary)
}
