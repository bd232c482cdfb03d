//! `simplus` – zone scoring command line
//!
//! Subcommands:
//!
//! - `zones <table>` parses a zone table and prints every zone with its
//!   expanded reference object names.
//! - `replay <scenario>` resolves the configured zone tables against a
//!   scripted in-process world and runs every tick through the scorer.
//!
//! Configuration comes from `--config <path>` or `~/.simplus/config.toml`.

mod config;
mod replay;
mod scenario;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use simplus_zones::{ZoneDefinition, ZoneKind, ZoneRule, load_zone_table};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "simplus",
    version,
    about = "Zone scoring for simulator-backed robot games",
    long_about = None
)]
struct Cli {
    /// Config file (defaults to ~/.simplus/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a zone table and list its zones
    Zones {
        /// Path to the table file
        table: PathBuf,
        /// Which row layout the table uses
        #[arg(long, value_enum, default_value_t = KindArg::Action)]
        kind: KindArg,
    },
    /// Replay a scripted scenario against the configured zone tables
    Replay {
        /// Scenario TOML file
        scenario: PathBuf,
        /// Write every score event as JSON lines to this file
        #[arg(long)]
        events: Option<PathBuf>,
        /// Only print the final summary
        #[arg(short, long)]
        quiet: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Action,
    Trap,
}

impl From<KindArg> for ZoneKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Action => ZoneKind::Action,
            KindArg::Trap => ZoneKind::Trap,
        }
    }
}

fn main() -> ExitCode {
    let _guard = simplus_runtime::init_tracing("simplus");
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Zones { table, kind } => list_zones(&table, kind.into()),
        Command::Replay {
            scenario,
            events,
            quiet,
        } => run_replay(cli.config.as_deref(), &scenario, events.as_deref(), !quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// zones
// ─────────────────────────────────────────────────────────────────────────────

fn list_zones(table: &Path, kind: ZoneKind) -> Result<(), String> {
    let defs = load_zone_table(table, kind).map_err(|e| e.to_string())?;
    println!(
        "{} {} zone(s) in {}",
        defs.len().to_string().bold(),
        kind,
        table.display()
    );
    for def in &defs {
        println!("{}", describe(def));
    }
    Ok(())
}

fn describe(def: &ZoneDefinition) -> String {
    let rule = match def.rule {
        ZoneRule::Action {
            reward_score,
            penalty_score,
        } => format!("reward {reward_score:+} / penalty {penalty_score:+}"),
        ZoneRule::Trap {
            bandgap_radius,
            penalty,
        } => format!("bandgap {bandgap_radius} / penalty {penalty}"),
    };
    format!(
        "  {:<16} r={:<6} {}  [{}]",
        def.id.as_str().bold().cyan(),
        def.trigger_radius,
        rule,
        def.reference_names.join(", ").dimmed()
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// replay
// ─────────────────────────────────────────────────────────────────────────────

fn run_replay(
    config_path: Option<&Path>,
    scenario_path: &Path,
    events: Option<&Path>,
    verbose: bool,
) -> Result<(), String> {
    let cfg = config::resolve(config_path)?;
    info!(
        sim = %format!("{}:{}", cfg.sim_host, cfg.sim_port),
        timeout_ms = cfg.sim_timeout_ms,
        team = %cfg.team_name,
        action_table = %cfg.action_table.display(),
        "configuration loaded"
    );
    let scenario = scenario::Scenario::load(scenario_path)?;

    println!(
        "  Replaying {} ({} tick(s)) against {}",
        scenario_path.display().to_string().bold(),
        scenario.ticks.len(),
        cfg.action_table.display()
    );
    let summary = replay::run(&cfg, &scenario, events, verbose)?;

    println!();
    println!(
        "  {} after {} tick(s): {} action(s) scored, {} trap(s) triggered",
        format!("Final score {:.2}", summary.score).bold().green(),
        summary.ticks,
        summary.actions_scored,
        summary.traps_triggered
    );
    if let Some(shown) = summary.published_score {
        println!(
            "  Team {} (id {}) shows {:.2} at {} ms",
            cfg.team_name.as_str().bold(),
            summary.team_id,
            shown,
            summary.server_time_ms
        );
    }
    if let Some(path) = events {
        println!("  Events written to {}", path.display().to_string().dimmed());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_global_config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "simplus",
            "replay",
            "run.toml",
            "--config",
            "lab.toml",
            "--events",
            "out.jsonl",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("lab.toml")));
        match cli.command {
            Command::Replay {
                scenario,
                events,
                quiet,
            } => {
                assert_eq!(scenario, PathBuf::from("run.toml"));
                assert_eq!(events, Some(PathBuf::from("out.jsonl")));
                assert!(!quiet);
            }
            Command::Zones { .. } => panic!("expected replay"),
        }
    }

    #[test]
    fn zones_kind_defaults_to_action() {
        let cli = Cli::try_parse_from(["simplus", "zones", "serverconfig.txt"]).unwrap();
        let Command::Zones { kind, .. } = cli.command else {
            panic!("expected zones")
        };
        assert_eq!(ZoneKind::from(kind), ZoneKind::Action);

        let cli =
            Cli::try_parse_from(["simplus", "zones", "traps.txt", "--kind", "trap"]).unwrap();
        let Command::Zones { kind, .. } = cli.command else {
            panic!("expected zones")
        };
        assert_eq!(ZoneKind::from(kind), ZoneKind::Trap);
    }

    #[test]
    fn describe_lists_expanded_names() {
        let defs = simplus_zones::parse_zone_table("pickup;box;3;0.5;10;-1", ZoneKind::Action)
            .unwrap();
        let line = describe(&defs[0]);
        assert!(line.contains("pickup"));
        assert!(line.contains("box, box0, box1"));
        assert!(line.contains("+10"));
    }

    #[test]
    fn list_zones_reports_parse_errors() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "pickup;box;1;wide;1;0\n").expect("write");
        let err = list_zones(&path, ZoneKind::Action).unwrap_err();
        assert!(err.contains("line 1"));
    }
}
