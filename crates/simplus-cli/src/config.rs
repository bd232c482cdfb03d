//! Bridge configuration – reads `~/.simplus/config.toml` or a file given
//! with `--config`.

use serde::{Deserialize, Serialize};
use simplus_hal::RobotLayout;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one bridge instance.  Every field has a default, so an
/// empty file is a valid configuration.
///
/// `sim_host`, `sim_port` and `sim_timeout_ms` address the simulator's
/// remote API.  Replays run against the in-process
/// [`SimWorld`][simplus_hal::SimWorld] and only log them; they are read by
/// the remote-API client that implements `WorldQuery`, `RobotDriver` and
/// `GameServer` against a live simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Simulator remote-API host.
    #[serde(default = "default_sim_host")]
    pub sim_host: String,

    /// Simulator remote-API port.
    #[serde(default = "default_sim_port")]
    pub sim_port: u16,

    /// Remote-API call timeout in milliseconds.
    #[serde(default = "default_sim_timeout_ms")]
    pub sim_timeout_ms: u64,

    /// Name registered with the game manager.
    #[serde(default = "default_team_name")]
    pub team_name: String,

    /// Simulated time per tick in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Action zone table.  Relative paths are resolved against the
    /// directory of the config file.
    #[serde(default = "default_action_table")]
    pub action_table: PathBuf,

    /// Optional trap zone table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trap_table: Option<PathBuf>,

    #[serde(default)]
    pub robot: RobotLayout,
}

fn default_sim_host() -> String {
    "127.0.0.1".to_string()
}
fn default_sim_port() -> u16 {
    19999
}
fn default_sim_timeout_ms() -> u64 {
    5000
}
fn default_team_name() -> String {
    "simplus".to_string()
}
fn default_tick_ms() -> u64 {
    50
}
fn default_action_table() -> PathBuf {
    PathBuf::from("serverconfig.txt")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sim_host: default_sim_host(),
            sim_port: default_sim_port(),
            sim_timeout_ms: default_sim_timeout_ms(),
            team_name: default_team_name(),
            tick_ms: default_tick_ms(),
            action_table: default_action_table(),
            trap_table: None,
            robot: RobotLayout::default(),
        }
    }
}

/// Return the path to `~/.simplus/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".simplus").join("config.toml")
}

/// Resolve the configuration for this run.
///
/// An explicit path must exist.  Without one, `~/.simplus/config.toml` is
/// used when present and the defaults otherwise.
pub fn resolve(explicit: Option<&Path>) -> Result<Config, String> {
    match explicit {
        Some(path) => load_from(path)?
            .ok_or_else(|| format!("Config file not found: {}", path.display())),
        None => Ok(load_from(&config_path())?.unwrap_or_else(|| {
            let mut cfg = Config::default();
            apply_env_overrides(&mut cfg);
            cfg
        })),
    }
}

/// Load the config from a specific path.  Returns `None` if the file does
/// not exist.
pub(crate) fn load_from(path: &Path) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
    let mut cfg: Config =
        toml::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))?;
    if let Some(dir) = path.parent() {
        cfg.rebase_paths(dir);
    }
    apply_env_overrides(&mut cfg);
    Ok(Some(cfg))
}

impl Config {
    /// Resolve relative table paths against `dir`.
    fn rebase_paths(&mut self, dir: &Path) {
        if self.action_table.is_relative() {
            self.action_table = dir.join(&self.action_table);
        }
        if let Some(trap) = self.trap_table.as_mut()
            && trap.is_relative()
        {
            *trap = dir.join(&*trap);
        }
    }
}

/// Apply `SIMPLUS_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `SIMPLUS_SIM_HOST` | `sim_host` |
/// | `SIMPLUS_SIM_PORT` | `sim_port` |
/// | `SIMPLUS_TEAM_NAME` | `team_name` |
/// | `SIMPLUS_ACTION_TABLE` | `action_table` |
/// | `SIMPLUS_TRAP_TABLE` | `trap_table` |
pub fn apply_env_overrides(cfg: &mut Config) {
    apply_overrides(cfg, |key| std::env::var(key).ok());
}

fn apply_overrides(cfg: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SIMPLUS_SIM_HOST") {
        cfg.sim_host = v;
    }
    if let Some(v) = var("SIMPLUS_SIM_PORT")
        && let Ok(port) = v.parse::<u16>()
    {
        cfg.sim_port = port;
    }
    if let Some(v) = var("SIMPLUS_TEAM_NAME") {
        cfg.team_name = v;
    }
    if let Some(v) = var("SIMPLUS_ACTION_TABLE") {
        cfg.action_table = PathBuf::from(v);
    }
    if let Some(v) = var("SIMPLUS_TRAP_TABLE") {
        cfg.trap_table = Some(PathBuf::from(v));
    }
}
