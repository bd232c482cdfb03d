//! [`GameServer`] – the match-management side of the simulator.
//!
//! The scene runs a game-manager script that registers teams, displays their
//! scores and gates the match start.  The simulator itself exposes its clock
//! and run state.  Both are reached through the same remote API, so one trait
//! covers them.

use serde::{Deserialize, Serialize};
use simplus_types::SimError;

/// Run state of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimState {
    Stopped,
    Paused,
    Running,
}

impl SimState {
    /// Decode the simulator's state word: `0` stopped, `8` paused, any other
    /// value running.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => SimState::Stopped,
            8 => SimState::Paused,
            _ => SimState::Running,
        }
    }
}

impl std::fmt::Display for SimState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimState::Stopped => write!(f, "stopped"),
            SimState::Paused => write!(f, "paused"),
            SimState::Running => write!(f, "running"),
        }
    }
}

/// Team registration, score display and simulation control.
///
/// Every call may block on the remote API and may fail with
/// [`SimError::Transport`].
pub trait GameServer {
    /// Register `name` with the game manager and return the team id it
    /// assigned.
    fn register_team(&mut self, name: &str) -> Result<u32, SimError>;

    /// Show `score` for team `team_id`.
    fn set_score(&mut self, team_id: u32, score: f64) -> Result<(), SimError>;

    /// Whether the game manager has started the match.
    fn match_started(&mut self) -> Result<bool, SimError>;

    fn sim_state(&mut self) -> Result<SimState, SimError>;

    /// Simulator clock in milliseconds.
    fn server_time_ms(&mut self) -> Result<u64, SimError>;

    fn start_simulation(&mut self) -> Result<(), SimError>;

    fn stop_simulation(&mut self) -> Result<(), SimError>;

    fn pause_simulation(&mut self) -> Result<(), SimError>;
}
