//! [`ScoreBoard`] – publishes the running team score to the game manager.
//!
//! A client first joins under its team name, optionally waits for the match
//! to start, then pushes the total after every tick:
//!
//! ```rust
//! use simplus_hal::SimWorld;
//! use simplus_runtime::ScoreBoard;
//!
//! let mut world = SimWorld::builder().build();
//! let board = ScoreBoard::join(&mut world, "red").unwrap();
//! board.publish(&mut world, 12.5).unwrap();
//! assert_eq!(world.team_score(board.team_id()), Some(12.5));
//! ```

use std::thread;
use std::time::Duration;

use simplus_hal::GameServer;
use simplus_types::SimError;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    team_id: u32,
    team_name: String,
}

impl ScoreBoard {
    /// Register `team_name` with the game manager.
    pub fn join<G: GameServer + ?Sized>(server: &mut G, team_name: &str) -> Result<Self, SimError> {
        let team_id = server.register_team(team_name)?;
        info!(team = team_name, team_id, "joined game");
        Ok(Self {
            team_id,
            team_name: team_name.to_string(),
        })
    }

    pub fn team_id(&self) -> u32 {
        self.team_id
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    /// Poll the game manager until the match starts, at most `polls` times
    /// with `interval` between polls.  Returns whether the match started.
    pub fn wait_for_start<G: GameServer + ?Sized>(
        &self,
        server: &mut G,
        polls: usize,
        interval: Duration,
    ) -> Result<bool, SimError> {
        for attempt in 0..polls {
            if server.match_started()? {
                debug!(team = %self.team_name, attempt, "match started");
                return Ok(true);
            }
            if attempt + 1 < polls {
                thread::sleep(interval);
            }
        }
        Ok(false)
    }

    /// Show `score` as this team's total.
    pub fn publish<G: GameServer + ?Sized>(&self, server: &mut G, score: f64) -> Result<(), SimError> {
        server.set_score(self.team_id, score)?;
        debug!(team_id = self.team_id, score, "score published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplus_hal::{SimState, SimWorld};

    /// Starts the match after a fixed number of status polls.
    struct CountdownServer {
        polls_left: usize,
        polled: usize,
        scores: Vec<(u32, f64)>,
    }

    impl GameServer for CountdownServer {
        fn register_team(&mut self, _name: &str) -> Result<u32, SimError> {
            Ok(3)
        }

        fn set_score(&mut self, team_id: u32, score: f64) -> Result<(), SimError> {
            self.scores.push((team_id, score));
            Ok(())
        }

        fn match_started(&mut self) -> Result<bool, SimError> {
            self.polled += 1;
            if self.polls_left == 0 {
                return Ok(true);
            }
            self.polls_left -= 1;
            Ok(false)
        }

        fn sim_state(&mut self) -> Result<SimState, SimError> {
            Ok(SimState::Running)
        }

        fn server_time_ms(&mut self) -> Result<u64, SimError> {
            Ok(0)
        }

        fn start_simulation(&mut self) -> Result<(), SimError> {
            Ok(())
        }

        fn stop_simulation(&mut self) -> Result<(), SimError> {
            Ok(())
        }

        fn pause_simulation(&mut self) -> Result<(), SimError> {
            Ok(())
        }
    }

    #[test]
    fn waits_until_the_match_starts() {
        let mut server = CountdownServer {
            polls_left: 2,
            polled: 0,
            scores: Vec::new(),
        };
        let board = ScoreBoard::join(&mut server, "red").unwrap();
        assert_eq!(board.team_id(), 3);
        assert!(board.wait_for_start(&mut server, 5, Duration::ZERO).unwrap());
        assert_eq!(server.polled, 3);

        board.publish(&mut server, 1.5).unwrap();
        assert_eq!(server.scores, vec![(3, 1.5)]);
    }

    #[test]
    fn gives_up_after_the_poll_budget() {
        let mut world = SimWorld::builder()
            .with_sim_state(SimState::Paused)
            .build();
        let board = ScoreBoard::join(&mut world, "red").unwrap();
        assert!(!board.wait_for_start(&mut world, 3, Duration::ZERO).unwrap());
    }

    #[test]
    fn publish_overwrites_previous_total() {
        let mut world = SimWorld::builder().build();
        let board = ScoreBoard::join(&mut world, "blue").unwrap();
        board.publish(&mut world, 2.0).unwrap();
        board.publish(&mut world, -1.0).unwrap();
        assert_eq!(world.team_score(board.team_id()), Some(-1.0));
        assert_eq!(world.team_name(board.team_id()), Some("blue"));
    }

    #[test]
    fn transport_failure_propagates() {
        let mut world = SimWorld::builder().build();
        let board = ScoreBoard::join(&mut world, "red").unwrap();
        world.disconnect();
        assert!(matches!(
            board.publish(&mut world, 1.0),
            Err(SimError::Transport { .. })
        ));
    }
}
