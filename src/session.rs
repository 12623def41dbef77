use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{step, Direction, GameChangeType, GameState, GameUpdate, Level, RejectReason, UserAction};
use crate::error::LevelError;
use crate::level_source::LevelSource;

/// Proof of a solved level: the level index and its accepted action codes in
/// order. This is everything the reward collaborator receives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WinClaim {
    pub level_index: usize,
    pub actions: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMove {
    Accepted { change: GameChangeType, won: bool },
    Rejected(RejectReason),
    /// The level is already won; input is ignored until the level changes
    /// or restarts.
    Finished,
}

/// The single current game. Callers must serialize access; every method
/// completes synchronously.
pub struct GameSession<S: LevelSource> {
    source: S,
    level_index: usize,
    level: Arc<Level>,
    state: GameState,
    facing: Direction,
    won: bool,
}

impl<S: LevelSource> GameSession<S> {
    pub fn new(source: S, level_index: usize) -> Result<GameSession<S>, LevelError> {
        let level = source.level(level_index)?;
        let state = level.initial_state();
        let won = state.is_won();
        info!(level = level_index, "starting level");
        Ok(GameSession {
            source,
            level_index,
            level,
            state,
            facing: Direction::Up,
            won,
        })
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.source.level_count()
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direction of the last requested move, accepted or not.
    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn apply_move(&mut self, dir: Direction) -> SessionMove {
        if self.won {
            return SessionMove::Finished;
        }
        self.facing = dir;

        match step(&self.level, &self.state, UserAction::Move(dir)) {
            GameUpdate::NextState(next, change) => {
                self.state = next;
                self.won = self.state.is_won();
                debug!(?dir, ?change, player = %self.state.player(), "move accepted");
                if self.won {
                    info!(
                        level = self.level_index,
                        moves = self.state.history().len(),
                        "level won"
                    );
                }
                SessionMove::Accepted { change, won: self.won }
            }
            GameUpdate::Rejected(reason) => {
                debug!(?dir, %reason, "move rejected");
                SessionMove::Rejected(reason)
            }
        }
    }

    /// Snapshot of the solve, only available while the level is won.
    pub fn win_claim(&self) -> Option<WinClaim> {
        if !self.won {
            return None;
        }
        Some(WinClaim {
            level_index: self.level_index,
            actions: self.state.action_codes(),
        })
    }

    pub fn restart(&mut self) {
        debug!(level = self.level_index, "restarting level");
        self.reset_state();
    }

    pub fn select_level(&mut self, index: usize) -> Result<(), LevelError> {
        self.level = self.source.level(index)?;
        self.level_index = index;
        info!(level = index, "selected level");
        self.reset_state();
        Ok(())
    }

    pub fn has_next_level(&self) -> bool {
        self.level_index + 1 < self.source.level_count()
    }

    /// Advances to the following level. Returns `false`, leaving the session
    /// untouched, when this is the last one.
    pub fn next_level(&mut self) -> Result<bool, LevelError> {
        if !self.has_next_level() {
            return Ok(false);
        }
        self.select_level(self.level_index + 1)?;
        Ok(true)
    }

    pub fn restart_game(&mut self) -> Result<(), LevelError> {
        self.select_level(0)
    }

    fn reset_state(&mut self) {
        self.state = self.level.initial_state();
        self.facing = Direction::Up;
        self.won = self.state.is_won();
    }
}
