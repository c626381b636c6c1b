//! Configuration types for self-play matches
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;
use yavalath_core::{GameError, PlayerCount, Tier};

/// Match configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Players per game
    pub player_count: PlayerCount,
    /// Tier for each seat; seat `i` plays color `i` unless rotated
    pub lineup: Vec<Tier>,
    /// Number of games to play
    pub games: usize,
    /// Base seed; game `g` uses `seed + g`
    pub seed: u64,
    /// Shift seats by one color each game so every seat plays every color
    pub rotate_seats: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_count: PlayerCount::Two,
            lineup: vec![Tier::SafeRandom, Tier::Tactical],
            games: 100,
            seed: 42,
            rotate_seats: true,
        }
    }
}

impl MatchConfig {
    /// Config for the given lineup; player count follows lineup length
    pub fn with_lineup(lineup: Vec<Tier>) -> Result<Self, MatchError> {
        let player_count = PlayerCount::try_from(lineup.len() as u8)?;
        Ok(Self {
            player_count,
            lineup,
            ..Default::default()
        })
    }

    /// Set number of games
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Set base seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        let expected = self.player_count.count();
        if self.lineup.len() != expected {
            return Err(MatchError::LineupSize {
                expected,
                got: self.lineup.len(),
            });
        }
        Ok(())
    }

    /// Tier playing each color in game `game`, indexed by color
    pub fn lineup_for_game(&self, game: usize) -> Vec<Tier> {
        let n = self.lineup.len();
        let shift = if self.rotate_seats && n > 0 { game % n } else { 0 };
        (0..n).map(|color| self.lineup[(color + shift) % n]).collect()
    }

    /// Seat index playing `color` in game `game`
    pub fn seat_of_color(&self, game: usize, color: usize) -> usize {
        let n = self.lineup.len();
        let shift = if self.rotate_seats && n > 0 { game % n } else { 0 };
        (color + shift) % n
    }
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("lineup has {got} tiers but the game has {expected} players")]
    LineupSize { expected: usize, got: usize },

    #[error("game error: {0}")]
    Game(#[from] GameError),

    #[error("game stopped without an outcome after {moves} moves")]
    Unfinished { moves: usize },
}
