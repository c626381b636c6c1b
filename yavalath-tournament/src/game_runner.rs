//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use yavalath_core::{choose_move, GameState, Hex, Outcome, PlayerCount, Stone, Tier};

use crate::config::MatchError;

/// Record of a single finished game
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    /// Final result
    pub outcome: Outcome,
    /// Tier controlling each color, indexed by color
    pub lineup: Vec<Tier>,
    /// Placements in order
    pub moves: Vec<(Stone, Hex)>,
    /// Seed the game was played with
    pub seed: u64,
}

impl GameRecord {
    /// Color that completed four
    pub fn winner(&self) -> Option<Stone> {
        match self.outcome {
            Outcome::Win { winner, .. } => Some(winner),
            _ => None,
        }
    }

    /// Color that completed three
    pub fn loser(&self) -> Option<Stone> {
        match self.outcome {
            Outcome::Loss { loser, .. } => Some(loser),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == Outcome::Draw
    }

    pub fn length(&self) -> usize {
        self.moves.len()
    }
}

/// Play one complete game. `lineup[i]` is the tier for color `i`.
pub fn play_seeded_game(
    player_count: PlayerCount,
    lineup: &[Tier],
    seed: u64,
) -> Result<GameRecord, MatchError> {
    if lineup.len() != player_count.count() {
        return Err(MatchError::LineupSize {
            expected: player_count.count(),
            got: lineup.len(),
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new(player_count);

    while let Some(hex) = choose_move(&state, lineup[state.active_color().index()], &mut rng)? {
        state.apply_move(hex)?;
    }

    let outcome = state.outcome().ok_or(MatchError::Unfinished {
        moves: state.move_count(),
    })?;

    tracing::debug!(
        seed,
        moves = state.move_count(),
        "game finished: {:?}",
        outcome
    );

    Ok(GameRecord {
        outcome,
        lineup: lineup.to_vec(),
        moves: state.history().to_vec(),
        seed,
    })
}

/// Game runner that plays successive games with incrementing seeds
pub struct GameRunner {
    player_count: PlayerCount,
    /// Random seed counter
    seed_counter: u64,
}

impl GameRunner {
    /// Create a new game runner
    pub fn new(player_count: PlayerCount, seed: u64) -> Self {
        Self {
            player_count,
            seed_counter: seed,
        }
    }

    /// Play a single game, returning the record
    pub fn play_game(&mut self, lineup: &[Tier]) -> Result<GameRecord, MatchError> {
        let seed = self.next_seed();
        play_seeded_game(self.player_count, lineup, seed)
    }

    /// Get next seed and increment counter
    fn next_seed(&mut self) -> u64 {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        seed
    }

    /// Reset seed counter
    pub fn reset_seed(&mut self, seed: u64) {
        self.seed_counter = seed;
    }
}
