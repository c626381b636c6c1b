//! Heuristic NPC move selection
//!
//! Every tier is a one-ply heuristic over hypothetical placements. The
//! NPC only returns a cell; applying it is the caller's job.

use crate::board::{Hex, HexBoard, Stone};
use crate::error::GameError;
use crate::game::{GameState, MoveOutcome, PlayerCount};
use crate::line::{is_safe, is_winning};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Number of best center-ranked safe cells to pick from
const CENTER_TOP_K: usize = 3;

/// Seed used by `NpcPlayer::new`
const DEFAULT_SEED: u64 = 42;

// ============================================================================
// TIERS
// ============================================================================

/// NPC difficulty
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    /// Random, but avoids making three when it can
    #[default]
    SafeRandom = 1,
    /// Win, else block, else a safe cell near the center
    Tactical = 2,
    /// Currently plays exactly like `Tactical`. Placeholder for deeper
    /// lookahead, which is not implemented.
    Advanced = 3,
}

impl TryFrom<u8> for Tier {
    type Error = GameError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Tier::SafeRandom),
            2 => Ok(Tier::Tactical),
            3 => Ok(Tier::Advanced),
            other => Err(GameError::InvalidTier(other)),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier as u8
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tier {}", *self as u8)
    }
}

// ============================================================================
// NPC PLAYER
// ============================================================================

/// NPC player with its own seeded random source
pub struct NpcPlayer {
    pub tier: Tier,
    rng: ChaCha8Rng,
}

impl NpcPlayer {
    pub fn new(tier: Tier) -> Self {
        Self::with_seed(tier, DEFAULT_SEED)
    }

    pub fn with_seed(tier: Tier, seed: u64) -> Self {
        Self {
            tier,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick a cell for the active color. None once the game is over.
    pub fn best_move(&mut self, state: &GameState) -> Result<Option<Hex>, GameError> {
        choose_move(state, self.tier, &mut self.rng)
    }

    /// Play a whole game with this NPC in every seat
    pub fn play_game(&mut self, mut state: GameState) -> Result<(GameState, Vec<Hex>), GameError> {
        let mut history = Vec::new();

        while let Some(hex) = self.best_move(&state)? {
            history.push(hex);
            if !matches!(state.apply_move(hex)?, MoveOutcome::Continue { .. }) {
                break;
            }
        }

        Ok((state, history))
    }
}

// ============================================================================
// MOVE SELECTION
// ============================================================================

/// Choose a cell for the color to move in `state` at the given tier.
///
/// Returns None when the game has ended or no empty cell remains.
pub fn choose_move<R: Rng + ?Sized>(
    state: &GameState,
    tier: Tier,
    rng: &mut R,
) -> Result<Option<Hex>, GameError> {
    if state.is_over() {
        return Ok(None);
    }
    let empty: Vec<Hex> = state.board().empty_cells().collect();
    if empty.is_empty() {
        return Ok(None);
    }

    let board = state.board();
    let mover = state.active_color();
    let hex = match tier {
        Tier::SafeRandom => safe_random(board, &empty, mover, rng)?,
        Tier::Tactical | Tier::Advanced => tactical(board, &empty, mover, state.players(), rng)?,
    };
    Ok(Some(hex))
}

/// Uniform over safe cells, or over all empty cells if none is safe.
/// `empty` must be non-empty.
fn safe_random<R: Rng + ?Sized>(
    board: &HexBoard,
    empty: &[Hex],
    mover: Stone,
    rng: &mut R,
) -> Result<Hex, GameError> {
    let safe = safe_cells(board, empty, mover)?;
    Ok(pick(&safe, empty, rng))
}

/// Own win > block first opponent win > random among the top safe center
/// cells > any empty cell. `empty` must be non-empty.
fn tactical<R: Rng + ?Sized>(
    board: &HexBoard,
    empty: &[Hex],
    mover: Stone,
    players: PlayerCount,
    rng: &mut R,
) -> Result<Hex, GameError> {
    if let Some(hex) = first_winning(board, empty, mover)? {
        return Ok(hex);
    }

    for opponent in players.opponents(mover) {
        if let Some(hex) = first_winning(board, empty, opponent)? {
            return Ok(hex);
        }
    }

    let mut safe = safe_cells(board, empty, mover)?;
    // Stable sort keeps enumeration order among equal scores
    safe.sort_by_key(|hex| Reverse(hex.center_score()));
    safe.truncate(CENTER_TOP_K);
    Ok(pick(&safe, empty, rng))
}

/// First cell in enumeration order where `stone` makes four or more
fn first_winning(board: &HexBoard, empty: &[Hex], stone: Stone) -> Result<Option<Hex>, GameError> {
    for &hex in empty {
        if is_winning(board, hex, stone)? {
            return Ok(Some(hex));
        }
    }
    Ok(None)
}

/// Empty cells where `stone` does not make an exact three
pub fn safe_cells(board: &HexBoard, empty: &[Hex], stone: Stone) -> Result<Vec<Hex>, GameError> {
    let mut safe = Vec::with_capacity(empty.len());
    for &hex in empty {
        if is_safe(board, hex, stone)? {
            safe.push(hex);
        }
    }
    Ok(safe)
}

/// Uniform choice from `preferred`, falling back to `fallback`
fn pick<R: Rng + ?Sized>(preferred: &[Hex], fallback: &[Hex], rng: &mut R) -> Hex {
    let pool = if preferred.is_empty() { fallback } else { preferred };
    pool[rng.gen_range(0..pool.len())]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::would_create_run_of_exactly;

    fn h(q: i8, r: i8) -> Hex {
        Hex::new(q, r)
    }

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_tier_conversion() {
        assert_eq!(Tier::try_from(2u8), Ok(Tier::Tactical));
        assert_eq!(Tier::try_from(0u8), Err(GameError::InvalidTier(0)));
        assert_eq!(u8::from(Tier::Advanced), 3);
    }

    #[test]
    fn test_no_move_after_game_end() {
        let mut game = GameState::new(PlayerCount::Two);
        game.apply_moves(&[h(2, 0), h(2, 2), h(3, 0), h(2, 3), h(4, 0)]).unwrap();
        assert_eq!(choose_move(&game, Tier::Tactical, &mut rng(1)).unwrap(), None);
    }

    #[test]
    fn test_safe_random_avoids_three() {
        let mut game = GameState::new(PlayerCount::Two);
        // Black has (2,0) (3,0); White elsewhere; Black to move
        game.apply_moves(&[h(2, 0), h(0, 4), h(3, 0), h(1, 4)]).unwrap();
        let board = game.board();
        for seed in 0..200 {
            let hex = choose_move(&game, Tier::SafeRandom, &mut rng(seed)).unwrap().unwrap();
            assert!(board.cell_at(hex).unwrap().is_empty());
            assert!(!would_create_run_of_exactly(board, hex, Stone::Black, 3).unwrap());
        }
    }

    #[test]
    fn test_tactical_takes_win() {
        let mut game = GameState::new(PlayerCount::Two);
        // Black: (1,0) (2,0) (4,0); only (3,0) completes four
        game.apply_moves(&[h(1, 0), h(8, -4), h(2, 0), h(6, -4), h(4, 0), h(8, -2)])
            .unwrap();
        for seed in 0..20 {
            let hex = choose_move(&game, Tier::Tactical, &mut rng(seed)).unwrap();
            assert_eq!(hex, Some(h(3, 0)));
        }
    }

    #[test]
    fn test_tactical_blocks_opponent() {
        let mut game = GameState::new(PlayerCount::Two);
        // White: (5,-4) (6,-4) (8,-4); White threatens (7,-4). Black to move.
        game.apply_moves(&[h(0, 4), h(5, -4), h(2, 2), h(6, -4), h(0, 1), h(8, -4)])
            .unwrap();
        assert_eq!(game.active_color(), Stone::Black);
        let hex = choose_move(&game, Tier::Tactical, &mut rng(7)).unwrap();
        assert_eq!(hex, Some(h(7, -4)));
    }

    /// White to move with 14 empty cells, every one of which makes an
    /// exact three for White. Nobody can make four.
    fn forced_loss_position() -> GameState {
        let moves = [
            h(7, -4), h(7, -2), h(1, 2), h(3, -3), h(3, 4), h(5, 0), h(5, 1), h(3, -1),
            h(7, 1), h(1, 0), h(8, 0), h(6, 0), h(0, 1), h(4, -4), h(0, 4), h(4, 2),
            h(0, 2), h(4, 3), h(3, 1), h(6, -3), h(2, -2), h(5, -1), h(7, -3), h(2, 2),
            h(1, 3), h(2, 0), h(5, -3), h(3, 3), h(7, -1), h(4, -3), h(4, -1), h(1, 4),
            h(8, -2), h(8, -3), h(6, -2), h(0, 3), h(2, 4), h(1, -1), h(5, -4), h(6, 1),
            h(4, 0), h(8, -1), h(6, -1), h(8, -4), h(2, 3), h(6, -4), h(3, -2),
        ];
        let mut game = GameState::new(PlayerCount::Two);
        for hex in moves {
            assert!(matches!(game.apply_move(hex).unwrap(), MoveOutcome::Continue { .. }));
        }
        game
    }

    #[test]
    fn test_forced_self_loss_falls_back_to_any_empty_cell() {
        let game = forced_loss_position();
        let board = game.board();
        let empty: Vec<Hex> = board.empty_cells().collect();
        assert_eq!(game.active_color(), Stone::White);
        assert_eq!(empty.len(), 14);
        assert!(safe_cells(board, &empty, Stone::White).unwrap().is_empty());

        for tier in [Tier::SafeRandom, Tier::Tactical, Tier::Advanced] {
            let mut picked = std::collections::HashSet::new();
            for seed in 0..100 {
                let hex = choose_move(&game, tier, &mut rng(seed)).unwrap();
                let hex = hex.expect("an empty cell is always chosen");
                assert!(empty.contains(&hex), "{tier} picked {hex}");
                picked.insert(hex);
            }
            // Uniform over all empty cells, not the center top three
            assert!(picked.len() > CENTER_TOP_K, "{tier} picked {picked:?}");
        }
    }

    #[test]
    fn test_own_win_beats_block() {
        // Black can win at (3,0); Grey threatens (7,-4), earlier in
        // enumeration order
        let mut game = GameState::new(PlayerCount::Three);
        game.apply_moves(&[
            h(1, 0), h(0, 4), h(5, -4),
            h(2, 0), h(2, 4), h(6, -4),
            h(4, 0), h(0, 2), h(8, -4),
        ])
        .unwrap();
        assert_eq!(game.active_color(), Stone::Black);
        for seed in 0..10 {
            assert_eq!(choose_move(&game, Tier::Tactical, &mut rng(seed)).unwrap(), Some(h(3, 0)));
        }
    }

    #[test]
    fn test_blocks_opponents_in_fixed_color_order() {
        // Grey to move: Black threatens (3,0), White threatens (7,-4).
        // Black comes first among Grey's opponents.
        let mut game = GameState::new(PlayerCount::Three);
        game.apply_moves(&[
            h(1, 0), h(5, -4), h(0, 4),
            h(2, 0), h(6, -4), h(2, 4),
            h(4, 0), h(8, -4),
        ])
        .unwrap();
        assert_eq!(game.active_color(), Stone::Grey);
        assert_eq!(choose_move(&game, Tier::Tactical, &mut rng(0)).unwrap(), Some(h(3, 0)));

        // White to move: Black threatens (3,0), Grey threatens (7,-4).
        // Black is checked before Grey even though Grey moves next.
        let mut game = GameState::new(PlayerCount::Three);
        game.apply_moves(&[
            h(1, 0), h(0, 4), h(5, -4),
            h(2, 0), h(2, 4), h(6, -4),
            h(4, 0), h(0, 2), h(8, -4),
            h(8, 0),
        ])
        .unwrap();
        assert_eq!(game.active_color(), Stone::White);
        assert_eq!(choose_move(&game, Tier::Tactical, &mut rng(0)).unwrap(), Some(h(3, 0)));
    }

    #[test]
    fn test_accepts_dyn_rng() {
        let game = GameState::new(PlayerCount::Two);
        let mut seeded = rng(4);
        let dyn_rng: &mut dyn RngCore = &mut seeded;
        let hex = choose_move(&game, Tier::SafeRandom, dyn_rng).unwrap();
        assert!(hex.is_some());
    }

    #[test]
    fn test_advanced_matches_tactical() {
        let mut game = GameState::new(PlayerCount::Three);
        game.apply_moves(&[h(4, 0), h(5, 0), h(3, 1)]).unwrap();
        for seed in 0..20 {
            let a = choose_move(&game, Tier::Tactical, &mut rng(seed)).unwrap();
            let b = choose_move(&game, Tier::Advanced, &mut rng(seed)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_tactical_prefers_center() {
        let game = GameState::new(PlayerCount::Two);
        // Score 10 at the center, then the first two score-9 cells in
        // enumeration order
        let top = [h(4, 0), h(4, -1), h(3, 0)];
        let mut board_top: Vec<_> = game.board().empty_cells().collect();
        board_top.sort_by_key(|hex| Reverse(hex.center_score()));
        assert_eq!(&board_top[..3], &top);
        for seed in 0..50 {
            let hex = choose_move(&game, Tier::Tactical, &mut rng(seed)).unwrap().unwrap();
            assert!(top.contains(&hex), "{hex}");
        }
    }

    #[test]
    fn test_seeded_player_is_deterministic() {
        let game = GameState::new(PlayerCount::Three);
        let (a, moves_a) = NpcPlayer::with_seed(Tier::SafeRandom, 9).play_game(game.clone()).unwrap();
        let (b, moves_b) = NpcPlayer::with_seed(Tier::SafeRandom, 9).play_game(game).unwrap();
        assert_eq!(moves_a, moves_b);
        assert_eq!(a.outcome(), b.outcome());
        assert!(a.is_over());
    }
}
