//! Game state and turn rules

use crate::board::{Hex, HexBoard, Stone};
use crate::error::{GameError, IllegalMove};
use crate::line::{runs_through, LOSE_LENGTH, WIN_LENGTH};
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Number of participants, fixed for a game
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerCount {
    #[default]
    Two,
    Three,
}

const TWO_PLAYERS: [Stone; 2] = [Stone::Black, Stone::White];
const THREE_PLAYERS: [Stone; 3] = [Stone::Black, Stone::White, Stone::Grey];

impl PlayerCount {
    /// Active colors in turn order
    pub fn colors(self) -> &'static [Stone] {
        match self {
            PlayerCount::Two => &TWO_PLAYERS,
            PlayerCount::Three => &THREE_PLAYERS,
        }
    }

    pub fn count(self) -> usize {
        self.colors().len()
    }

    /// Color that moves after `current`: B -> W -> B, or B -> W -> G -> B
    pub fn next(self, current: Stone) -> Stone {
        let colors = self.colors();
        colors[(current.index() + 1) % colors.len()]
    }

    /// Every active color except `mover`, in turn order
    pub fn opponents(self, mover: Stone) -> impl Iterator<Item = Stone> {
        self.colors().iter().copied().filter(move |&c| c != mover)
    }

    pub fn contains(self, stone: Stone) -> bool {
        self.colors().contains(&stone)
    }
}

impl TryFrom<u8> for PlayerCount {
    type Error = GameError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            2 => Ok(PlayerCount::Two),
            3 => Ok(PlayerCount::Three),
            other => Err(GameError::InvalidPlayerCount(other)),
        }
    }
}

impl From<PlayerCount> for u8 {
    fn from(pc: PlayerCount) -> u8 {
        pc.count() as u8
    }
}

/// Terminal result of a game. Immutable once reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Mover completed a run of exactly three
    Loss { loser: Stone, cell: Hex },
    /// Mover completed a run of four or more
    Win { winner: Stone, cell: Hex },
    /// Last cell filled with neither condition
    Draw,
}

/// Whether the game still accepts placements
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Ended(Outcome),
}

/// Result of an accepted placement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Continue { next: Stone },
    Loss { loser: Stone, cell: Hex },
    Win { winner: Stone, cell: Hex },
    Draw,
}

impl From<Outcome> for MoveOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Loss { loser, cell } => MoveOutcome::Loss { loser, cell },
            Outcome::Win { winner, cell } => MoveOutcome::Win { winner, cell },
            Outcome::Draw => MoveOutcome::Draw,
        }
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// One game session: the board, whose turn it is, and the outcome.
///
/// Every operation goes through an explicit `GameState`; sessions share
/// nothing, so any number of games can run side by side.
#[derive(Clone, Debug)]
pub struct GameState {
    board: HexBoard,
    players: PlayerCount,
    active: Stone,
    status: GameStatus,
    /// Placements in order
    history: Vec<(Stone, Hex)>,
}

impl GameState {
    /// Fresh game, Black to move
    pub fn new(players: PlayerCount) -> Self {
        Self {
            board: HexBoard::new(),
            players,
            active: Stone::Black,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Clear the board and start over with a (possibly different) player count
    pub fn reset(&mut self, players: PlayerCount) {
        self.board.reset();
        self.players = players;
        self.active = Stone::Black;
        self.status = GameStatus::InProgress;
        self.history.clear();
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &HexBoard {
        &self.board
    }

    pub fn players(&self) -> PlayerCount {
        self.players
    }

    /// Color to move. After the game ends this is the color that made the
    /// final placement.
    pub fn active_color(&self) -> Stone {
        self.active
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Ended(outcome) => Some(outcome),
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Ended(_))
    }

    pub fn history(&self) -> &[(Stone, Hex)] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Empty cells in enumeration order; none once the game has ended
    pub fn legal_moves(&self) -> Vec<Hex> {
        if self.is_over() {
            return Vec::new();
        }
        self.board.empty_cells().collect()
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Place the active color's stone at `hex` and resolve the result.
    ///
    /// Exact three is checked before four-or-more, so a placement that
    /// makes both on different axes loses. A rejected move changes nothing.
    pub fn apply_move(&mut self, hex: Hex) -> Result<MoveOutcome, GameError> {
        if self.is_over() {
            return Err(IllegalMove::GameOver.into());
        }

        let mover = self.active;
        self.board.place(hex, mover)?;
        self.history.push((mover, hex));

        let runs = runs_through(&self.board, hex, mover);
        let outcome = if runs.iter().any(|&n| n == LOSE_LENGTH) {
            Some(Outcome::Loss { loser: mover, cell: hex })
        } else if runs.iter().any(|&n| n >= WIN_LENGTH) {
            Some(Outcome::Win { winner: mover, cell: hex })
        } else if self.board.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        };

        match outcome {
            Some(outcome) => {
                self.status = GameStatus::Ended(outcome);
                Ok(outcome.into())
            }
            None => {
                self.active = self.players.next(mover);
                Ok(MoveOutcome::Continue { next: self.active })
            }
        }
    }

    /// Apply a sequence of moves, stopping at the first rejection
    pub fn apply_moves(&mut self, moves: &[Hex]) -> Result<Option<MoveOutcome>, GameError> {
        let mut last = None;
        for &hex in moves {
            last = Some(self.apply_move(hex)?);
        }
        Ok(last)
    }
}

// ============================================================================
// TESTS
// ============================================================================
