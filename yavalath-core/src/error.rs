//! Error taxonomy for the rule engine

use crate::board::Hex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a placement was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IllegalMove {
    /// Target cell already holds a stone
    Occupied(Hex),
    /// The game has ended; no further placements are accepted
    GameOver,
    /// Coordinates are not one of the 61 board cells
    OffBoard(Hex),
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::Occupied(hex) => write!(f, "cell {hex} is occupied"),
            IllegalMove::GameOver => write!(f, "game is over"),
            IllegalMove::OffBoard(hex) => write!(f, "cell {hex} is off the board"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Recoverable: the caller should pick another cell.
    #[error("illegal move: {0}")]
    IllegalMove(IllegalMove),

    /// Hypothetical evaluation through an occupied cell. Always a caller bug.
    #[error("precondition violated: cell {0} must be empty for a hypothetical placement")]
    PreconditionViolated(Hex),

    #[error("unsupported player count {0} (expected 2 or 3)")]
    InvalidPlayerCount(u8),

    #[error("unknown difficulty tier {0} (expected 1, 2 or 3)")]
    InvalidTier(u8),
}

impl From<IllegalMove> for GameError {
    fn from(reason: IllegalMove) -> Self {
        GameError::IllegalMove(reason)
    }
}
