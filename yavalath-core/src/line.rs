//! Line-run evaluation
//!
//! Counts contiguous same-color stones through a cell along each axis.
//! Hypothetical placements never touch the board: they are evaluated
//! against an [`Overlay`], a read-only view that reports one extra stone
//! on top of a borrowed board.

use crate::board::{Hex, HexBoard, Stone, AXES};
use crate::error::GameError;

/// Placing a run of exactly this many stones loses
pub const LOSE_LENGTH: u8 = 3;

/// Placing a run of at least this many stones wins
pub const WIN_LENGTH: u8 = 4;

/// Read-only occupancy lookup
pub trait StoneView {
    /// Stone at hex; None for empty or off-board
    fn stone_at(&self, hex: Hex) -> Option<Stone>;
}

impl StoneView for HexBoard {
    fn stone_at(&self, hex: Hex) -> Option<Stone> {
        HexBoard::stone_at(self, hex)
    }
}

/// A board plus one hypothetical stone
#[derive(Clone, Copy, Debug)]
pub struct Overlay<'a> {
    board: &'a HexBoard,
    hex: Hex,
    stone: Stone,
}

impl<'a> Overlay<'a> {
    /// Fails with `PreconditionViolated` unless `hex` is an empty board cell.
    pub fn new(board: &'a HexBoard, hex: Hex, stone: Stone) -> Result<Self, GameError> {
        match board.cell_at(hex) {
            Some(cell) if cell.is_empty() => Ok(Self { board, hex, stone }),
            _ => Err(GameError::PreconditionViolated(hex)),
        }
    }

    /// Length of the run through the overlaid stone on each axis
    pub fn run_lengths(&self) -> [u8; 3] {
        runs_through(self, self.hex, self.stone)
    }
}

impl StoneView for Overlay<'_> {
    fn stone_at(&self, hex: Hex) -> Option<Stone> {
        if hex == self.hex {
            Some(self.stone)
        } else {
            self.board.stone_at(hex)
        }
    }
}

/// Count stones of `stone` adjacent to `hex` along `axis`, walking out in
/// both directions and stopping at the first mismatch or the board edge.
/// `hex` itself is never counted.
pub fn run_length<V: StoneView + ?Sized>(view: &V, hex: Hex, stone: Stone, axis: usize) -> u8 {
    AXES[axis]
        .iter()
        .map(|&step| {
            let mut count = 0;
            let mut current = hex.step(step);
            while let Some(next) = current.filter(|&h| view.stone_at(h) == Some(stone)) {
                count += 1;
                current = next.step(step);
            }
            count
        })
        .sum()
}

/// `1 + run_length` for each axis, i.e. the full run containing `hex`
pub fn runs_through<V: StoneView + ?Sized>(view: &V, hex: Hex, stone: Stone) -> [u8; 3] {
    std::array::from_fn(|axis| 1 + run_length(view, hex, stone, axis))
}

/// Would placing `stone` at the empty `hex` make a run of exactly `length`
/// on any axis?
pub fn would_create_run_of_exactly(
    board: &HexBoard,
    hex: Hex,
    stone: Stone,
    length: u8,
) -> Result<bool, GameError> {
    let runs = Overlay::new(board, hex, stone)?.run_lengths();
    Ok(runs.iter().any(|&n| n == length))
}

/// Would placing `stone` at the empty `hex` make a run of `length` or more
/// on any axis?
pub fn would_create_run_of_at_least(
    board: &HexBoard,
    hex: Hex,
    stone: Stone,
    length: u8,
) -> Result<bool, GameError> {
    let runs = Overlay::new(board, hex, stone)?.run_lengths();
    Ok(runs.iter().any(|&n| n >= length))
}

/// Safe cell: placing here does not make an exact three
pub fn is_safe(board: &HexBoard, hex: Hex, stone: Stone) -> Result<bool, GameError> {
    Ok(!would_create_run_of_exactly(board, hex, stone, LOSE_LENGTH)?)
}

/// Winning cell: placing here makes four or more
pub fn is_winning(board: &HexBoard, hex: Hex, stone: Stone) -> Result<bool, GameError> {
    would_create_run_of_at_least(board, hex, stone, WIN_LENGTH)
}
