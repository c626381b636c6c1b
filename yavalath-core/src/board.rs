//! Hex board geometry with axial coordinates
//!
//! The board is the fixed 61-cell hexagon laid out in rows of
//! 5-6-7-8-9-8-7-6-5. Row `k` has `r = k - 4` and its first cell at
//! `q = max(0, 4 - k)`, which puts the center at `(4, 0)`.

use crate::error::IllegalMove;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Cells per row, top to bottom
pub const ROW_SIZES: [u8; 9] = [5, 6, 7, 8, 9, 8, 7, 6, 5];

/// Number of cells on the board
pub const CELL_COUNT: usize = 61;

/// Center hex of the board
pub const CENTER: Hex = Hex::new(4, 0);

/// Distance from center to edge
pub const BOARD_RADIUS: i8 = 4;

/// The three line axes, each a pair of opposite unit steps (dq, dr).
/// Together they cover all six neighbor directions.
pub const AXES: [[(i8, i8); 2]; 3] = [
    [(1, 0), (-1, 0)],
    [(0, 1), (0, -1)],
    [(1, -1), (-1, 1)],
];

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
}

impl Hex {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Check if this hex is one of the 61 board cells
    pub fn is_valid(&self) -> bool {
        let radius = BOARD_RADIUS as i16;
        let dq = self.q as i16 - CENTER.q as i16;
        let dr = self.r as i16 - CENTER.r as i16;
        dq.abs() <= radius && dr.abs() <= radius && (dq + dr).abs() <= radius
    }

    /// Hex one step away in direction (dq, dr); None if the coordinates
    /// leave the `i8` range
    pub fn step(&self, (dq, dr): (i8, i8)) -> Option<Hex> {
        Some(Hex::new(self.q.checked_add(dq)?, self.r.checked_add(dr)?))
    }

    /// Center-proximity score used by the NPC: `10 - (|q - 4| + |r|)`.
    /// Higher is closer to the middle.
    pub fn center_score(&self) -> i16 {
        10 - ((self.q as i16 - CENTER.q as i16).abs() + (self.r as i16 - CENTER.r as i16).abs())
    }
}

impl std::fmt::Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Stone color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    Black = 0,
    White = 1,
    Grey = 2,
}

impl Stone {
    /// Single-letter symbol (B, W, G)
    pub fn symbol(self) -> char {
        match self {
            Stone::Black => 'B',
            Stone::White => 'W',
            Stone::Grey => 'G',
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stone::Black => "Black",
            Stone::White => "White",
            Stone::Grey => "Grey",
        };
        f.write_str(name)
    }
}

/// A board cell: fixed coordinates plus occupancy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub hex: Hex,
    pub stone: Option<Stone>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.stone.is_none()
    }
}

/// The 61-cell board. Knows occupancy only, nothing about turns or rules.
#[derive(Clone, Debug)]
pub struct HexBoard {
    /// Cells in enumeration order (row-major, top row first)
    cells: Vec<Cell>,
    /// hex -> position in `cells`
    index: FxHashMap<Hex, usize>,
}

impl Default for HexBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl HexBoard {
    /// Build an empty board
    pub fn new() -> Self {
        let mut cells = Vec::with_capacity(CELL_COUNT);
        let mut index = FxHashMap::default();

        for (row, &size) in ROW_SIZES.iter().enumerate() {
            let row = row as i8;
            let q_start = (BOARD_RADIUS - row).max(0);
            let r = row - BOARD_RADIUS;
            for i in 0..size as i8 {
                let hex = Hex::new(q_start + i, r);
                index.insert(hex, cells.len());
                cells.push(Cell { hex, stone: None });
            }
        }

        Self { cells, index }
    }

    /// Cell at (q, r), or None when off-board
    pub fn cell_at(&self, hex: Hex) -> Option<&Cell> {
        self.index.get(&hex).map(|&i| &self.cells[i])
    }

    /// Occupancy at hex; None for both empty and off-board
    pub fn stone_at(&self, hex: Hex) -> Option<Stone> {
        self.cell_at(hex).and_then(|c| c.stone)
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.index.contains_key(&hex)
    }

    /// Adjacent cell one step along `step`, or None when that leaves the board
    pub fn neighbor(&self, hex: Hex, step: (i8, i8)) -> Option<&Cell> {
        hex.step(step).and_then(|next| self.cell_at(next))
    }

    /// Put a stone on an empty cell. The only mutation besides `reset`.
    pub fn place(&mut self, hex: Hex, stone: Stone) -> Result<(), IllegalMove> {
        let &i = self.index.get(&hex).ok_or(IllegalMove::OffBoard(hex))?;
        let cell = &mut self.cells[i];
        if cell.stone.is_some() {
            return Err(IllegalMove::Occupied(hex));
        }
        cell.stone = Some(stone);
        Ok(())
    }

    /// Clear every cell
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.stone = None;
        }
    }

    /// All cells in enumeration order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty cells in enumeration order
    pub fn empty_cells(&self) -> impl Iterator<Item = Hex> + '_ {
        self.cells.iter().filter(|c| c.is_empty()).map(|c| c.hex)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.stone.is_some())
    }

    /// Cells of one row (0..9), left to right; None past the last row
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        let size = *ROW_SIZES.get(row)? as usize;
        let start: usize = ROW_SIZES[..row].iter().map(|&n| n as usize).sum();
        self.cells.get(start..start + size)
    }
}
