//! Yavalath Core - Rule engine and NPC players
//!
//! This crate provides the core game logic for Yavalath:
//! - Board geometry (61-cell hex grid with axial coordinates)
//! - Line-run evaluation, including hypothetical placements
//! - Game state: placements, three-loses / four-wins, turn rotation
//! - Heuristic NPC move selection in three tiers
//! - Game configuration and seat assignment

pub mod board;
pub mod line;
pub mod error;
pub mod game;
pub mod ai;
pub mod config;

// Re-exports for convenient access
pub use board::{Cell, Hex, HexBoard, Stone, AXES, CELL_COUNT, CENTER, ROW_SIZES};
pub use line::{
    run_length, would_create_run_of_at_least, would_create_run_of_exactly, Overlay,
    LOSE_LENGTH, WIN_LENGTH,
};
pub use error::{GameError, IllegalMove};
pub use game::{GameState, GameStatus, MoveOutcome, Outcome, PlayerCount};
pub use ai::{choose_move, NpcPlayer, Tier};
pub use config::{GameConfig, GameMode, Seating};
