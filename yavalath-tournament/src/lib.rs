//! Yavalath Tournament - NPC self-play
//!
//! This crate plays complete games between NPC tiers:
//! - Single games with one tier per color
//! - Matches with seat rotation, played in parallel
//! - Per-seat result aggregation
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: play_match (orchestration)
//! - Level 2: play_match_with_progress (phases)
//! - Level 3: play_seeded_game (steps)
//! - Level 4: utilities, configuration

mod config;
mod game_runner;
mod match_play;

pub use config::{MatchConfig, MatchError};
pub use game_runner::{play_seeded_game, GameRecord, GameRunner};
pub use match_play::{play_match, play_match_with_progress, MatchResult, SeatStats};
