//! Match play - many games between a fixed lineup of tiers
//!
//! Level 1/2 - Orchestration and phases

use rayon::prelude::*;
use serde::Serialize;
use yavalath_core::{Outcome, Tier};

use crate::config::{MatchConfig, MatchError};
use crate::game_runner::{play_seeded_game, GameRecord};

/// Results for one seat across the match
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeatStats {
    pub tier: Tier,
    /// Games this seat won by completing four
    pub wins: usize,
    /// Games this seat lost by completing three
    pub losses: usize,
    pub draws: usize,
    pub games: usize,
}

impl SeatStats {
    /// Wins minus self-inflicted losses, per game
    pub fn score(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        (self.wins as f32 - self.losses as f32) / self.games as f32
    }
}

/// Aggregated match results
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    pub config: MatchConfig,
    /// Per seat, in lineup order
    pub seats: Vec<SeatStats>,
    pub draws: usize,
    pub avg_moves: f32,
    pub games: Vec<GameRecord>,
}

/// Play a full match
pub fn play_match(config: &MatchConfig) -> Result<MatchResult, MatchError> {
    play_match_with_progress(config, |_| {})
}

/// Play a full match, calling `on_game` as each game finishes.
///
/// Games run in parallel; game `g` is seeded with `seed + g`, so results
/// do not depend on scheduling.
pub fn play_match_with_progress<F>(config: &MatchConfig, on_game: F) -> Result<MatchResult, MatchError>
where
    F: Fn(&GameRecord) + Sync,
{
    config.validate()?;

    tracing::info!(
        "Starting match: {:?} ({} games, {} players)",
        config.lineup,
        config.games,
        config.player_count.count()
    );

    let games = (0..config.games)
        .into_par_iter()
        .map(|g| -> Result<GameRecord, MatchError> {
            let lineup = config.lineup_for_game(g);
            let seed = config.seed.wrapping_add(g as u64);
            let record = play_seeded_game(config.player_count, &lineup, seed)?;
            on_game(&record);
            Ok(record)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let result = compute_statistics(config, games);

    tracing::info!(
        "Match finished: {} draws, {:.1} moves per game",
        result.draws,
        result.avg_moves
    );

    Ok(result)
}

/// Aggregate finished games per seat
fn compute_statistics(config: &MatchConfig, games: Vec<GameRecord>) -> MatchResult {
    let mut seats: Vec<SeatStats> = config
        .lineup
        .iter()
        .map(|&tier| SeatStats {
            tier,
            ..Default::default()
        })
        .collect();
    let mut draws = 0;

    for (g, record) in games.iter().enumerate() {
        for seat in seats.iter_mut() {
            seat.games += 1;
        }
        match record.outcome {
            Outcome::Win { winner, .. } => seats[config.seat_of_color(g, winner.index())].wins += 1,
            Outcome::Loss { loser, .. } => seats[config.seat_of_color(g, loser.index())].losses += 1,
            Outcome::Draw => {
                draws += 1;
                for seat in seats.iter_mut() {
                    seat.draws += 1;
                }
            }
        }
    }

    let total_moves: usize = games.iter().map(GameRecord::length).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResult {
        config: config.clone(),
        seats,
        draws,
        avg_moves,
        games,
    }
}
