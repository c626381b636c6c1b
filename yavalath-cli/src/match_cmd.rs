//! Match command - play NPC tiers against each other
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), play(), report_results()
//! - Level 3: print_text_results(), print_json_results()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use yavalath_core::Tier;
use yavalath_tournament::{play_match_with_progress, MatchConfig, MatchResult, SeatStats};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Tier for each seat, comma separated (two or three seats)
    #[arg(long, value_delimiter = ',', default_value = "1,2")]
    pub tiers: Vec<u8>,

    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Keep every seat on the same color instead of rotating
    #[arg(long)]
    pub no_rotate: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON report (games are summarised, not listed)
#[derive(Serialize)]
struct MatchReport<'a> {
    played_at: String,
    config: &'a MatchConfig,
    seats: &'a [SeatStats],
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;

    tracing::info!(
        "Match: {} ({} games, rotate={})",
        describe_lineup(&config.lineup),
        config.games,
        config.rotate_seats
    );

    let results = play(&config, args.json)?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Turn CLI arguments into a match config
fn build_config(args: &MatchArgs, seed: Option<u64>) -> Result<MatchConfig> {
    let lineup = args
        .tiers
        .iter()
        .map(|&t| Tier::try_from(t))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid --tiers")?;

    let mut config = MatchConfig::with_lineup(lineup).context("Invalid --tiers")?;
    config.games = args.games;
    config.rotate_seats = !args.no_rotate;
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(config)
}

/// Play all games with a progress bar
fn play(config: &MatchConfig, quiet: bool) -> Result<MatchResult> {
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(config.games as u64)
    };
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}]")
            .context("Invalid progress template")?,
    );

    let results = play_match_with_progress(config, |_| progress.inc(1))?;
    progress.finish_and_clear();
    Ok(results)
}

/// Report match results
fn report_results(results: &MatchResult, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results)
    } else {
        print_text_results(results);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - OUTPUT
// ============================================================================

fn print_text_results(results: &MatchResult) {
    println!();
    println!("=== Match Results ===");
    println!("Games: {}", results.games.len());
    for (i, seat) in results.seats.iter().enumerate() {
        println!(
            "Seat {} ({}): {} wins, {} self-losses ({})",
            i + 1,
            seat.tier,
            seat.wins,
            seat.losses,
            format_rate(seat.wins, seat.games)
        );
    }
    println!(
        "Draws: {} ({})",
        results.draws,
        format_rate(results.draws, results.games.len())
    );
    println!("Average length: {:.1} moves", results.avg_moves);
}

fn print_json_results(results: &MatchResult) -> Result<()> {
    let report = MatchReport {
        played_at: chrono::Utc::now().to_rfc3339(),
        config: &results.config,
        seats: &results.seats,
        draws: results.draws,
        avg_moves: results.avg_moves,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_rate(count: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", 100.0 * count as f32 / total as f32)
}

fn describe_lineup(lineup: &[Tier]) -> String {
    lineup
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" vs ")
}
