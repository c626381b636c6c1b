//! Play command - a game in the terminal
//!
//! Humans enter cells as `q r`; NPC seats move on their own.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use yavalath_core::{
    choose_move, GameConfig, GameError, GameMode, GameState, Hex, HexBoard, MoveOutcome, Outcome,
    PlayerCount, Seating, Tier, ROW_SIZES,
};

#[derive(Args)]
pub struct PlayArgs {
    /// Game config JSON file; flags below override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of players (2 or 3)
    #[arg(long)]
    pub players: Option<u8>,

    /// Play against NPCs of this tier (1-3); omit for humans only
    #[arg(long)]
    pub npc_tier: Option<u8>,
}

/// Run play command on stdin/stdout
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    play(config, seed, stdin.lock(), stdout.lock())
}

/// Merge the config file with command-line overrides
fn build_config(args: &PlayArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(players) = args.players {
        config.player_count = PlayerCount::try_from(players).context("Invalid --players")?;
    }
    if let Some(tier) = args.npc_tier {
        let tier = Tier::try_from(tier).context("Invalid --npc-tier")?;
        config.mode = GameMode::PlayerVsNpc { tier };
    }
    Ok(config)
}

/// Game loop over any line-based input and output
fn play<R: BufRead, W: Write>(config: GameConfig, seed: Option<u64>, mut input: R, mut out: W) -> Result<()> {
    let mut rng = create_rng(seed);
    let (mut state, seating) = config.start(&mut rng);

    tracing::info!("New game: {} players, {:?}", state.players().count(), seating);
    if let Some(human) = seating.human() {
        writeln!(out, "You play {human}.")?;
    }

    loop {
        write!(out, "{}", render_board(state.board()))?;

        let mover = state.active_color();
        let hex = if seating.is_npc(mover) {
            let hex = npc_move(&state, &seating, &mut rng)?;
            writeln!(out, "{mover} (NPC) plays {hex}")?;
            hex
        } else {
            write!(out, "{mover} to move (q r): ")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let line = line.trim();
            if line == "quit" {
                return Ok(());
            }
            match parse_hex(line) {
                Some(hex) => hex,
                None => {
                    writeln!(out, "Enter two integers, e.g. `4 0`.")?;
                    continue;
                }
            }
        };

        match state.apply_move(hex) {
            Ok(MoveOutcome::Continue { .. }) => {}
            Ok(_) => {
                write!(out, "{}", render_board(state.board()))?;
                if let Some(outcome) = state.outcome() {
                    writeln!(out, "{}", describe_outcome(outcome))?;
                }
                return Ok(());
            }
            Err(GameError::IllegalMove(reason)) => {
                tracing::debug!("rejected move {hex}: {reason}");
                writeln!(out, "Illegal move: {reason}")?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn npc_move(state: &GameState, seating: &Seating, rng: &mut ChaCha8Rng) -> Result<Hex> {
    let tier = seating.npc_tier().context("NPC seat without a tier")?;
    choose_move(state, tier, rng)?.context("NPC has no legal move")
}

// ============================================================================
// UTILITIES
// ============================================================================

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Parse `q r` (space or comma separated)
fn parse_hex(line: &str) -> Option<Hex> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());
    let q = parts.next()?.parse().ok()?;
    let r = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Hex::new(q, r))
}

/// One row per line, indented into a hexagon, with the row's r and q range
fn render_board(board: &HexBoard) -> String {
    let mut text = String::new();
    for (row, cells) in (0..ROW_SIZES.len()).filter_map(|row| Some((row, board.row(row)?))) {
        let indent = (row as i32 - 4).unsigned_abs() as usize;
        let stones: Vec<String> = cells
            .iter()
            .map(|c| c.stone.map_or('.', |s| s.symbol()).to_string())
            .collect();
        let (first, last) = (cells[0].hex, cells[cells.len() - 1].hex);
        text.push_str(&format!(
            "{}{}{}   r={:>2} q={}..{}\n",
            " ".repeat(indent),
            stones.join(" "),
            " ".repeat(indent),
            first.r,
            first.q,
            last.q
        ));
    }
    text
}

fn describe_outcome(outcome: Outcome) -> String {
    match outcome {
        Outcome::Loss { loser, cell } => format!("{loser} made three in a row at {cell}. {loser} loses!"),
        Outcome::Win { winner, cell } => format!("{winner} made four in a row at {cell}. {winner} wins!"),
        Outcome::Draw => "The board is full. Draw.".to_string(),
    }
}
