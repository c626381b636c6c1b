//! Game configuration and seat assignment

use crate::ai::Tier;
use crate::board::Stone;
use crate::game::{GameState, PlayerCount};
use anyhow::Context;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Who sits at the table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum GameMode {
    /// Every seat is a human
    #[default]
    PlayerVsPlayer,
    /// One human, every other seat an NPC of `tier`
    PlayerVsNpc { tier: Tier },
}

/// Settings for a new game
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_count: PlayerCount,
    pub mode: GameMode,
}

impl GameConfig {
    pub fn new(player_count: PlayerCount, mode: GameMode) -> Self {
        Self { player_count, mode }
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read game config: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse game config: {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Start a game: fresh state plus the seating for it. In NPC mode the
    /// human's color is drawn uniformly from the active colors.
    pub fn start<R: Rng + ?Sized>(&self, rng: &mut R) -> (GameState, Seating) {
        let seating = match self.mode {
            GameMode::PlayerVsPlayer => Seating::AllHuman,
            GameMode::PlayerVsNpc { tier } => {
                let colors = self.player_count.colors();
                let human = colors[rng.gen_range(0..colors.len())];
                Seating::VsNpc { human, tier }
            }
        };
        (GameState::new(self.player_count), seating)
    }
}

/// Which colors are played by the NPC
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seating {
    AllHuman,
    VsNpc { human: Stone, tier: Tier },
}

impl Seating {
    pub fn is_npc(&self, color: Stone) -> bool {
        match *self {
            Seating::AllHuman => false,
            Seating::VsNpc { human, .. } => color != human,
        }
    }

    pub fn npc_tier(&self) -> Option<Tier> {
        match *self {
            Seating::AllHuman => None,
            Seating::VsNpc { tier, .. } => Some(tier),
        }
    }

    pub fn human(&self) -> Option<Stone> {
        match *self {
            Seating::AllHuman => None,
            Seating::VsNpc { human, .. } => Some(human),
        }
    }
}
