//! Match report and serialization

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::stats::chat::ChatMessage;
use crate::stats::game_state::GameReport;
use crate::stats::player::PlayerStats;
use crate::stats::player_class::ClassStats;
use crate::stats::pvc::PvcStats;
use crate::stats::pvp::PvpStats;
use crate::stats::team::TeamStats;

/// Complete per-match output, one section per aggregator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub game: GameReport,
    pub teams: BTreeMap<String, TeamStats>,
    pub players: BTreeMap<String, PlayerStats>,
    #[serde(rename = "playerClasses")]
    pub player_classes: BTreeMap<String, BTreeMap<String, ClassStats>>,
    #[serde(rename = "PvP")]
    pub pvp: BTreeMap<String, BTreeMap<String, PvpStats>>,
    #[serde(rename = "PvC")]
    pub pvc: BTreeMap<String, BTreeMap<String, PvcStats>>,
    #[serde(rename = "realDamage")]
    pub real_damage: BTreeMap<String, u64>,
    pub chat: Vec<ChatMessage>,
}

impl MatchReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} rounds, {}s played, {} players, {} chat messages",
            self.game.map.as_deref().unwrap_or("unknown map"),
            self.game.rounds.len(),
            self.game.total_length_in_seconds,
            self.players.len(),
            self.chat.len(),
        )
    }
}
