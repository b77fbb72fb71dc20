//! Chat transcript

use serde::{Deserialize, Serialize};

use crate::core::types::{Team, Timestamp};
use crate::events::ChatEvent;
use crate::stats::{MatchState, StatsModule};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Seconds since the first round started; 0 before that
    pub time_in_seconds: i64,
    pub steamid: String,
    pub name: String,
    pub team: Team,
    pub message: String,
    pub team_only: bool,
}

#[derive(Debug, Default)]
pub struct ChatModule {
    game_start: Option<Timestamp>,
    messages: Vec<ChatMessage>,
}

impl ChatModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn report(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }
}

impl StatsModule for ChatModule {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn on_round_start(&mut self, _state: &MatchState, at: Timestamp) {
        self.game_start.get_or_insert(at);
    }

    fn on_chat(&mut self, _state: &MatchState, at: Timestamp, event: &ChatEvent) {
        let time_in_seconds = self.game_start.map_or(0, |start| (at - start).max(0));
        self.messages.push(ChatMessage {
            time_in_seconds,
            steamid: event.player.id.to_string(),
            name: event.player.name.clone(),
            team: event.player.team,
            message: event.message.clone(),
            team_only: event.team_only,
        });
    }
}
