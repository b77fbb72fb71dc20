//! Round and live-state tracking
//!
//! The tracker is the only writer of [`MatchState`]. It is dispatched each
//! event before any other module, so a round start or pause is already
//! visible to the modules handling that same event.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, Team, Timestamp};
use crate::events::{CaptureEvent, DomainEvent, EventKind, ScoreEvent};

/// Match-wide state shared read-only with every aggregator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchState {
    is_live: bool,
    map_name: Option<String>,
}

impl MatchState {
    /// True while a round is running and not paused
    pub fn is_live(&self) -> bool {
        self.is_live
    }

    pub fn map_name(&self) -> Option<&str> {
        self.map_name.as_deref()
    }
}

/// A capture observed during a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureMarker {
    pub time_in_seconds: i64,
    pub team: Option<Team>,
    pub point_id: u32,
}

/// In-round markers, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RoundEvent {
    Capture(CaptureMarker),
}

/// A completed round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Wall time from start to end minus paused time
    pub length_in_seconds: i64,
    pub red_score: u32,
    pub blu_score: u32,
    pub winner: Option<Team>,
    pub events: Vec<RoundEvent>,
}

/// `game` section of the match report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReport {
    pub map: Option<String>,
    pub names: BTreeMap<String, String>,
    pub total_length_in_seconds: i64,
    pub rounds: Vec<Round>,
}

#[derive(Debug)]
pub struct GameStateTracker {
    state: MatchState,
    round_start: Timestamp,
    /// Start of a pause not yet matched by an unpause
    pause_start: Option<Timestamp>,
    paused_secs: i64,
    round_events: Vec<RoundEvent>,
    rounds: Vec<Round>,
    total_length: i64,
    names: AHashMap<PlayerId, String>,
}

impl Default for GameStateTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStateTracker {
    pub fn new() -> Self {
        Self {
            state: MatchState::default(),
            round_start: 0,
            pause_start: None,
            paused_secs: 0,
            round_events: Vec::new(),
            rounds: Vec::new(),
            total_length: 0,
            names: AHashMap::new(),
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn total_length(&self) -> i64 {
        self.total_length
    }

    /// Update round and live state from one event
    pub fn apply(&mut self, event: &DomainEvent) {
        for player in event.players() {
            self.names.insert(player.id.clone(), player.name.clone());
        }

        let at = event.timestamp;
        match &event.kind {
            EventKind::RoundStart => self.start_round(at),
            EventKind::Pause => self.pause(at),
            EventKind::Unpause => self.unpause(at),
            EventKind::RoundEnd(e) => self.end_round(at, e.winner),
            EventKind::GameOver(_) => self.end_round(at, None),
            EventKind::Score(e) => self.score(e),
            EventKind::Capture(e) => self.capture(at, e),
            EventKind::MapLoad(e) => self.state.map_name = Some(e.map_name.clone()),
            EventKind::Kill(_)
            | EventKind::Damage(_)
            | EventKind::Heal(_)
            | EventKind::Shot(_)
            | EventKind::ShotHit(_)
            | EventKind::Assist(_)
            | EventKind::Pickup(_)
            | EventKind::Suicide(_)
            | EventKind::Spawn(_)
            | EventKind::RoleChange(_)
            | EventKind::MedicDeath(_)
            | EventKind::JoinTeam(_)
            | EventKind::Disconnect(_)
            | EventKind::Charge(_)
            | EventKind::Chat(_)
            | EventKind::Build(_)
            | EventKind::Flag(_) => {}
        }
    }

    fn start_round(&mut self, at: Timestamp) {
        self.round_start = at;
        self.pause_start = None;
        self.paused_secs = 0;
        self.round_events.clear();
        self.state.is_live = true;
    }

    /// A repeated pause moves the pending start to the latest one
    fn pause(&mut self, at: Timestamp) {
        self.state.is_live = false;
        self.pause_start = Some(at);
    }

    /// Unpausing always goes live, even with no pause pending
    fn unpause(&mut self, at: Timestamp) {
        self.state.is_live = true;
        if let Some(since) = self.pause_start.take() {
            self.paused_secs += (at - since).max(0);
        }
    }

    fn end_round(&mut self, at: Timestamp, winner: Option<Team>) {
        if !self.state.is_live {
            return;
        }
        self.state.is_live = false;

        let length = at - self.round_start - self.paused_secs;
        let events = std::mem::take(&mut self.round_events);
        if length < 1 {
            tracing::debug!("Discarding round of {}s", length);
            return;
        }

        tracing::debug!("Round {} recorded: {}s, winner {:?}", self.rounds.len() + 1, length, winner);
        self.rounds.push(Round {
            length_in_seconds: length,
            red_score: 0,
            blu_score: 0,
            winner,
            events,
        });
        self.total_length += length;
    }

    /// Scores attach to the last recorded round; a score seen before any
    /// round has ended is dropped
    fn score(&mut self, event: &ScoreEvent) {
        let Some(round) = self.rounds.last_mut() else {
            return;
        };
        match event.team {
            Team::Red => round.red_score = event.score,
            Team::Blue => round.blu_score = event.score,
            Team::Spectator | Team::Console => {}
        }
    }

    fn capture(&mut self, at: Timestamp, event: &CaptureEvent) {
        self.round_events.push(RoundEvent::Capture(CaptureMarker {
            time_in_seconds: at - self.round_start,
            team: event.team,
            point_id: event.point_id,
        }));
    }

    pub fn report(&self) -> GameReport {
        GameReport {
            map: self.state.map_name.clone(),
            names: self
                .names
                .iter()
                .map(|(id, name)| (id.to_string(), name.clone()))
                .collect(),
            total_length_in_seconds: self.total_length,
            rounds: self.rounds.clone(),
        }
    }
}
