//! Per-player statistics

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, PlayerIdentity, Team, Timestamp};
use crate::events::{
    AssistEvent, BuildEvent, CaptureEvent, ChargeEvent, DamageEvent, HealEvent, JoinTeamEvent,
    KillEvent, MedicDeathEvent, SuicideEvent,
};
use crate::stats::{MatchState, StatsModule};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    /// Team of the most recent observation
    pub team: Team,
    pub kills: u32,
    pub assists: u32,
    pub deaths: u32,
    pub damage: u64,
    pub damage_taken: u64,
    pub suicides: u32,
    pub charges: u32,
    pub charges_by_type: BTreeMap<String, u32>,
    pub airshots: u32,
    pub sentries_built: u32,
    /// Headshot damage instances
    pub headshots: u32,
    pub headshot_kills: u32,
    pub backstabs: u32,
    pub healing: u64,
    pub healing_received: u64,
    pub captures: u32,
    pub drops: u32,
    pub current_kill_streak: u32,
    pub longest_kill_streak: u32,
}

impl PlayerStats {
    fn new(team: Team) -> Self {
        Self {
            team,
            kills: 0,
            assists: 0,
            deaths: 0,
            damage: 0,
            damage_taken: 0,
            suicides: 0,
            charges: 0,
            charges_by_type: BTreeMap::new(),
            airshots: 0,
            sentries_built: 0,
            headshots: 0,
            headshot_kills: 0,
            backstabs: 0,
            healing: 0,
            healing_received: 0,
            captures: 0,
            drops: 0,
            current_kill_streak: 0,
            longest_kill_streak: 0,
        }
    }

    /// Record a death, closing the running kill streak
    fn die(&mut self) {
        self.deaths += 1;
        self.longest_kill_streak = self.longest_kill_streak.max(self.current_kill_streak);
        self.current_kill_streak = 0;
    }
}

#[derive(Debug, Default)]
pub struct PlayerStatsModule {
    players: BTreeMap<PlayerId, PlayerStats>,
}

impl PlayerStatsModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats record for `player`, refreshing its team
    fn player(&mut self, player: &PlayerIdentity) -> &mut PlayerStats {
        let stats = self
            .players
            .entry(player.id.clone())
            .or_insert_with(|| PlayerStats::new(player.team));
        stats.team = player.team;
        stats
    }

    pub fn get(&self, id: &PlayerId) -> Option<&PlayerStats> {
        self.players.get(id)
    }

    pub fn report(&self) -> BTreeMap<String, PlayerStats> {
        self.players
            .iter()
            .map(|(id, stats)| (id.to_string(), stats.clone()))
            .collect()
    }
}

impl StatsModule for PlayerStatsModule {
    fn name(&self) -> &'static str {
        "players"
    }

    fn on_kill(&mut self, state: &MatchState, _at: Timestamp, event: &KillEvent) {
        if !state.is_live() {
            return;
        }
        let attacker = self.player(&event.attacker);
        attacker.kills += 1;
        attacker.current_kill_streak += 1;
        if event.headshot {
            attacker.headshot_kills += 1;
        }
        if event.backstab {
            attacker.backstabs += 1;
        }

        self.player(&event.victim).die();
    }

    fn on_damage(&mut self, state: &MatchState, _at: Timestamp, event: &DamageEvent) {
        if !state.is_live() {
            return;
        }
        let amount = u64::from(event.damage);
        let attacker = self.player(&event.attacker);
        attacker.damage += amount;
        if event.headshot {
            attacker.headshots += 1;
        }
        if event.airshot {
            attacker.airshots += 1;
        }

        if let Some(victim) = &event.victim {
            self.player(victim).damage_taken += amount;
        }
    }

    fn on_heal(&mut self, state: &MatchState, _at: Timestamp, event: &HealEvent) {
        if !state.is_live() {
            return;
        }
        let amount = u64::from(event.healing);
        self.player(&event.healer).healing += amount;
        self.player(&event.target).healing_received += amount;
    }

    fn on_assist(&mut self, state: &MatchState, _at: Timestamp, event: &AssistEvent) {
        if state.is_live() {
            self.player(&event.assister).assists += 1;
        }
    }

    fn on_suicide(&mut self, state: &MatchState, _at: Timestamp, event: &SuicideEvent) {
        if !state.is_live() {
            return;
        }
        let player = self.player(&event.player);
        player.deaths += 1;
        player.suicides += 1;
    }

    fn on_charge(&mut self, state: &MatchState, _at: Timestamp, event: &ChargeEvent) {
        if !state.is_live() {
            return;
        }
        let player = self.player(&event.player);
        player.charges += 1;
        *player
            .charges_by_type
            .entry(event.medigun.clone())
            .or_insert(0) += 1;
    }

    fn on_medic_death(&mut self, state: &MatchState, _at: Timestamp, event: &MedicDeathEvent) {
        if state.is_live() && event.is_drop {
            self.player(&event.victim).drops += 1;
        }
    }

    fn on_capture(&mut self, state: &MatchState, _at: Timestamp, event: &CaptureEvent) {
        if !state.is_live() {
            return;
        }
        for capper in &event.cappers {
            self.player(capper).captures += 1;
        }
    }

    fn on_build(&mut self, state: &MatchState, _at: Timestamp, event: &BuildEvent) {
        if state.is_live() && event.is_sentry() {
            self.player(&event.player).sentries_built += 1;
        }
    }

    fn on_join_team(&mut self, _state: &MatchState, _at: Timestamp, event: &JoinTeamEvent) {
        if let Some(stats) = self.players.get_mut(&event.player.id) {
            stats.team = event.new_team;
        }
    }
}
