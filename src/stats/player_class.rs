//! Per-player, per-class statistics with a weapon breakdown
//!
//! Each player carries a role tracker: the current role plus the start of
//! the open playtime interval, if any. Spawning or changing role closes the
//! open interval and opens a new one; round end, disconnect and moving to
//! spectator only close it. The role itself stays known after a close, so
//! later events keep being attributed to it.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, Role, Team, Timestamp};
use crate::events::{
    AssistEvent, DamageEvent, DisconnectEvent, HealEvent, JoinTeamEvent, KillEvent, RoleEvent,
    RoundEndEvent, ShotEvent,
};
use crate::stats::{MatchState, StatsModule};

/// Weapon bucket used for heals that name no weapon
const DEFAULT_HEAL_WEAPON: &str = "medigun";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponStats {
    pub kills: u32,
    pub damage: u64,
    pub shots: u32,
    pub hits: u32,
    pub healing: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStats {
    pub playtime_in_seconds: i64,
    pub kills: u32,
    pub assists: u32,
    pub deaths: u32,
    pub damage: u64,
    pub healing: u64,
    pub weapons: BTreeMap<String, WeaponStats>,
}

impl ClassStats {
    fn weapon(&mut self, weapon: &str) -> &mut WeaponStats {
        self.weapons.entry(weapon.to_string()).or_default()
    }
}

#[derive(Debug, Clone, Copy)]
struct RoleTracker {
    role: Role,
    since: Option<Timestamp>,
}

#[derive(Debug, Default)]
pub struct PlayerClassStatsModule {
    trackers: AHashMap<PlayerId, RoleTracker>,
    players: BTreeMap<PlayerId, BTreeMap<Role, ClassStats>>,
}

impl PlayerClassStatsModule {
    pub fn new() -> Self {
        Self::default()
    }

    fn class_stats(&mut self, player: &PlayerId, role: Role) -> &mut ClassStats {
        self.players
            .entry(player.clone())
            .or_default()
            .entry(role)
            .or_default()
    }

    /// Stats bucket for the player's currently tracked role
    fn current(&mut self, player: &PlayerId) -> Option<&mut ClassStats> {
        let role = self.trackers.get(player)?.role;
        Some(self.class_stats(player, role))
    }

    /// Close the player's open interval, crediting playtime to its role
    fn stop(&mut self, player: &PlayerId, at: Timestamp) {
        let Some(tracker) = self.trackers.get_mut(player) else {
            return;
        };
        let Some(since) = tracker.since.take() else {
            return;
        };
        let role = tracker.role;
        self.class_stats(player, role).playtime_in_seconds += (at - since).max(0);
    }

    fn start(&mut self, state: &MatchState, at: Timestamp, event: &RoleEvent) {
        if !state.is_live() {
            return;
        }
        self.stop(&event.player.id, at);
        self.trackers.insert(
            event.player.id.clone(),
            RoleTracker {
                role: event.role,
                since: Some(at),
            },
        );
    }

    pub fn get(&self, player: &PlayerId, role: Role) -> Option<&ClassStats> {
        self.players.get(player).and_then(|roles| roles.get(&role))
    }

    pub fn report(&self) -> BTreeMap<String, BTreeMap<String, ClassStats>> {
        self.players
            .iter()
            .map(|(player, roles)| {
                let row = roles
                    .iter()
                    .map(|(role, stats)| (role.to_string(), stats.clone()))
                    .collect();
                (player.to_string(), row)
            })
            .collect()
    }
}

impl StatsModule for PlayerClassStatsModule {
    fn name(&self) -> &'static str {
        "playerClasses"
    }

    fn on_spawn(&mut self, state: &MatchState, at: Timestamp, event: &RoleEvent) {
        self.start(state, at, event);
    }

    fn on_role_change(&mut self, state: &MatchState, at: Timestamp, event: &RoleEvent) {
        self.start(state, at, event);
    }

    fn on_round_end(&mut self, _state: &MatchState, at: Timestamp, _event: &RoundEndEvent) {
        let players: Vec<PlayerId> = self.trackers.keys().cloned().collect();
        for player in &players {
            self.stop(player, at);
        }
    }

    fn on_disconnect(&mut self, _state: &MatchState, at: Timestamp, event: &DisconnectEvent) {
        self.stop(&event.player.id, at);
    }

    fn on_join_team(&mut self, _state: &MatchState, at: Timestamp, event: &JoinTeamEvent) {
        if event.new_team == Team::Spectator {
            self.stop(&event.player.id, at);
        }
    }

    fn on_kill(&mut self, state: &MatchState, _at: Timestamp, event: &KillEvent) {
        if !state.is_live() {
            return;
        }
        if let Some(stats) = self.current(&event.attacker.id) {
            stats.kills += 1;
            stats.weapon(&event.weapon).kills += 1;
        }
        if let Some(stats) = self.current(&event.victim.id) {
            stats.deaths += 1;
        }
    }

    fn on_assist(&mut self, state: &MatchState, _at: Timestamp, event: &AssistEvent) {
        if !state.is_live() {
            return;
        }
        if let Some(stats) = self.current(&event.assister.id) {
            stats.assists += 1;
        }
    }

    fn on_damage(&mut self, state: &MatchState, _at: Timestamp, event: &DamageEvent) {
        if !state.is_live() {
            return;
        }
        let Some(stats) = self.current(&event.attacker.id) else {
            return;
        };
        let amount = u64::from(event.damage);
        stats.damage += amount;
        if let Some(weapon) = &event.weapon {
            stats.weapon(weapon).damage += amount;
        }
    }

    fn on_heal(&mut self, state: &MatchState, _at: Timestamp, event: &HealEvent) {
        if !state.is_live() {
            return;
        }
        let Some(stats) = self.current(&event.healer.id) else {
            return;
        };
        let amount = u64::from(event.healing);
        stats.healing += amount;
        let weapon = event.weapon.as_deref().unwrap_or(DEFAULT_HEAL_WEAPON);
        stats.weapon(weapon).healing += amount;
    }

    fn on_shot(&mut self, state: &MatchState, _at: Timestamp, event: &ShotEvent) {
        if !state.is_live() {
            return;
        }
        if let Some(stats) = self.current(&event.player.id) {
            stats.weapon(&event.weapon).shots += 1;
        }
    }

    fn on_shot_hit(&mut self, state: &MatchState, _at: Timestamp, event: &ShotEvent) {
        if !state.is_live() {
            return;
        }
        if let Some(stats) = self.current(&event.player.id) {
            stats.weapon(&event.weapon).hits += 1;
        }
    }
}
