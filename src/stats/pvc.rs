//! Player-versus-class matrix, keyed player then opponent role

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, Role, Timestamp};
use crate::events::{AssistEvent, DamageEvent, KillEvent, RoleEvent};
use crate::stats::{MatchState, StatsModule};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PvcStats {
    pub kills: u32,
    pub assists: u32,
    pub deaths: u32,
    pub damage: u64,
    pub damage_taken: u64,
}

#[derive(Debug, Default)]
pub struct PvcModule {
    roles: AHashMap<PlayerId, Role>,
    players: BTreeMap<PlayerId, BTreeMap<Role, PvcStats>>,
}

impl PvcModule {
    pub fn new() -> Self {
        Self::default()
    }

    fn stats(&mut self, player: &PlayerId, opponent: Role) -> &mut PvcStats {
        self.players
            .entry(player.clone())
            .or_default()
            .entry(opponent)
            .or_default()
    }

    /// Current roles of both players, if both are known
    fn roles_of(&self, a: &PlayerId, b: &PlayerId) -> Option<(Role, Role)> {
        Some((*self.roles.get(a)?, *self.roles.get(b)?))
    }

    fn track(&mut self, event: &RoleEvent) {
        self.roles.insert(event.player.id.clone(), event.role);
    }

    pub fn get(&self, player: &PlayerId, opponent: Role) -> Option<&PvcStats> {
        self.players.get(player).and_then(|roles| roles.get(&opponent))
    }

    pub fn report(&self) -> BTreeMap<String, BTreeMap<String, PvcStats>> {
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

impl StatsModule for PvcModule {
    fn name(&self) -> &'static str {
        "PvC"
    }

    fn on_spawn(&mut self, _state: &MatchState, _at: Timestamp, event: &RoleEvent) {
        self.track(event);
    }

    fn on_role_change(&mut self, _state: &MatchState, _at: Timestamp, event: &RoleEvent) {
        self.track(event);
    }

    fn on_kill(&mut self, state: &MatchState, _at: Timestamp, event: &KillEvent) {
        if !state.is_live() {
            return;
        }
        let (attacker, victim) = (&event.attacker.id, &event.victim.id);
        let Some((attacker_role, victim_role)) = self.roles_of(attacker, victim) else {
            return;
        };
        self.stats(attacker, victim_role).kills += 1;
        self.stats(victim, attacker_role).deaths += 1;
    }

    fn on_assist(&mut self, state: &MatchState, _at: Timestamp, event: &AssistEvent) {
        if !state.is_live() {
            return;
        }
        let (assister, victim) = (&event.assister.id, &event.victim.id);
        if let Some((_, victim_role)) = self.roles_of(assister, victim) {
            self.stats(assister, victim_role).assists += 1;
        }
    }

    fn on_damage(&mut self, state: &MatchState, _at: Timestamp, event: &DamageEvent) {
        if !state.is_live() {
            return;
        }
        let Some(victim) = &event.victim else {
            return;
        };
        let attacker = &event.attacker.id;
        let Some((attacker_role, victim_role)) = self.roles_of(attacker, &victim.id) else {
            return;
        };
        let amount = u64::from(event.damage);
        self.stats(attacker, victim_role).damage += amount;
        self.stats(&victim.id, attacker_role).damage_taken += amount;
    }
}
