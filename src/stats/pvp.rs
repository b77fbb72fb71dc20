//! Player-versus-player matrix, keyed attacker then victim

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, Timestamp};
use crate::events::{AssistEvent, DamageEvent, HealEvent, KillEvent};
use crate::stats::{MatchState, StatsModule};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PvpStats {
    pub kills: u32,
    pub assists: u32,
    pub damage: u64,
    pub airshots: u32,
    pub headshots: u32,
    pub headshot_kills: u32,
    pub healing: u64,
    pub backstabs: u32,
}

#[derive(Debug, Default)]
pub struct PvpModule {
    pairs: BTreeMap<PlayerId, BTreeMap<PlayerId, PvpStats>>,
}

impl PvpModule {
    pub fn new() -> Self {
        Self::default()
    }

    fn pair(&mut self, player: &PlayerId, target: &PlayerId) -> &mut PvpStats {
        self.pairs
            .entry(player.clone())
            .or_default()
            .entry(target.clone())
            .or_default()
    }

    pub fn get(&self, player: &PlayerId, target: &PlayerId) -> Option<&PvpStats> {
        self.pairs.get(player).and_then(|targets| targets.get(target))
    }

    pub fn report(&self) -> BTreeMap<String, BTreeMap<String, PvpStats>> {
        self.pairs
            .iter()
            .map(|(player, targets)| {
                let row = targets
                    .iter()
                    .map(|(target, stats)| (target.to_string(), stats.clone()))
                    .collect();
                (player.to_string(), row)
            })
            .collect()
    }
}

impl StatsModule for PvpModule {
    fn name(&self) -> &'static str {
        "PvP"
    }

    fn on_kill(&mut self, state: &MatchState, _at: Timestamp, event: &KillEvent) {
        if !state.is_live() {
            return;
        }
        let stats = self.pair(&event.attacker.id, &event.victim.id);
        stats.kills += 1;
        if event.headshot {
            stats.headshot_kills += 1;
        }
        if event.backstab {
            stats.backstabs += 1;
        }
    }

    fn on_assist(&mut self, state: &MatchState, _at: Timestamp, event: &AssistEvent) {
        if state.is_live() {
            self.pair(&event.assister.id, &event.victim.id).assists += 1;
        }
    }

    fn on_damage(&mut self, state: &MatchState, _at: Timestamp, event: &DamageEvent) {
        if !state.is_live() {
            return;
        }
        let Some(victim) = &event.victim else {
            return;
        };
        let stats = self.pair(&event.attacker.id, &victim.id);
        stats.damage += u64::from(event.damage);
        if event.airshot {
            stats.airshots += 1;
        }
        if event.headshot {
            stats.headshots += 1;
        }
    }

    fn on_heal(&mut self, state: &MatchState, _at: Timestamp, event: &HealEvent) {
        if state.is_live() {
            self.pair(&event.healer.id, &event.target.id).healing += u64::from(event.healing);
        }
    }
}
