//! Damage dealt close in time to a notable event
//!
//! Damage and notable-event timestamps (kills, captures, charges) are
//! collected while live; attribution runs once at finish because a damage
//! instance may precede the event that makes it count.

use std::collections::BTreeMap;

use crate::core::types::{PlayerId, Timestamp};
use crate::events::{CaptureEvent, ChargeEvent, DamageEvent, KillEvent};
use crate::stats::{MatchState, StatsModule};

#[derive(Debug, Clone)]
struct DamageEntry {
    attacker: PlayerId,
    at: Timestamp,
    amount: u64,
}

#[derive(Debug)]
pub struct RealDamageModule {
    window_secs: i64,
    damage: Vec<DamageEntry>,
    notable: Vec<Timestamp>,
    totals: BTreeMap<PlayerId, u64>,
}

impl RealDamageModule {
    /// `window_secs` is the inclusive half-width around each notable event
    pub fn new(window_secs: i64) -> Self {
        Self {
            window_secs,
            damage: Vec::new(),
            notable: Vec::new(),
            totals: BTreeMap::new(),
        }
    }

    fn near_notable(&self, at: Timestamp) -> bool {
        self.notable
            .iter()
            .any(|&notable| (notable - at).abs() <= self.window_secs)
    }

    fn mark_notable(&mut self, state: &MatchState, at: Timestamp) {
        if state.is_live() {
            self.notable.push(at);
        }
    }

    pub fn get(&self, id: &PlayerId) -> Option<u64> {
        self.totals.get(id).copied()
    }

    pub fn report(&self) -> BTreeMap<String, u64> {
        self.totals
            .iter()
            .map(|(id, total)| (id.to_string(), *total))
            .collect()
    }
}

impl StatsModule for RealDamageModule {
    fn name(&self) -> &'static str {
        "realDamage"
    }

    fn on_kill(&mut self, state: &MatchState, at: Timestamp, _event: &KillEvent) {
        self.mark_notable(state, at);
    }

    fn on_capture(&mut self, state: &MatchState, at: Timestamp, _event: &CaptureEvent) {
        self.mark_notable(state, at);
    }

    fn on_charge(&mut self, state: &MatchState, at: Timestamp, _event: &ChargeEvent) {
        self.mark_notable(state, at);
    }

    fn on_damage(&mut self, state: &MatchState, at: Timestamp, event: &DamageEvent) {
        if !state.is_live() {
            return;
        }
        self.totals.entry(event.attacker.id.clone()).or_insert(0);
        self.damage.push(DamageEntry {
            attacker: event.attacker.id.clone(),
            at,
            amount: u64::from(event.damage),
        });
    }

    fn finish(&mut self) {
        let credited: Vec<(PlayerId, u64)> = self
            .damage
            .iter()
            .filter(|entry| self.near_notable(entry.at))
            .map(|entry| (entry.attacker.clone(), entry.amount))
            .collect();

        tracing::debug!(
            "Real damage: {} of {} damage instances near a notable event",
            credited.len(),
            self.damage.len()
        );

        for (attacker, amount) in credited {
            *self.totals.entry(attacker).or_insert(0) += amount;
        }
    }
}
