//! Per-team statistics
//!
//! Player contributions are kept per player and folded into team totals at
//! finish, using each player's last known team. A player who switched sides
//! counts entirely for the team they ended on.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, PlayerIdentity, Team, Timestamp};
use crate::events::{
    CaptureEvent, ChargeEvent, DamageEvent, JoinTeamEvent, KillEvent, MedicDeathEvent,
};
use crate::stats::{MatchState, StatsModule};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub kills: u32,
    pub damage: u64,
    pub charges: u32,
    pub drops: u32,
    pub captures: u32,
    pub midfights: u32,
}

#[derive(Debug, Clone)]
struct Contribution {
    team: Team,
    kills: u32,
    damage: u64,
    charges: u32,
    drops: u32,
}

#[derive(Debug)]
pub struct TeamStatsModule {
    players: AHashMap<PlayerId, Contribution>,
    red: TeamStats,
    blue: TeamStats,
    first_cap_pending: bool,
}

impl Default for TeamStatsModule {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamStatsModule {
    pub fn new() -> Self {
        Self {
            players: AHashMap::new(),
            red: TeamStats::default(),
            blue: TeamStats::default(),
            first_cap_pending: true,
        }
    }

    fn player(&mut self, player: &PlayerIdentity) -> &mut Contribution {
        let entry = self
            .players
            .entry(player.id.clone())
            .or_insert_with(|| Contribution {
                team: player.team,
                kills: 0,
                damage: 0,
                charges: 0,
                drops: 0,
            });
        entry.team = player.team;
        entry
    }

    fn team_mut(&mut self, team: Team) -> Option<&mut TeamStats> {
        match team {
            Team::Red => Some(&mut self.red),
            Team::Blue => Some(&mut self.blue),
            Team::Spectator | Team::Console => None,
        }
    }

    pub fn get(&self, team: Team) -> Option<&TeamStats> {
        match team {
            Team::Red => Some(&self.red),
            Team::Blue => Some(&self.blue),
            Team::Spectator | Team::Console => None,
        }
    }

    pub fn report(&self) -> BTreeMap<String, TeamStats> {
        BTreeMap::from([
            (Team::Red.to_string(), self.red.clone()),
            (Team::Blue.to_string(), self.blue.clone()),
        ])
    }
}

impl StatsModule for TeamStatsModule {
    fn name(&self) -> &'static str {
        "teams"
    }

    fn on_kill(&mut self, state: &MatchState, _at: Timestamp, event: &KillEvent) {
        if state.is_live() {
            self.player(&event.attacker).kills += 1;
        }
    }

    fn on_damage(&mut self, state: &MatchState, _at: Timestamp, event: &DamageEvent) {
        if state.is_live() {
            self.player(&event.attacker).damage += u64::from(event.damage);
        }
    }

    fn on_charge(&mut self, state: &MatchState, _at: Timestamp, event: &ChargeEvent) {
        if state.is_live() {
            self.player(&event.player).charges += 1;
        }
    }

    fn on_medic_death(&mut self, state: &MatchState, _at: Timestamp, event: &MedicDeathEvent) {
        if state.is_live() && event.is_drop {
            self.player(&event.victim).drops += 1;
        }
    }

    fn on_round_start(&mut self, _state: &MatchState, _at: Timestamp) {
        self.first_cap_pending = true;
    }

    fn on_capture(&mut self, state: &MatchState, _at: Timestamp, event: &CaptureEvent) {
        if !state.is_live() {
            return;
        }
        let Some(team) = event.team else {
            return;
        };
        let midfight = std::mem::replace(&mut self.first_cap_pending, false);
        if let Some(stats) = self.team_mut(team) {
            stats.captures += 1;
            if midfight {
                stats.midfights += 1;
            }
        }
    }

    fn on_join_team(&mut self, _state: &MatchState, _at: Timestamp, event: &JoinTeamEvent) {
        if let Some(entry) = self.players.get_mut(&event.player.id) {
            entry.team = event.new_team;
        }
    }

    fn finish(&mut self) {
        for c in self.players.values() {
            let stats = match c.team {
                Team::Red => &mut self.red,
                Team::Blue => &mut self.blue,
                Team::Spectator | Team::Console => continue,
            };
            stats.kills += c.kills;
            stats.damage += c.damage;
            stats.charges += c.charges;
            stats.drops += c.drops;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::stats::testing::{
        at, blue, capture, charge, damage, kill, live_state, medic_death, red,
    };

    #[test]
    fn test_switcher_counts_for_final_team() {
        let a = red("a");
        let b = blue("b");
        let mut a_blue = a.clone();
        a_blue.team = Team::Blue;

        let state = live_state();
        let mut module = TeamStatsModule::new();
        module.handle(&state, &at(1, kill(&a, &b)));
        module.handle(&state, &at(2, damage(&a, &b, 100)));
        module.handle(
            &state,
            &at(
                3,
                EventKind::JoinTeam(JoinTeamEvent {
                    player: a.clone(),
                    new_team: Team::Blue,
                }),
            ),
        );
        module.handle(&state, &at(4, kill(&a_blue, &b)));
        module.finish();

        assert_eq!(module.get(Team::Red).unwrap().kills, 0);
        assert_eq!(module.get(Team::Blue).unwrap().kills, 2);
        assert_eq!(module.get(Team::Blue).unwrap().damage, 100);
    }

    #[test]
    fn test_midfight_is_first_capture_of_round() {
        let a = red("a");
        let b = blue("b");
        let state = live_state();
        let mut module = TeamStatsModule::new();

        module.handle(&state, &at(0, EventKind::RoundStart));
        module.handle(&state, &at(30, capture(Team::Blue, &[&b])));
        module.handle(&state, &at(60, capture(Team::Red, &[&a])));
        module.handle(&state, &at(100, EventKind::RoundStart));
        module.handle(&state, &at(130, capture(Team::Red, &[&a])));
        module.finish();

        let red_stats = module.get(Team::Red).unwrap();
        let blue_stats = module.get(Team::Blue).unwrap();
        assert_eq!(red_stats.captures, 2);
        assert_eq!(red_stats.midfights, 1);
        assert_eq!(blue_stats.captures, 1);
        assert_eq!(blue_stats.midfights, 1);
    }

    #[test]
    fn test_report_has_both_teams() {
        let medic = red("medic");
        let mut module = TeamStatsModule::new();
        module.handle(&live_state(), &at(0, charge(&medic)));
        module.finish();

        let report = module.report();
        assert_eq!(report.len(), 2);
        assert_eq!(report["Red"].charges, 1);
        assert_eq!(report["Blue"], TeamStats::default());
    }

    #[test]
    fn test_drops_credited_to_medic_team() {
        let (medic, b) = (red("medic"), blue("b"));
        let mut module = TeamStatsModule::new();
        module.handle(&live_state(), &at(0, medic_death(&b, &medic, true)));
        module.handle(&live_state(), &at(1, medic_death(&b, &medic, false)));
        module.finish();

        assert_eq!(module.get(Team::Red).unwrap().drops, 1);
        assert_eq!(module.get(Team::Blue).unwrap().drops, 0);
    }
}
