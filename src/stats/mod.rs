//! Aggregator modules
//!
//! Every aggregator implements [`StatsModule`]: one hook per event kind, all
//! defaulting to no-ops, and a provided [`StatsModule::handle`] that routes a
//! [`DomainEvent`] to its hook with an exhaustive match. Hooks receive the
//! shared [`MatchState`] read-only; only [`GameStateTracker`] can change it.

pub mod chat;
pub mod game_state;
pub mod player;
pub mod player_class;
pub mod pvc;
pub mod pvp;
pub mod real_damage;
pub mod team;

pub use chat::ChatModule;
pub use game_state::{GameStateTracker, MatchState};
pub use player::PlayerStatsModule;
pub use player_class::PlayerClassStatsModule;
pub use pvc::PvcModule;
pub use pvp::PvpModule;
pub use real_damage::RealDamageModule;
pub use team::TeamStatsModule;

use crate::core::types::Timestamp;
use crate::events::{
    AssistEvent, BuildEvent, CaptureEvent, ChargeEvent, ChatEvent, DamageEvent, DisconnectEvent,
    DomainEvent, EventKind, FlagEvent, GameOverEvent, HealEvent, JoinTeamEvent, KillEvent,
    MapLoadEvent, MedicDeathEvent, PickupEvent, RoleEvent, RoundEndEvent, ScoreEvent, ShotEvent,
    SuicideEvent,
};

/// An aggregator fed every dispatched event in registration order
#[allow(unused_variables)]
pub trait StatsModule {
    /// Key of this module's section in the match report
    fn name(&self) -> &'static str;

    fn on_kill(&mut self, state: &MatchState, at: Timestamp, event: &KillEvent) {}
    fn on_damage(&mut self, state: &MatchState, at: Timestamp, event: &DamageEvent) {}
    fn on_heal(&mut self, state: &MatchState, at: Timestamp, event: &HealEvent) {}
    fn on_shot(&mut self, state: &MatchState, at: Timestamp, event: &ShotEvent) {}
    fn on_shot_hit(&mut self, state: &MatchState, at: Timestamp, event: &ShotEvent) {}
    fn on_assist(&mut self, state: &MatchState, at: Timestamp, event: &AssistEvent) {}
    fn on_pickup(&mut self, state: &MatchState, at: Timestamp, event: &PickupEvent) {}
    fn on_suicide(&mut self, state: &MatchState, at: Timestamp, event: &SuicideEvent) {}
    fn on_spawn(&mut self, state: &MatchState, at: Timestamp, event: &RoleEvent) {}
    fn on_role_change(&mut self, state: &MatchState, at: Timestamp, event: &RoleEvent) {}
    fn on_capture(&mut self, state: &MatchState, at: Timestamp, event: &CaptureEvent) {}
    fn on_medic_death(&mut self, state: &MatchState, at: Timestamp, event: &MedicDeathEvent) {}
    fn on_round_start(&mut self, state: &MatchState, at: Timestamp) {}
    fn on_round_end(&mut self, state: &MatchState, at: Timestamp, event: &RoundEndEvent) {}
    fn on_score(&mut self, state: &MatchState, at: Timestamp, event: &ScoreEvent) {}
    fn on_game_over(&mut self, state: &MatchState, at: Timestamp, event: &GameOverEvent) {}
    fn on_join_team(&mut self, state: &MatchState, at: Timestamp, event: &JoinTeamEvent) {}
    fn on_disconnect(&mut self, state: &MatchState, at: Timestamp, event: &DisconnectEvent) {}
    fn on_charge(&mut self, state: &MatchState, at: Timestamp, event: &ChargeEvent) {}
    fn on_chat(&mut self, state: &MatchState, at: Timestamp, event: &ChatEvent) {}
    fn on_pause(&mut self, state: &MatchState, at: Timestamp) {}
    fn on_unpause(&mut self, state: &MatchState, at: Timestamp) {}
    fn on_map_load(&mut self, state: &MatchState, at: Timestamp, event: &MapLoadEvent) {}
    fn on_build(&mut self, state: &MatchState, at: Timestamp, event: &BuildEvent) {}
    fn on_flag(&mut self, state: &MatchState, at: Timestamp, event: &FlagEvent) {}

    /// Closing computation once all lines are consumed
    fn finish(&mut self) {}

    fn handle(&mut self, state: &MatchState, event: &DomainEvent) {
        let at = event.timestamp;
        match &event.kind {
            EventKind::Kill(e) => self.on_kill(state, at, e),
            EventKind::Damage(e) => self.on_damage(state, at, e),
            EventKind::Heal(e) => self.on_heal(state, at, e),
            EventKind::Shot(e) => self.on_shot(state, at, e),
            EventKind::ShotHit(e) => self.on_shot_hit(state, at, e),
            EventKind::Assist(e) => self.on_assist(state, at, e),
            EventKind::Pickup(e) => self.on_pickup(state, at, e),
            EventKind::Suicide(e) => self.on_suicide(state, at, e),
            EventKind::Spawn(e) => self.on_spawn(state, at, e),
            EventKind::RoleChange(e) => self.on_role_change(state, at, e),
            EventKind::Capture(e) => self.on_capture(state, at, e),
            EventKind::MedicDeath(e) => self.on_medic_death(state, at, e),
            EventKind::RoundStart => self.on_round_start(state, at),
            EventKind::RoundEnd(e) => self.on_round_end(state, at, e),
            EventKind::Score(e) => self.on_score(state, at, e),
            EventKind::GameOver(e) => self.on_game_over(state, at, e),
            EventKind::JoinTeam(e) => self.on_join_team(state, at, e),
            EventKind::Disconnect(e) => self.on_disconnect(state, at, e),
            EventKind::Charge(e) => self.on_charge(state, at, e),
            EventKind::Chat(e) => self.on_chat(state, at, e),
            EventKind::Pause => self.on_pause(state, at),
            EventKind::Unpause => self.on_unpause(state, at),
            EventKind::MapLoad(e) => self.on_map_load(state, at, e),
            EventKind::Build(e) => self.on_build(state, at, e),
            EventKind::Flag(e) => self.on_flag(state, at, e),
        }
    }
}
