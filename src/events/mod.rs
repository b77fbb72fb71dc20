//! Domain events produced from log lines
//!
//! Events are pure data: a timestamp plus one payload from a closed set of
//! kinds. Aggregators react to them; nothing here mutates state.

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerIdentity, Role, Team, Timestamp};

/// A single event extracted from one log line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub timestamp: Timestamp,
    pub kind: EventKind,
}

impl DomainEvent {
    pub fn new(timestamp: Timestamp, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }

    /// Every player identity carried by the event, in field order
    pub fn players(&self) -> Vec<&PlayerIdentity> {
        match &self.kind {
            EventKind::Kill(e) => vec![&e.attacker, &e.victim],
            EventKind::Damage(e) => std::iter::once(&e.attacker).chain(e.victim.as_ref()).collect(),
            EventKind::Heal(e) => vec![&e.healer, &e.target],
            EventKind::Shot(e) | EventKind::ShotHit(e) => vec![&e.player],
            EventKind::Assist(e) => vec![&e.assister, &e.victim],
            EventKind::Pickup(e) => e.player.iter().collect(),
            EventKind::Suicide(e) => vec![&e.player],
            EventKind::Spawn(e) | EventKind::RoleChange(e) => vec![&e.player],
            EventKind::Capture(e) => e.cappers.iter().collect(),
            EventKind::MedicDeath(e) => vec![&e.attacker, &e.victim],
            EventKind::JoinTeam(e) => vec![&e.player],
            EventKind::Disconnect(e) => vec![&e.player],
            EventKind::Charge(e) => vec![&e.player],
            EventKind::Chat(e) => vec![&e.player],
            EventKind::Build(e) => vec![&e.player],
            EventKind::Flag(e) => vec![&e.player],
            EventKind::RoundStart
            | EventKind::RoundEnd(_)
            | EventKind::Score(_)
            | EventKind::GameOver(_)
            | EventKind::Pause
            | EventKind::Unpause
            | EventKind::MapLoad(_) => Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    Kill(KillEvent),
    Damage(DamageEvent),
    Heal(HealEvent),
    Shot(ShotEvent),
    ShotHit(ShotEvent),
    Assist(AssistEvent),
    Pickup(PickupEvent),
    Suicide(SuicideEvent),
    Spawn(RoleEvent),
    RoleChange(RoleEvent),
    Capture(CaptureEvent),
    MedicDeath(MedicDeathEvent),
    RoundStart,
    RoundEnd(RoundEndEvent),
    Score(ScoreEvent),
    GameOver(GameOverEvent),
    JoinTeam(JoinTeamEvent),
    Disconnect(DisconnectEvent),
    Charge(ChargeEvent),
    Chat(ChatEvent),
    Pause,
    Unpause,
    MapLoad(MapLoadEvent),
    Build(BuildEvent),
    Flag(FlagEvent),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KillEvent {
    pub attacker: PlayerIdentity,
    pub victim: PlayerIdentity,
    pub weapon: String,
    pub headshot: bool,
    pub backstab: bool,
}

/// Damage dealt; the victim is absent when the log used the attacker-only form
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub attacker: PlayerIdentity,
    pub victim: Option<PlayerIdentity>,
    pub damage: u32,
    pub weapon: Option<String>,
    pub headshot: bool,
    pub airshot: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealEvent {
    pub healer: PlayerIdentity,
    pub target: PlayerIdentity,
    pub healing: u32,
    pub weapon: Option<String>,
}

/// Shared by `shot_fired` and `shot_hit`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShotEvent {
    pub player: PlayerIdentity,
    pub weapon: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssistEvent {
    pub assister: PlayerIdentity,
    pub victim: PlayerIdentity,
    pub attacker_position: Option<String>,
    pub assister_position: Option<String>,
    pub victim_position: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickupEvent {
    pub player: Option<PlayerIdentity>,
    pub item: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuicideEvent {
    pub player: PlayerIdentity,
}

/// Shared by `spawned as` and `changed role to`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleEvent {
    pub player: PlayerIdentity,
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureEvent {
    pub team: Option<Team>,
    /// One-based control point number; 0 when the line carried no `cp`
    pub point_id: u32,
    pub point_name: String,
    pub num_cappers: u32,
    pub cappers: Vec<PlayerIdentity>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MedicDeathEvent {
    pub attacker: PlayerIdentity,
    pub victim: PlayerIdentity,
    /// Medic died holding a full charge
    pub is_drop: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEndKind {
    Win,
    Stalemate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundEndEvent {
    pub kind: RoundEndKind,
    pub winner: Option<Team>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub team: Team,
    pub score: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameOverEvent {
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JoinTeamEvent {
    pub player: PlayerIdentity,
    pub new_team: Team,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisconnectEvent {
    pub player: PlayerIdentity,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargeEvent {
    pub player: PlayerIdentity,
    pub medigun: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatEvent {
    pub player: PlayerIdentity,
    pub message: String,
    pub team_only: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapLoadEvent {
    pub map_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildEvent {
    pub player: PlayerIdentity,
    pub object: String,
    pub position: Option<String>,
}

impl BuildEvent {
    pub fn is_sentry(&self) -> bool {
        self.object.eq_ignore_ascii_case("OBJ_SENTRYGUN")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlagEvent {
    pub player: PlayerIdentity,
    pub kind: Option<String>,
    pub position: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str) -> PlayerIdentity {
        PlayerIdentity::new(id, id, Team::Red)
    }

    #[test]
    fn test_players_lists_damage_victim_only_when_present() {
        let with_victim = DomainEvent::new(
            0,
            EventKind::Damage(DamageEvent {
                attacker: player("a"),
                victim: Some(player("b")),
                damage: 10,
                weapon: None,
                headshot: false,
                airshot: false,
            }),
        );
        let ids: Vec<_> = with_victim.players().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let attacker_only = DomainEvent::new(
            0,
            EventKind::Damage(DamageEvent {
                attacker: player("a"),
                victim: None,
                damage: 10,
                weapon: None,
                headshot: false,
                airshot: false,
            }),
        );
        assert_eq!(attacker_only.players().len(), 1);
    }

    #[test]
    fn test_world_events_carry_no_players() {
        assert!(DomainEvent::new(0, EventKind::RoundStart).players().is_empty());
        assert!(DomainEvent::new(0, EventKind::Pause).players().is_empty());
    }
}
