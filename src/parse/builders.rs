//! Event builders
//!
//! A builder turns a matched line into an event kind, or rejects it. A
//! rejection (`None`) is not an error: the line is simply not counted.

use crate::core::types::{PlayerIdentity, Role, Team};
use crate::events::{
    AssistEvent, BuildEvent, CaptureEvent, ChargeEvent, ChatEvent, DamageEvent, DisconnectEvent,
    EventKind, FlagEvent, GameOverEvent, HealEvent, JoinTeamEvent, KillEvent, MapLoadEvent,
    MedicDeathEvent, PickupEvent, RoleEvent, RoundEndEvent, RoundEndKind, ScoreEvent, ShotEvent,
    SuicideEvent,
};
use crate::parse::catalogue::BuildContext;
use crate::parse::patterns::Captures;
use crate::parse::player::parse_player;

const DEFAULT_MEDIGUN: &str = "medigun";

pub fn damage(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    let attacker = caps.player("attacker")?;
    let props = ctx.properties;

    Some(EventKind::Damage(DamageEvent {
        attacker,
        victim: caps.player("victim"),
        damage: props.parse("damage").unwrap_or(0),
        weapon: props.get("weapon").map(str::to_string),
        headshot: props.parse::<i64>("headshot").is_some_and(|v| v != 0),
        airshot: props.flag("airshot"),
    }))
}

pub fn heal(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    let healer = caps.player("player")?;
    let target = caps.player("target")?;
    let healing = ctx.properties.parse::<u32>("healing").unwrap_or(0);

    if !ctx.config.accepts_heal(healing) {
        return None;
    }

    Some(EventKind::Heal(HealEvent {
        healer,
        target,
        healing,
        weapon: ctx.properties.get("weapon").map(str::to_string),
    }))
}

fn shot_event(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<ShotEvent> {
    Some(ShotEvent {
        player: caps.player("player")?,
        weapon: ctx.properties.get("weapon")?.to_string(),
    })
}

pub fn shot(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    shot_event(caps, ctx).map(EventKind::Shot)
}

pub fn shot_hit(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    shot_event(caps, ctx).map(EventKind::ShotHit)
}

pub fn kill(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    let attacker = caps.player("attacker")?;
    let victim = caps.player("victim")?;
    let props = ctx.properties;
    let custom = props.get("customkill");

    Some(EventKind::Kill(KillEvent {
        attacker,
        victim,
        weapon: caps.get("weapon")?.to_string(),
        headshot: props.flag("headshot") || custom == Some("headshot"),
        backstab: custom == Some("backstab"),
    }))
}

pub fn assist(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    let assister = caps.player("player")?;
    let victim = caps.player("victim")?;
    let position = |key: &str| ctx.properties.get(key).map(str::to_string);

    Some(EventKind::Assist(AssistEvent {
        assister,
        victim,
        attacker_position: position("attacker_position"),
        assister_position: position("assister_position"),
        victim_position: position("victim_position"),
    }))
}

pub fn pickup(caps: &Captures<'_>, _ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::Pickup(PickupEvent {
        player: caps.player("player"),
        item: caps.get("item")?.to_string(),
    }))
}

pub fn suicide(caps: &Captures<'_>, _ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::Suicide(SuicideEvent {
        player: caps.player("player")?,
    }))
}

fn role_event(caps: &Captures<'_>) -> Option<RoleEvent> {
    Some(RoleEvent {
        player: caps.player("player")?,
        role: caps.get("role")?.parse::<Role>().ok()?,
    })
}

pub fn spawn(caps: &Captures<'_>, _ctx: &BuildContext<'_>) -> Option<EventKind> {
    role_event(caps).map(EventKind::Spawn)
}

pub fn role_change(caps: &Captures<'_>, _ctx: &BuildContext<'_>) -> Option<EventKind> {
    role_event(caps).map(EventKind::RoleChange)
}

/// Cappers are listed as `(player1 "…") (player2 "…")`; unparsable entries are skipped
fn cappers(ctx: &BuildContext<'_>, num_cappers: u32) -> Vec<PlayerIdentity> {
    (1..=num_cappers)
        .filter_map(|i| ctx.properties.get(&format!("player{i}")))
        .filter_map(parse_player)
        .collect()
}

pub fn capture(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    let props = ctx.properties;
    let cp = props.parse::<i64>("cp").unwrap_or(-1);
    let num_cappers = props.parse::<u32>("numcappers").unwrap_or(0);

    Some(EventKind::Capture(CaptureEvent {
        team: caps.get("team").and_then(|t| t.parse::<Team>().ok()),
        point_id: u32::try_from(cp + 1).unwrap_or(0),
        point_name: props.get("cpname").unwrap_or_default().to_string(),
        num_cappers,
        cappers: cappers(ctx, num_cappers),
    }))
}

pub fn medic_death(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::MedicDeath(MedicDeathEvent {
        attacker: caps.player("attacker")?,
        victim: caps.player("victim")?,
        is_drop: ctx.properties.flag("ubercharge"),
    }))
}

pub fn round_start(_caps: &Captures<'_>, _ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::RoundStart)
}

pub fn round_end(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    let kind = match caps.get("type")? {
        "Win" => RoundEndKind::Win,
        _ => RoundEndKind::Stalemate,
    };

    Some(EventKind::RoundEnd(RoundEndEvent {
        kind,
        winner: ctx
            .properties
            .get("winner")
            .and_then(|w| w.parse::<Team>().ok()),
    }))
}

pub fn game_over(caps: &Captures<'_>, _ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::GameOver(GameOverEvent {
        reason: caps.get("reason").map(str::to_string),
    }))
}

pub fn join_team(caps: &Captures<'_>, _ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::JoinTeam(JoinTeamEvent {
        player: caps.player("player")?,
        new_team: caps.get("newteam")?.parse::<Team>().ok()?,
    }))
}

pub fn disconnect(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::Disconnect(DisconnectEvent {
        player: caps.player("player")?,
        reason: ctx.properties.get("reason").map(str::to_string),
    }))
}

pub fn charge(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::Charge(ChargeEvent {
        player: caps.player("player")?,
        medigun: ctx
            .properties
            .get("medigun")
            .unwrap_or(DEFAULT_MEDIGUN)
            .to_string(),
    }))
}

fn chat_event(caps: &Captures<'_>, ctx: &BuildContext<'_>, team_only: bool) -> Option<EventKind> {
    let player = caps.player("player")?;
    let message = caps.get("message")?;

    if message.chars().count() > ctx.config.chat_max_len {
        return None;
    }

    Some(EventKind::Chat(ChatEvent {
        player,
        message: message.to_string(),
        team_only,
    }))
}

pub fn chat(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    chat_event(caps, ctx, false)
}

pub fn team_chat(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    chat_event(caps, ctx, true)
}

pub fn build(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::Build(BuildEvent {
        player: caps.player("player")?,
        object: ctx.properties.get("object")?.to_string(),
        position: ctx.properties.get("position").map(str::to_string),
    }))
}

pub fn flag(caps: &Captures<'_>, ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::Flag(FlagEvent {
        player: caps.player("player")?,
        kind: ctx.properties.get("event").map(str::to_string),
        position: ctx.properties.get("position").map(str::to_string),
    }))
}

pub fn score(caps: &Captures<'_>, _ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::Score(ScoreEvent {
        team: caps.get("team")?.parse::<Team>().ok()?,
        score: caps.get("score")?.parse().ok()?,
    }))
}

pub fn pause(_caps: &Captures<'_>, _ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::Pause)
}

pub fn unpause(_caps: &Captures<'_>, _ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::Unpause)
}

pub fn map_load(caps: &Captures<'_>, _ctx: &BuildContext<'_>) -> Option<EventKind> {
    Some(EventKind::MapLoad(MapLoadEvent {
        map_name: caps.get("mapname")?.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ParserConfig;
    use crate::parse::properties::extract_properties;

    const RED: &str = "arekk<78><[U:1:93699014]><Red>";
    const BLU: &str = "b4nny<77><[U:1:10403381]><Blue>";

    fn build_with(
        builder: fn(&Captures<'_>, &BuildContext<'_>) -> Option<EventKind>,
        caps: Captures<'_>,
        annotations: &str,
    ) -> Option<EventKind> {
        let config = ParserConfig::default();
        let properties = extract_properties(annotations);
        let ctx = BuildContext {
            properties: &properties,
            config: &config,
        };
        builder(&caps, &ctx)
    }

    fn heal_caps() -> Captures<'static> {
        Captures::new().with("player", RED).with("target", BLU)
    }

    #[test]
    fn test_heal_boundaries() {
        assert!(build_with(heal, heal_caps(), "(healing \"1\")").is_some());
        assert!(build_with(heal, heal_caps(), "(healing \"450\")").is_some());
        assert!(build_with(heal, heal_caps(), "(healing \"0\")").is_none());
        assert!(build_with(heal, heal_caps(), "(healing \"451\")").is_none());
        assert!(build_with(heal, heal_caps(), "").is_none());
    }

    #[test]
    fn test_heal_requires_both_identities() {
        let caps = Captures::new().with("player", RED).with("target", "garbage");
        assert!(build_with(heal, caps, "(healing \"50\")").is_none());
    }

    #[test]
    fn test_damage_keeps_attacker_only_form() {
        let caps = Captures::new().with("attacker", RED);
        let Some(EventKind::Damage(event)) =
            build_with(damage, caps, "(damage \"62\") (weapon \"quake_rl\") (headshot \"1\")")
        else {
            panic!("expected damage event");
        };
        assert_eq!(event.victim, None);
        assert_eq!(event.damage, 62);
        assert_eq!(event.weapon.as_deref(), Some("quake_rl"));
        assert!(event.headshot);
        assert!(!event.airshot);
    }

    #[test]
    fn test_damage_requires_attacker() {
        let caps = Captures::new().with("attacker", "not a player");
        assert!(build_with(damage, caps, "(damage \"5\")").is_none());
    }

    #[test]
    fn test_kill_flags_from_customkill() {
        let caps = Captures::new()
            .with("attacker", RED)
            .with("victim", BLU)
            .with("weapon", "knife");
        let Some(EventKind::Kill(event)) = build_with(kill, caps, "(customkill \"backstab\")")
        else {
            panic!("expected kill event");
        };
        assert!(event.backstab);
        assert!(!event.headshot);
    }

    #[test]
    fn test_spawn_normalizes_role_and_rejects_unknown() {
        let caps = Captures::new().with("player", RED).with("role", "Heavy");
        let Some(EventKind::Spawn(event)) = build_with(spawn, caps, "") else {
            panic!("expected spawn event");
        };
        assert_eq!(event.role, Role::Heavy);

        let caps = Captures::new().with("player", RED).with("role", "civilian");
        assert!(build_with(spawn, caps, "").is_none());
    }

    #[test]
    fn test_capture_collects_cappers_and_point_id() {
        let caps = Captures::new().with("team", "Red");
        let annotations = format!(
            "(cp \"0\") (cpname \"Blue Final Point\") (numcappers \"2\") (player1 \"{RED}\") (position1 \"0 0 0\") (player2 \"{BLU}\")"
        );
        let Some(EventKind::Capture(event)) = build_with(capture, caps, &annotations) else {
            panic!("expected capture event");
        };
        assert_eq!(event.team, Some(Team::Red));
        assert_eq!(event.point_id, 1);
        assert_eq!(event.point_name, "Blue Final Point");
        assert_eq!(event.cappers.len(), 2);
    }

    #[test]
    fn test_capture_without_cp_has_point_zero() {
        let Some(EventKind::Capture(event)) = build_with(capture, Captures::new(), "") else {
            panic!("expected capture event");
        };
        assert_eq!(event.point_id, 0);
        assert_eq!(event.team, None);
    }

    #[test]
    fn test_charge_defaults_medigun_type() {
        let caps = Captures::new().with("player", RED);
        let Some(EventKind::Charge(event)) = build_with(charge, caps, "") else {
            panic!("expected charge event");
        };
        assert_eq!(event.medigun, "medigun");
    }

    #[test]
    fn test_round_end_winner() {
        let caps = Captures::new().with("type", "Win");
        let Some(EventKind::RoundEnd(event)) = build_with(round_end, caps, "(winner \"Blue\")")
        else {
            panic!("expected round end");
        };
        assert_eq!(event.kind, RoundEndKind::Win);
        assert_eq!(event.winner, Some(Team::Blue));
    }

    #[test]
    fn test_role_change_builds_role_event() {
        let caps = Captures::new().with("player", RED).with("role", "engineer");
        let Some(EventKind::RoleChange(event)) = build_with(role_change, caps, "") else {
            panic!("expected role change");
        };
        assert_eq!(event.role, Role::Engineer);
        assert_eq!(event.player.name, "arekk");
    }

    #[test]
    fn test_medic_death_drop_flag() {
        let caps = || Captures::new().with("attacker", BLU).with("victim", RED);
        let Some(EventKind::MedicDeath(event)) =
            build_with(medic_death, caps(), "(healing \"800\") (ubercharge \"1\")")
        else {
            panic!("expected medic death");
        };
        assert!(event.is_drop);

        let Some(EventKind::MedicDeath(event)) =
            build_with(medic_death, caps(), "(ubercharge \"0\")")
        else {
            panic!("expected medic death");
        };
        assert!(!event.is_drop);
    }

    #[test]
    fn test_build_requires_object() {
        let caps = || Captures::new().with("player", RED);
        let Some(EventKind::Build(event)) =
            build_with(build, caps(), "(object \"OBJ_SENTRYGUN\") (position \"1 2 3\")")
        else {
            panic!("expected build event");
        };
        assert!(event.is_sentry());
        assert_eq!(event.position.as_deref(), Some("1 2 3"));

        assert!(build_with(build, caps(), "").is_none());
    }

    #[test]
    fn test_flag_and_disconnect_properties() {
        let caps = || Captures::new().with("player", RED);
        let Some(EventKind::Flag(event)) = build_with(flag, caps(), "(event \"captured\")") else {
            panic!("expected flag event");
        };
        assert_eq!(event.kind.as_deref(), Some("captured"));
        assert_eq!(event.position, None);

        let Some(EventKind::Disconnect(event)) =
            build_with(disconnect, caps(), "(reason \"Disconnect by user.\")")
        else {
            panic!("expected disconnect");
        };
        assert_eq!(event.reason.as_deref(), Some("Disconnect by user."));
    }
}
