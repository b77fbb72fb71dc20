//! Line matchers for the pattern catalogue
//!
//! Each matcher recognises one line shape and returns its named captures.
//! Quoted fields are matched lazily: the captured text is the shortest
//! non-empty run for which the remainder of the shape still matches, so a
//! player name containing `" killed "` cannot swallow the real separator.

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::digit1;
use nom::combinator::opt;
use nom::error::{Error, ErrorKind};
use nom::sequence::preceded;
use nom::{IResult, Parser};

use crate::core::types::PlayerIdentity;
use crate::parse::lit;
use crate::parse::player::parse_player;

/// Named groups captured by a matcher, borrowed from the line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures<'a> {
    groups: Vec<(&'static str, &'a str)>,
}

impl<'a> Captures<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: &'a str) -> Self {
        self.groups.push((name, value));
        self
    }

    pub fn with_opt(self, name: &'static str, value: Option<&'a str>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.groups
            .iter()
            .find(|(group, _)| *group == name)
            .map(|(_, value)| *value)
    }

    /// Resolve a captured player token
    pub fn player(&self, name: &str) -> Option<PlayerIdentity> {
        self.get(name).and_then(parse_player)
    }
}

fn done(input: &str) -> IResult<&str, ()> {
    Ok((input, ()))
}

/// `"X"` followed by `tail`, X being the shortest run of 1..=max_chars characters
fn lazy_quoted_bounded<'a, O, F>(
    input: &'a str,
    max_chars: usize,
    mut tail: F,
) -> IResult<&'a str, (&'a str, O)>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    let (body, _) = lit("\"", input)?;

    for (close, _) in body.match_indices('"') {
        if close == 0 {
            continue;
        }
        let content = &body[..close];
        if content.chars().count() > max_chars {
            break;
        }
        if let Ok((rest, out)) = tail(&body[close + 1..]) {
            return Ok((rest, (content, out)));
        }
    }

    Err(nom::Err::Error(Error::new(input, ErrorKind::TakeUntil)))
}

fn lazy_quoted<'a, O, F>(input: &'a str, tail: F) -> IResult<&'a str, (&'a str, O)>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    lazy_quoted_bounded(input, usize::MAX, tail)
}

/// A quoted field with nothing required after it
fn quoted(input: &str) -> IResult<&str, &str> {
    lazy_quoted(input, done).map(|(rest, (content, ()))| (rest, content))
}

/// `"P"<text>`
fn subject_then<'a>(body: &'a str, text: &'static str) -> Option<(&'a str, &'a str)> {
    let (rest, (subject, _)) = lazy_quoted(body, |s| lit(text, s)).ok()?;
    Some((subject, rest))
}

/// `"P"<text>"X"` with X at most `max_chars` long
fn subject_then_quoted<'a>(
    body: &'a str,
    text: &'static str,
    max_chars: usize,
) -> Option<(&'a str, &'a str)> {
    let (_, (subject, (object, ()))) = lazy_quoted(body, |s| {
        let (s, _) = lit(text, s)?;
        lazy_quoted_bounded(s, max_chars, done)
    })
    .ok()?;
    Some((subject, object))
}

fn subject_only<'a>(body: &'a str, text: &'static str) -> Option<Captures<'a>> {
    subject_then(body, text).map(|(player, _)| Captures::new().with("player", player))
}

// ---------------------------------------------------------------------------
// Matchers, one per catalogue rule
// ---------------------------------------------------------------------------

pub fn damage(body: &str) -> Option<Captures<'_>> {
    let (attacker, rest) = subject_then(body, " triggered \"damage\"")?;
    let victim = preceded(tag(" against "), quoted)
        .parse(rest)
        .ok()
        .map(|(_, victim)| victim);
    Some(
        Captures::new()
            .with("attacker", attacker)
            .with_opt("victim", victim),
    )
}

pub fn healed(body: &str) -> Option<Captures<'_>> {
    let (player, target) = subject_then_quoted(body, " triggered \"healed\" against ", usize::MAX)?;
    Some(Captures::new().with("player", player).with("target", target))
}

pub fn shot_fired(body: &str) -> Option<Captures<'_>> {
    subject_only(body, " triggered \"shot_fired\"")
}

pub fn shot_hit(body: &str) -> Option<Captures<'_>> {
    subject_only(body, " triggered \"shot_hit\"")
}

pub fn kill(body: &str) -> Option<Captures<'_>> {
    let (_, (attacker, (victim, (weapon, ())))) = lazy_quoted(body, |s| {
        let (s, _) = lit(" killed ", s)?;
        lazy_quoted(s, |s| {
            let (s, _) = lit(" with ", s)?;
            lazy_quoted(s, done)
        })
    })
    .ok()?;
    Some(
        Captures::new()
            .with("attacker", attacker)
            .with("victim", victim)
            .with("weapon", weapon),
    )
}

pub fn kill_assist(body: &str) -> Option<Captures<'_>> {
    let (player, victim) =
        subject_then_quoted(body, " triggered \"kill assist\" against ", usize::MAX)?;
    Some(Captures::new().with("player", player).with("victim", victim))
}

pub fn pickup(body: &str) -> Option<Captures<'_>> {
    let (player, item) = subject_then_quoted(body, " picked up item ", 40)?;
    Some(Captures::new().with("player", player).with("item", item))
}

pub fn suicide(body: &str) -> Option<Captures<'_>> {
    subject_only(body, " committed suicide")
}

pub fn spawn(body: &str) -> Option<Captures<'_>> {
    let (player, role) = subject_then_quoted(body, " spawned as ", usize::MAX)?;
    Some(Captures::new().with("player", player).with("role", role))
}

pub fn role_change(body: &str) -> Option<Captures<'_>> {
    let (player, role) = subject_then_quoted(body, " changed role to ", usize::MAX)?;
    Some(Captures::new().with("player", player).with("role", role))
}

pub fn point_captured(body: &str) -> Option<Captures<'_>> {
    let (rest, _) = lit("Team \"", body).ok()?;
    let (rest, team) = opt(alt((tag::<_, _, Error<&str>>("Red"), tag("Blue"))))
        .parse(rest)
        .ok()?;
    lit("\" triggered \"pointcaptured", rest).ok()?;
    Some(Captures::new().with_opt("team", team))
}

pub fn medic_death(body: &str) -> Option<Captures<'_>> {
    let (attacker, victim) =
        subject_then_quoted(body, " triggered \"medic_death\" against ", usize::MAX)?;
    Some(
        Captures::new()
            .with("attacker", attacker)
            .with("victim", victim),
    )
}

pub fn round_start(body: &str) -> Option<Captures<'_>> {
    lit("World triggered \"Round_Start\"", body)
        .ok()
        .map(|_| Captures::new())
}

pub fn round_end(body: &str) -> Option<Captures<'_>> {
    let (_, kind) = preceded(
        tag::<_, _, Error<&str>>("World triggered \"Round_"),
        alt((tag("Win"), tag("Stalemate"))),
    )
    .parse(body)
    .ok()?;
    Some(Captures::new().with("type", kind))
}

pub fn game_over(body: &str) -> Option<Captures<'_>> {
    let (rest, _) = lit("World triggered \"Game_Over\"", body).ok()?;
    let reason = preceded(tag(" reason "), quoted)
        .parse(rest)
        .ok()
        .map(|(_, reason)| reason);
    Some(Captures::new().with_opt("reason", reason))
}

pub fn join_team(body: &str) -> Option<Captures<'_>> {
    let (player, team) = subject_then_quoted(body, " joined team ", usize::MAX)?;
    Some(Captures::new().with("player", player).with("newteam", team))
}

pub fn disconnect(body: &str) -> Option<Captures<'_>> {
    subject_only(body, " disconnected")
}

pub fn charge_deployed(body: &str) -> Option<Captures<'_>> {
    subject_only(body, " triggered \"chargedeployed\"")
}

pub fn chat(body: &str) -> Option<Captures<'_>> {
    let (player, message) = subject_then_quoted(body, " say ", usize::MAX)?;
    Some(Captures::new().with("player", player).with("message", message))
}

pub fn team_chat(body: &str) -> Option<Captures<'_>> {
    let (player, message) = subject_then_quoted(body, " say_team ", usize::MAX)?;
    Some(Captures::new().with("player", player).with("message", message))
}

pub fn built_object(body: &str) -> Option<Captures<'_>> {
    subject_only(body, " triggered \"player_builtobject\"")
}

pub fn flag_event(body: &str) -> Option<Captures<'_>> {
    subject_only(body, " triggered \"flagevent\"")
}

pub fn team_score(body: &str) -> Option<Captures<'_>> {
    let (rest, _) = lit("Team \"", body).ok()?;
    let (rest, team) = alt((tag::<_, _, Error<&str>>("Red"), tag("Blue")))
        .parse(rest)
        .ok()?;
    let (rest, _) = lit("\" ", rest).ok()?;
    let (rest, _) = alt((tag::<_, _, Error<&str>>("current"), tag("final")))
        .parse(rest)
        .ok()?;
    let (rest, _) = lit(" score \"", rest).ok()?;
    let (rest, score) = digit1::<_, Error<&str>>(rest).ok()?;
    lit("\"", rest).ok()?;
    Some(Captures::new().with("team", team).with("score", score))
}

pub fn pause(body: &str) -> Option<Captures<'_>> {
    lit("World triggered \"Game_Paused", body)
        .ok()
        .map(|_| Captures::new())
}

pub fn unpause(body: &str) -> Option<Captures<'_>> {
    lit("World triggered \"Game_Unpaused", body)
        .ok()
        .map(|_| Captures::new())
}

pub fn map_load(body: &str) -> Option<Captures<'_>> {
    let (rest, _) = lit("Started map ", body).ok()?;
    let (_, map) = quoted(rest).ok()?;
    Some(Captures::new().with("mapname", map))
}
