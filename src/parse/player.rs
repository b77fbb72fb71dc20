//! Player token resolution
//!
//! A token looks like `name<session><externalId><team>`, e.g.
//! `arekk<78><[U:1:93699014]><Red>`. Names may themselves contain `<`, so the
//! name is chosen lazily: the shortest prefix after which the remaining
//! segments parse.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while_m_n};
use nom::combinator::map_res;
use nom::sequence::delimited;
use nom::{IResult, Parser};

use crate::core::types::{PlayerIdentity, Team};

pub const MAX_NAME_CHARS: usize = 80;
pub const MAX_SESSION_DIGITS: usize = 4;
pub const MAX_EXTERNAL_ID_CHARS: usize = 40;

fn session(input: &str) -> IResult<&str, &str> {
    delimited(
        tag("<"),
        take_while_m_n(1, MAX_SESSION_DIGITS, |c: char| c.is_ascii_digit()),
        tag(">"),
    )
    .parse(input)
}

fn external_id(input: &str) -> IResult<&str, &str> {
    delimited(
        tag("<"),
        take_while_m_n(1, MAX_EXTERNAL_ID_CHARS, |c: char| c != '>'),
        tag(">"),
    )
    .parse(input)
}

fn team(input: &str) -> IResult<&str, Team> {
    delimited(
        tag("<"),
        map_res(
            alt((tag("Red"), tag("Blue"), tag("Spectator"), tag("Console"))),
            |s: &str| s.parse::<Team>(),
        ),
        tag(">"),
    )
    .parse(input)
}

/// Parse a player token; `None` means "no identity"
pub fn parse_player(token: &str) -> Option<PlayerIdentity> {
    token
        .char_indices()
        .skip(1)
        .take(MAX_NAME_CHARS)
        .filter(|(_, c)| *c == '<')
        .find_map(|(split, _)| {
            let (name, rest) = token.split_at(split);
            let (_, (_, id, team)) = (session, external_id, team).parse(rest).ok()?;
            Some(PlayerIdentity::new(id, name, team))
        })
}
