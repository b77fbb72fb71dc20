//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log time in whole seconds since the Unix epoch
pub type Timestamp = i64;

/// Stable external identifier of a player (e.g. `[U:1:93699014]`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Team a player token can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
    Spectator,
    Console,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Red => "Red",
            Team::Blue => "Blue",
            Team::Spectator => "Spectator",
            Team::Console => "Console",
        }
    }
}

impl FromStr for Team {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Red" => Ok(Team::Red),
            "Blue" => Ok(Team::Blue),
            "Spectator" => Ok(Team::Spectator),
            "Console" => Ok(Team::Console),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Scout,
    Soldier,
    Pyro,
    Demoman,
    #[serde(rename = "heavyweapons")]
    Heavy,
    Engineer,
    Medic,
    Sniper,
    Spy,
}

impl Role {
    pub fn all() -> &'static [Role] {
        &[
            Role::Scout,
            Role::Soldier,
            Role::Pyro,
            Role::Demoman,
            Role::Heavy,
            Role::Engineer,
            Role::Medic,
            Role::Sniper,
            Role::Spy,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Scout => "scout",
            Role::Soldier => "soldier",
            Role::Pyro => "pyro",
            Role::Demoman => "demoman",
            Role::Heavy => "heavyweapons",
            Role::Engineer => "engineer",
            Role::Medic => "medic",
            Role::Sniper => "sniper",
            Role::Spy => "spy",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    /// Case-insensitive; the log writes heavies as either `heavy` or `heavyweapons`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heavy" | "heavyweapons" => Ok(Role::Heavy),
            other => Role::all()
                .iter()
                .copied()
                .find(|role| role.as_str() == other)
                .ok_or(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A player as observed in a single log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub id: PlayerId,
    pub name: String,
    pub team: Team,
}

impl PlayerIdentity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, team: Team) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
            team,
        }
    }
}
