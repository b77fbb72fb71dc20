//! Matchlog - game-server log to per-match statistics

pub mod core;
pub mod events;
pub mod game;
pub mod parse;
pub mod stats;

pub use crate::core::config::ParserConfig;
pub use crate::core::error::{LogError, Result};
pub use crate::game::{parse_lines, parse_lines_with_config, Game, LineStats, MatchReport};
