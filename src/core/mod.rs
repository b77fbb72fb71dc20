pub mod config;
pub mod error;
pub mod types;

pub use config::ParserConfig;
pub use types::{PlayerId, PlayerIdentity, Role, Team, Timestamp};
