//! Log line parsing: timestamps, player tokens, annotations and the rule catalogue

pub mod builders;
pub mod catalogue;
pub mod patterns;
pub mod player;
pub mod properties;
pub mod timestamp;

pub use catalogue::{BuildContext, LineOutcome, PatternCatalogue, Rule};
pub use patterns::Captures;
pub use player::parse_player;
pub use properties::{extract_properties, Properties};
pub use timestamp::{parse_timestamp, split_line};

use nom::bytes::complete::tag;
use nom::{IResult, Parser};

/// Match a literal with the default nom error type
pub(crate) fn lit<'a>(text: &'static str, input: &'a str) -> IResult<&'a str, &'a str> {
    tag(text).parse(input)
}
