//! `(key "value")` annotations
//!
//! Extraction is rule-independent: one pass over the event text collects
//! every annotation, whichever rule later consumes them.

use std::collections::BTreeMap;
use std::str::FromStr;

use nom::bytes::complete::{tag, take_while_m_n};
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};

pub const MAX_KEY_CHARS: usize = 60;
pub const MAX_VALUE_CHARS: usize = 60;

/// Annotations found on one line, borrowed from it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties<'a> {
    values: BTreeMap<&'a str, &'a str>,
}

impl<'a> Properties<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'a str, value: &'a str) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.values.get(key).copied()
    }

    /// Value parsed as `T`; absent and unparsable both give `None`
    pub fn parse<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// True only for the literal value `"1"`
    pub fn flag(&self, key: &str) -> bool {
        self.get(key) == Some("1")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn property(input: &str) -> IResult<&str, (&str, &str)> {
    (
        preceded(tag("("), take_while_m_n(1, MAX_KEY_CHARS, is_key_char)),
        delimited(
            tag(" \""),
            take_while_m_n(1, MAX_VALUE_CHARS, |c: char| c != '"'),
            tag("\")"),
        ),
    )
        .parse(input)
}

/// Collect every annotation in `text`; later duplicates win
pub fn extract_properties(text: &str) -> Properties<'_> {
    let mut properties = Properties::new();
    let mut rest = text;

    while let Some(open) = rest.find('(') {
        let candidate = &rest[open..];
        match property(candidate) {
            Ok((after, (key, value))) => {
                properties.insert(key, value);
                rest = after;
            }
            Err(_) => rest = &candidate[1..],
        }
    }

    properties
}
