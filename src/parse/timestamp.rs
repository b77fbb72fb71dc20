//! Line timestamp prefix
//!
//! Every server log line starts with `L MM/DD/YYYY - HH:MM:SS: `. The wall
//! clock is interpreted as UTC so results do not depend on the host zone.

use chrono::NaiveDate;
use nom::bytes::complete::take_while_m_n;
use nom::combinator::map_res;
use nom::{IResult, Parser};

use crate::core::types::Timestamp;
use crate::parse::lit;

/// Number of characters in the prefix, up to and including the trailing colon
pub const PREFIX_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateTimeFields {
    month: u32,
    day: u32,
    year: i32,
    hour: u32,
    minute: u32,
    second: u32,
}

fn digits<T: std::str::FromStr>(count: usize) -> impl Fn(&str) -> IResult<&str, T> {
    move |input| {
        map_res(
            take_while_m_n(count, count, |c: char| c.is_ascii_digit()),
            |s: &str| s.parse::<T>(),
        )
        .parse(input)
    }
}

fn prefix(input: &str) -> IResult<&str, DateTimeFields> {
    let (input, _) = lit("L ", input)?;
    let (input, month) = digits(2)(input)?;
    let (input, _) = lit("/", input)?;
    let (input, day) = digits(2)(input)?;
    let (input, _) = lit("/", input)?;
    let (input, year) = digits(4)(input)?;
    let (input, _) = lit(" - ", input)?;
    let (input, hour) = digits(2)(input)?;
    let (input, _) = lit(":", input)?;
    let (input, minute) = digits(2)(input)?;
    let (input, _) = lit(":", input)?;
    let (input, second) = digits(2)(input)?;
    let (input, _) = lit(":", input)?;

    Ok((
        input,
        DateTimeFields {
            month,
            day,
            year,
            hour,
            minute,
            second,
        },
    ))
}

/// Split a raw line into its timestamp and the event text after the prefix
///
/// Returns `None` when the prefix is missing or names an impossible date.
pub fn split_line(line: &str) -> Option<(Timestamp, &str)> {
    let (rest, fields) = prefix(line).ok()?;
    let body = rest.strip_prefix(' ').unwrap_or(rest);

    let timestamp = NaiveDate::from_ymd_opt(fields.year, fields.month, fields.day)?
        .and_hms_opt(fields.hour, fields.minute, fields.second)?
        .and_utc()
        .timestamp();

    Some((timestamp, body))
}

/// Parse only the timestamp of a raw line
pub fn parse_timestamp(line: &str) -> Option<Timestamp> {
    split_line(line).map(|(timestamp, _)| timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_timestamp() {
        let line = "L 08/26/2018 - 23:06:46: World triggered \"Round_Start\"";
        // 2018-08-26T23:06:46Z
        assert_eq!(parse_timestamp(line), Some(1_535_324_806));
    }

    #[test]
    fn test_split_strips_prefix_and_space() {
        let line = "L 01/02/2020 - 00:00:05: Started map \"cp_badlands\"";
        let (timestamp, body) = split_line(line).unwrap();
        assert_eq!(body, "Started map \"cp_badlands\"");
        assert_eq!(
            timestamp - parse_timestamp("L 01/02/2020 - 00:00:00: x").unwrap(),
            5
        );
        assert_eq!(&line[..PREFIX_LEN], "L 01/02/2020 - 00:00:05:");
    }

    #[test]
    fn test_rejects_malformed_prefix() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("Log file started"), None);
        assert_eq!(parse_timestamp("L 8/26/2018 - 23:06:46: x"), None);
        assert_eq!(parse_timestamp("L 08/26/2018 - 23:06:46 x"), None);
    }

    #[test]
    fn test_rejects_impossible_date() {
        assert_eq!(parse_timestamp("L 02/30/2018 - 10:00:00: x"), None);
        assert_eq!(parse_timestamp("L 13/01/2018 - 10:00:00: x"), None);
        assert_eq!(parse_timestamp("L 01/01/2018 - 25:00:00: x"), None);
    }
}
