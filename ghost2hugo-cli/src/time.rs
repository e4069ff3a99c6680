//! Timestamp parsing for Ghost exports.
//!
//! Older exports store epoch milliseconds; newer ones store strings whose format
//! depends on the database Ghost ran on. Every timestamp ends up in the
//! timezone chosen with `--location`.

use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};
use serde_json::Value;

/// Timezone timestamps are converted to (and naive timestamps interpreted in).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Location {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl Location {
    fn convert(self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Location::Local => instant.with_timezone(&Local).fixed_offset(),
            Location::Utc => instant.fixed_offset(),
            Location::Fixed(offset) => instant.with_timezone(&offset),
        }
    }

    fn localize(self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Location::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.fixed_offset()),
            Location::Utc => Some(Utc.from_utc_datetime(&naive).fixed_offset()),
            Location::Fixed(offset) => offset.from_local_datetime(&naive).single(),
        }
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Location::Local),
            "utc" | "z" => Ok(Location::Utc),
            other => parse_offset(other)
                .map(Location::Fixed)
                .ok_or_else(|| format!("invalid location {s:?}, expected local, utc or ±HH:MM")),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Local => write!(f, "local"),
            Location::Utc => write!(f, "utc"),
            Location::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, s.get(1..)?),
        b'-' => (-1, s.get(1..)?),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => (rest.get(..2)?, rest.get(2..)?),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Formats with an explicit offset, tried after RFC 3339.
const ZONED_FORMATS: &[&str] = &[
    "%a %b %e %H:%M:%S %Y %z", // Postgres style
    "%Y-%m-%d %H:%M:%S%#z", // ISO/SQL style
    "%Y-%m-%d %H:%M:%S%.f%#z",
];

/// Formats without an offset, interpreted in the configured location.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S", // SQLite and MySQL
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%a %b %e %H:%M:%S %Y", // Postgres style
    "%m/%d/%Y %H:%M:%S%.f", // SQL style
];

/// Zone abbreviations known to mean UTC.
const UTC_ZONES: &[&str] = &["UTC", "GMT", "Z"];

/// Split a trailing zone abbreviation (`UTC`, `CET`, ...) off a timestamp.
fn split_zone_abbreviation(s: &str) -> Option<(&str, &str)> {
    let (rest, zone) = s.rsplit_once(' ')?;
    let is_abbreviation =
        (1..=5).contains(&zone.len()) && zone.chars().all(|c| c.is_ascii_alphabetic());
    is_abbreviation.then(|| (rest.trim_end(), zone))
}

fn parse_naive(s: &str, location: Location) -> Option<DateTime<FixedOffset>> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .and_then(|naive| location.localize(naive))
}

/// Parses the timestamps found in an export.
#[derive(Debug, Clone, Default)]
pub(crate) struct TimeParser {
    location: Location,
    format: Option<String>,
}

impl TimeParser {
    /// `format` (strftime syntax) is tried before the built-in formats.
    pub(crate) fn new(location: Location, format: Option<String>) -> Self {
        Self {
            location,
            format: format.filter(|f| !f.is_empty()),
        }
    }

    /// Parse a raw timestamp: epoch milliseconds, or a string in one of the
    /// known formats. `null` and unparseable values yield `None`.
    pub(crate) fn parse(&self, raw: &Value) -> Option<DateTime<FixedOffset>> {
        match raw {
            Value::Number(n) => n
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|instant| self.location.convert(instant)),
            Value::String(s) => self.parse_str(s.trim()),
            Value::Null => None,
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
                tracing::warn!(%raw, "unexpected timestamp value");
                None
            }
        }
    }

    fn parse_str(&self, s: &str) -> Option<DateTime<FixedOffset>> {
        if s.is_empty() {
            return None;
        }
        if let Some(format) = &self.format
            && let Some(dt) = self.parse_with(s, format)
        {
            return Some(dt);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(self.location.convert(dt.to_utc()));
        }
        let parsed = ZONED_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(s, format).ok())
            .map(|dt| self.location.convert(dt.to_utc()))
            .or_else(|| parse_naive(s, self.location))
            .or_else(|| {
                // Other abbreviations are read in the configured location
                let (rest, zone) = split_zone_abbreviation(s)?;
                if UTC_ZONES.iter().any(|utc| zone.eq_ignore_ascii_case(utc)) {
                    parse_naive(rest, Location::Utc)
                        .map(|dt| self.location.convert(dt.to_utc()))
                } else {
                    parse_naive(rest, self.location)
                }
            });
        if parsed.is_none() {
            tracing::warn!(timestamp = s, "unrecognised timestamp format");
        }
        parsed
    }

    fn parse_with(&self, s: &str, format: &str) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(s, format)
            .ok()
            .map(|dt| self.location.convert(dt.to_utc()))
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, format)
                    .ok()
                    .and_then(|naive| self.location.localize(naive))
            })
    }
}

/// The UTC offset of a location right now, for log output.
pub(crate) fn current_offset(location: Location) -> FixedOffset {
    match location {
        Location::Local => Local::now().offset().fix(),
        Location::Utc => Utc.fix(),
        Location::Fixed(offset) => offset,
    }
}
