// SPDX-License-Identifier: MIT OR Apache-2.0

//! Duration type that decodes from human-readable strings.
//!
//! `std::time::Duration` deserializes from a `{ secs, nanos }` map, which is not
//! how durations are written in configuration. [`Duration`] accepts strings such as
//! `"1m"`, `"1h30m"`, `"250ms"` or `"1.5s"`, so it can be decoded by any structured
//! format. A bare number has no unit and is rejected.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a duration string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration {input:?}: {reason}")]
pub struct ParseDurationError {
    input: String,
    reason: &'static str,
}

impl ParseDurationError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A configuration duration.
///
/// # Examples
///
/// ```
/// use tagcfg::Duration;
///
/// let d: Duration = "1m30s".parse().unwrap();
/// assert_eq!(d.as_secs(), 90);
///
/// let d: Duration = serde_yaml::from_str("1m").unwrap();
/// assert_eq!(*d, std::time::Duration::from_secs(60));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(std::time::Duration);

impl Duration {
    /// Wraps a standard library duration.
    pub const fn new(inner: std::time::Duration) -> Self {
        Duration(inner)
    }

    /// Returns the wrapped standard library duration.
    pub const fn into_inner(self) -> std::time::Duration {
        self.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<std::time::Duration> for Duration {
    fn from(inner: std::time::Duration) -> Self {
        Duration(inner)
    }
}

impl From<Duration> for std::time::Duration {
    fn from(d: Duration) -> Self {
        d.0
    }
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

impl FromStr for Duration {
    type Err = ParseDurationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let s = input.trim();
        let s = s.strip_prefix('+').unwrap_or(s);
        if s.starts_with('-') {
            if s[1..].chars().all(|c| c == '0') && s.len() > 1 {
                return Ok(Duration::default());
            }
            return Err(ParseDurationError::new(input, "negative durations are not supported"));
        }
        if s == "0" {
            return Ok(Duration::default());
        }
        if s.is_empty() {
            return Err(ParseDurationError::new(input, "empty string"));
        }

        let mut total: u128 = 0;
        let mut rest = s;
        while !rest.is_empty() {
            let number_len = rest
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .ok_or_else(|| ParseDurationError::new(input, "missing unit"))?;
            if number_len == 0 {
                return Err(ParseDurationError::new(input, "expected a number"));
            }
            let (number, tail) = rest.split_at(number_len);

            let unit_len = tail
                .find(|c: char| c.is_ascii_digit() || c == '.')
                .unwrap_or(tail.len());
            let (unit, tail) = tail.split_at(unit_len);
            let scale =
                unit_nanos(unit).ok_or_else(|| ParseDurationError::new(input, "unknown unit"))?;

            let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
            if whole.is_empty() && frac.is_empty() {
                return Err(ParseDurationError::new(input, "expected a number"));
            }
            let whole: u128 = if whole.is_empty() {
                0
            } else {
                whole
                    .parse()
                    .map_err(|_| ParseDurationError::new(input, "invalid number"))?
            };
            let mut nanos = whole
                .checked_mul(scale)
                .ok_or_else(|| ParseDurationError::new(input, "overflow"))?;

            let mut place = scale;
            for digit in frac.chars() {
                let digit = digit
                    .to_digit(10)
                    .ok_or_else(|| ParseDurationError::new(input, "invalid number"))?;
                place /= 10;
                nanos += u128::from(digit) * place;
            }

            total = total
                .checked_add(nanos)
                .ok_or_else(|| ParseDurationError::new(input, "overflow"))?;
            rest = tail;
        }

        let secs = u64::try_from(total / 1_000_000_000)
            .map_err(|_| ParseDurationError::new(input, "overflow"))?;
        let subsec = (total % 1_000_000_000) as u32;
        Ok(Duration(std::time::Duration::new(secs, subsec)))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.as_secs();
        let nanos = self.0.subsec_nanos();
        if total == 0 && nanos == 0 {
            return write!(f, "0s");
        }
        if total == 0 {
            return if nanos % 1_000_000 == 0 {
                write!(f, "{}ms", nanos / 1_000_000)
            } else if nanos % 1_000 == 0 {
                write!(f, "{}us", nanos / 1_000)
            } else {
                write!(f, "{}ns", nanos)
            };
        }

        let (hours, minutes, secs) = (total / 3_600, total % 3_600 / 60, total % 60);
        if hours > 0 {
            write!(f, "{}h", hours)?;
        }
        if minutes > 0 {
            write!(f, "{}m", minutes)?;
        }
        if secs > 0 || nanos > 0 {
            if nanos > 0 {
                let frac = format!("{:09}", nanos);
                write!(f, "{}.{}s", secs, frac.trim_end_matches('0'))?;
            } else {
                write!(f, "{}s", secs)?;
            }
        }
        Ok(())
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct DurationVisitor;

impl<'de> Visitor<'de> for DurationVisitor {
    type Value = Duration;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a duration string like \"1m30s\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Duration, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(DurationVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    fn parse(s: &str) -> StdDuration {
        s.parse::<Duration>().unwrap().into_inner()
    }

    #[test]
    fn test_parse_single_units() {
        assert_eq!(parse("1m"), StdDuration::from_secs(60));
        assert_eq!(parse("2h"), StdDuration::from_secs(7_200));
        assert_eq!(parse("250ms"), StdDuration::from_millis(250));
        assert_eq!(parse("10us"), StdDuration::from_micros(10));
        assert_eq!(parse("7ns"), StdDuration::from_nanos(7));
    }

    #[test]
    fn test_parse_compound_and_fraction() {
        assert_eq!(parse("1h30m45s"), StdDuration::from_secs(5_445));
        assert_eq!(parse("1.5s"), StdDuration::from_millis(1_500));
        assert_eq!(parse(".5m"), StdDuration::from_secs(30));
    }

    #[test]
    fn test_parse_zero() {
        assert_eq!(parse("0"), StdDuration::ZERO);
        assert_eq!(parse("-0"), StdDuration::ZERO);
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "1", "m", "1x", "-1s", "1.2.3s", "."] {
            assert!(bad.parse::<Duration>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Duration::from(StdDuration::from_secs(90)).to_string(), "1m30s");
        assert_eq!(Duration::from(StdDuration::from_millis(1_500)).to_string(), "1.5s");
        assert_eq!(Duration::from(StdDuration::from_millis(20)).to_string(), "20ms");
        assert_eq!(Duration::default().to_string(), "0s");
    }

    #[test]
    fn test_deserialize_from_yaml_and_json() {
        let d: Duration = serde_yaml::from_str("1m").unwrap();
        assert_eq!(*d, StdDuration::from_secs(60));

        let d: Duration = serde_json::from_str("\"5s\"").unwrap();
        assert_eq!(*d, StdDuration::from_secs(5));
    }

    #[test]
    fn test_deserialize_rejects_bare_integers() {
        assert!(serde_yaml::from_str::<Duration>("30").is_err());
        assert!(serde_json::from_str::<Duration>("30").is_err());
        assert!(serde_json::from_str::<Duration>("\"30\"").is_err());
    }
}
