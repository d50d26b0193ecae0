use crate::domain::errors::BenchmarkError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A swim time normalized to total seconds.
///
/// Value object constructed once per query from raw text (or from seconds
/// when loading reference data) and immutable afterwards. Stored as a
/// non-negative `Decimal` so that hundredth-of-a-second times compare
/// exactly: `"1:03.00"` and `"63.00"` are the same time, and ties against
/// peer results are exact rather than float-fuzzy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SwimTime(Decimal);

impl SwimTime {
    /// Parses a human-entered time string.
    ///
    /// Accepted shapes: `"SS.ss"`, `"M:SS.ss"`, `"MM:SS.ss"` (the fractional
    /// part is optional, leading/trailing whitespace is ignored). Rejected:
    /// empty input, negative values, non-numeric fragments, seconds >= 60
    /// when a minutes component is present, and anything with more than one
    /// `:` or more than two minute digits.
    pub fn parse(raw: &str) -> Result<Self, BenchmarkError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Self::invalid(raw, "empty input"));
        }

        let (minutes, seconds_raw) = match trimmed.split_once(':') {
            None => (None, trimmed),
            Some((minutes_raw, seconds_raw)) => {
                if seconds_raw.contains(':') {
                    return Err(Self::invalid(raw, "at most one ':' separator is allowed"));
                }
                if minutes_raw.is_empty()
                    || minutes_raw.len() > 2
                    || !minutes_raw.bytes().all(|b| b.is_ascii_digit())
                {
                    return Err(Self::invalid(raw, "minutes must be one or two digits"));
                }
                let minutes = minutes_raw
                    .parse::<u32>()
                    .map_err(|_| Self::invalid(raw, "minutes must be one or two digits"))?;
                (Some(minutes), seconds_raw)
            }
        };

        // Decimal::from_str is laxer than meet formats (it takes "6_3" and
        // "+3"); only digits and one '.' may reach it. A leading '-' passes
        // through so negatives keep their own rejection below.
        let unsigned = seconds_raw.strip_prefix('-').unwrap_or(seconds_raw);
        if unsigned.is_empty()
            || unsigned.bytes().filter(|b| *b == b'.').count() > 1
            || !unsigned.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        {
            return Err(Self::invalid(raw, "seconds are not a number"));
        }

        let seconds = Decimal::from_str(seconds_raw)
            .map_err(|_| Self::invalid(raw, "seconds are not a number"))?;

        if seconds.is_sign_negative() {
            return Err(Self::invalid(raw, "negative times are not allowed"));
        }
        if minutes.is_some() && seconds >= dec!(60) {
            return Err(Self::invalid(
                raw,
                "seconds must be below 60 when minutes are present",
            ));
        }

        let total = Decimal::from(minutes.unwrap_or(0)) * dec!(60) + seconds;
        Ok(Self(total))
    }

    /// Builds a time directly from total seconds (fixtures, thresholds).
    pub fn from_seconds(seconds: Decimal) -> Result<Self, BenchmarkError> {
        if seconds.is_sign_negative() {
            return Err(Self::invalid(
                &seconds.to_string(),
                "negative times are not allowed",
            ));
        }
        Ok(Self(seconds))
    }

    /// Total seconds as an exact decimal.
    pub fn seconds(&self) -> Decimal {
        self.0
    }

    /// Total seconds as `f64`, for statistics that operate on floats.
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    fn invalid(raw: &str, reason: &str) -> BenchmarkError {
        BenchmarkError::InvalidTimeFormat {
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for SwimTime {
    /// Formats back into the conventional `M:SS.ss` shape (`SS.ss` under a
    /// minute), rounded to hundredths.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = (self.0 / dec!(60)).floor();
        let seconds = self.0 - minutes * dec!(60);
        if minutes.is_zero() {
            write!(f, "{:.2}", seconds.to_f64().unwrap_or(0.0))
        } else {
            write!(
                f,
                "{}:{:05.2}",
                minutes.to_u32().unwrap_or(0),
                seconds.to_f64().unwrap_or(0.0)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_format_invariant() {
        let with_minutes = SwimTime::parse("1:03.00").unwrap();
        let plain_seconds = SwimTime::parse("63.00").unwrap();
        assert_eq!(with_minutes, plain_seconds);
        assert_eq!(with_minutes.seconds(), dec!(63));
    }

    #[test]
    fn test_parse_two_digit_minutes() {
        let distance_time = SwimTime::parse("15:46.91").unwrap();
        assert_eq!(distance_time.seconds(), dec!(946.91));
    }

    #[test]
    fn test_parse_without_fraction() {
        assert_eq!(SwimTime::parse("63").unwrap().seconds(), dec!(63));
        assert_eq!(SwimTime::parse("1:03").unwrap().seconds(), dec!(63));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(SwimTime::parse("  59.87 ").unwrap().seconds(), dec!(59.87));
    }

    #[test]
    fn test_parse_rejects_seconds_overflow_with_minutes() {
        let err = SwimTime::parse("1:63.00").unwrap_err();
        assert!(matches!(
            err,
            BenchmarkError::InvalidTimeFormat { ref raw, .. } if raw == "1:63.00"
        ));
    }

    #[test]
    fn test_parse_accepts_bare_seconds_over_sixty() {
        // "75.00" has no minutes component, so the 60s cap does not apply.
        assert_eq!(SwimTime::parse("75.00").unwrap().seconds(), dec!(75));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for raw in ["", "   ", "abc", "1:ab.00", "-63.0", "1:-3.0", "63..0"] {
            assert!(
                SwimTime::parse(raw).is_err(),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_parse_rejects_digit_separators_and_signs() {
        // Decimal's own parser accepts every one of these.
        for raw in ["6_3.00", "+63.00", "1:+3.00", "1:3_0.00"] {
            assert!(
                SwimTime::parse(raw).is_err(),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_parse_rejects_extra_colons_and_wide_minutes() {
        assert!(SwimTime::parse("1:02:03.00").is_err());
        assert!(SwimTime::parse("100:00.00").is_err());
        assert!(SwimTime::parse(":30.00").is_err());
    }

    #[test]
    fn test_ordering_crosses_the_minute_boundary() {
        let under = SwimTime::parse("59.99").unwrap();
        let over = SwimTime::parse("1:00.00").unwrap();
        assert!(under < over);
    }

    #[test]
    fn test_from_seconds_rejects_negative() {
        assert!(SwimTime::from_seconds(dec!(-1.0)).is_err());
        assert!(SwimTime::from_seconds(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_display_round_trips_the_convention() {
        assert_eq!(SwimTime::parse("63.5").unwrap().to_string(), "1:03.50");
        assert_eq!(SwimTime::parse("58").unwrap().to_string(), "58.00");
        assert_eq!(SwimTime::parse("15:46.91").unwrap().to_string(), "15:46.91");
    }
}
