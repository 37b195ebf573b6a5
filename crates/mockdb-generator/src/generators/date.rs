//! Date value generator, plus parsing of date starts and duration steps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use mockdb_core::{DbType, Error, GenerationMode, Result, Scalar};
use rand::Rng;
use std::collections::BTreeMap;

/// Upper bound of random Unix timestamps (the largest 32-bit signed value).
pub const MAX_RANDOM_TIMESTAMP: i64 = 2_147_483_647;

/// Duration keys accepted in a date step, with their size in microseconds.
pub const DURATION_UNITS: [(&str, i64); 7] = [
    ("weeks", 7 * 24 * 3_600_000_000),
    ("days", 24 * 3_600_000_000),
    ("hours", 3_600_000_000),
    ("minutes", 60_000_000),
    ("seconds", 1_000_000),
    ("milliseconds", 1_000),
    ("microseconds", 1),
];

/// The Unix epoch as a naive UTC date-time.
pub fn epoch() -> NaiveDateTime {
    NaiveDateTime::default()
}

/// Stateful producer of date values.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGenerator {
    quantity: usize,
    mode: GenerationMode,
    generated_count: usize,
    /// `None` once a step left the representable range
    current_value: Option<NaiveDateTime>,
}

impl DateGenerator {
    pub fn new(quantity: usize, mode: GenerationMode, start: NaiveDateTime) -> Self {
        Self {
            quantity,
            mode,
            generated_count: 0,
            current_value: Some(start),
        }
    }

    pub fn generated_count(&self) -> usize {
        self.generated_count
    }

    /// Values still to be produced.
    pub fn remaining(&self) -> usize {
        self.quantity.saturating_sub(self.generated_count)
    }

    pub(crate) fn next_value<R: Rng + ?Sized>(
        &mut self,
        step: TimeDelta,
        rng: &mut R,
    ) -> Result<NaiveDateTime> {
        let value = match self.mode {
            GenerationMode::Random => {
                let timestamp = rng.gen_range(0..=MAX_RANDOM_TIMESTAMP);
                DateTime::from_timestamp(timestamp, 0)
                    .map(|dt| dt.naive_utc())
                    .ok_or_else(|| Error::invalid(format!("invalid timestamp {timestamp}")))?
            }
            GenerationMode::Increasing => {
                let value = self.current()?;
                self.current_value = value.checked_add_signed(step);
                value
            }
            GenerationMode::Decreasing => {
                let value = self.current()?;
                self.current_value = value.checked_sub_signed(step);
                value
            }
            mode => {
                return Err(Error::InvalidGenerationMode {
                    db_type: DbType::Date,
                    mode,
                })
            }
        };
        self.generated_count += 1;
        Ok(value)
    }

    fn current(&self) -> Result<NaiveDateTime> {
        self.current_value.ok_or_else(|| {
            Error::invalid(format!(
                "date out of range after {} values",
                self.generated_count
            ))
        })
    }
}

/// Parse a date start value.
///
/// Accepts RFC 3339, ISO 8601 date-times with `T` or a space as separator,
/// plain dates, and integer Unix timestamps.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(timestamp) = s.parse::<i64>() {
        return DateTime::from_timestamp(timestamp, 0).map(|dt| dt.naive_utc());
    }

    // Try RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    // Try common date-only format
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

/// Parse a date start written as a scalar.
pub fn date_from_scalar(scalar: &Scalar) -> Result<NaiveDateTime> {
    match scalar {
        Scalar::Integer(timestamp) => DateTime::from_timestamp(*timestamp, 0)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| Error::invalid(format!("timestamp {timestamp} is out of range"))),
        Scalar::Text(s) => {
            parse_date(s).ok_or_else(|| Error::invalid(format!("cannot parse '{s}' as a date")))
        }
        Scalar::Real(v) => Err(Error::invalid(format!("cannot use {v} as a date"))),
    }
}

/// Build a duration from an object such as `{"days": 1, "hours": 12}`.
pub fn duration_from_parts(parts: &BTreeMap<String, Scalar>) -> Result<TimeDelta> {
    let mut micros = 0.0_f64;
    for (key, value) in parts {
        let unit = DURATION_UNITS
            .iter()
            .find(|(name, _)| *name == key.as_str())
            .map(|(_, unit)| *unit)
            .ok_or_else(|| Error::invalid(format!("unknown duration key '{key}'")))?;
        let amount = value
            .as_f64()
            .ok_or_else(|| Error::invalid(format!("duration '{key}' is not a number: {value}")))?;
        micros += amount * unit as f64;
    }

    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return Err(Error::invalid("duration is out of range"));
    }
    Ok(TimeDelta::microseconds(micros.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_increasing_by_one_day() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = datetime(2024, 2, 28, 0, 0, 0);
        let mut generator = DateGenerator::new(3, GenerationMode::Increasing, start);

        let values: Vec<_> = (0..3)
            .map(|_| generator.next_value(TimeDelta::days(1), &mut rng).unwrap())
            .collect();
        assert_eq!(
            values,
            vec![
                start,
                datetime(2024, 2, 29, 0, 0, 0),
                datetime(2024, 3, 1, 0, 0, 0)
            ]
        );
    }

    #[test]
    fn test_decreasing() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator = DateGenerator::new(2, GenerationMode::Decreasing, epoch());
        generator.next_value(TimeDelta::hours(1), &mut rng).unwrap();
        let second = generator.next_value(TimeDelta::hours(1), &mut rng).unwrap();
        assert_eq!(second, datetime(1969, 12, 31, 23, 0, 0));
        assert_eq!(generator.remaining(), 0);
    }

    #[test]
    fn test_random_within_32bit_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator = DateGenerator::new(100, GenerationMode::Random, epoch());
        for _ in 0..100 {
            let value = generator.next_value(TimeDelta::zero(), &mut rng).unwrap();
            assert!(value >= epoch());
            assert!(value.year() <= 2038);
        }
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator = DateGenerator::new(2, GenerationMode::Increasing, NaiveDateTime::MAX);
        assert!(generator.next_value(TimeDelta::days(1), &mut rng).is_ok());
        assert!(matches!(
            generator.next_value(TimeDelta::days(1), &mut rng),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_repeating_is_rejected() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator = DateGenerator::new(1, GenerationMode::Repeating, epoch());
        assert!(matches!(
            generator.next_value(TimeDelta::days(1), &mut rng),
            Err(Error::InvalidGenerationMode { .. })
        ));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = datetime(2024, 1, 15, 10, 30, 0);
        assert_eq!(parse_date("2024-01-15T10:30:00"), Some(expected));
        assert_eq!(parse_date("2024-01-15 10:30:00"), Some(expected));
        assert_eq!(parse_date("2024-01-15 10:30"), Some(expected));
        assert_eq!(parse_date("2024-01-15T10:30:00Z"), Some(expected));
        assert_eq!(parse_date("2024-01-15T12:30:00+02:00"), Some(expected));
        assert_eq!(
            parse_date("2024-01-15"),
            Some(datetime(2024, 1, 15, 0, 0, 0))
        );
        assert_eq!(parse_date("0"), Some(epoch()));
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_date_from_scalar() {
        assert_eq!(
            date_from_scalar(&Scalar::Integer(86_400)).unwrap(),
            datetime(1970, 1, 2, 0, 0, 0)
        );
        assert!(date_from_scalar(&Scalar::Real(1.5)).is_err());
        assert!(date_from_scalar(&Scalar::from("yesterday")).is_err());
    }

    #[test]
    fn test_duration_from_parts() {
        let mut parts = BTreeMap::new();
        parts.insert("days".to_string(), Scalar::from("1"));
        parts.insert("hours".to_string(), Scalar::Integer(12));
        parts.insert("milliseconds".to_string(), Scalar::Real(1.5));
        assert_eq!(
            duration_from_parts(&parts).unwrap(),
            TimeDelta::days(1) + TimeDelta::hours(12) + TimeDelta::microseconds(1_500)
        );

        let mut weeks = BTreeMap::new();
        weeks.insert("weeks".to_string(), Scalar::Integer(2));
        assert_eq!(duration_from_parts(&weeks).unwrap(), TimeDelta::days(14));
    }

    #[test]
    fn test_duration_unknown_key() {
        let mut parts = BTreeMap::new();
        parts.insert("fortnights".to_string(), Scalar::Integer(1));
        match duration_from_parts(&parts) {
            Err(Error::InvalidConfiguration(msg)) => assert!(msg.contains("fortnights")),
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }
}
