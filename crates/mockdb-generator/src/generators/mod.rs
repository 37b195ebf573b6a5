//! Value generators for each column type.
//!
//! A [`ValueGenerator`] is built once per column by [`ValueGenerator::new`],
//! then asked for values with [`ValueGenerator::generate`]. The returned
//! [`Values`] iterator is lazy: it yields at most the generator's remaining
//! quantity and can be dropped part-way. A later call to `generate` resumes
//! from the persistent counters.

pub mod date;
pub mod numeric;
pub mod realistic;
pub mod string;

pub use date::DateGenerator;
pub use numeric::{IntegerGenerator, RealGenerator};
pub use string::StringGenerator;

use crate::words::WordLists;
use mockdb_core::{DbType, Error, GeneratedValue, GenerationMode, Pattern, Result};
use rand::Rng;
use std::sync::Arc;

/// Generator for one column, dispatching on the column type.
#[derive(Debug, Clone)]
pub enum ValueGenerator {
    Integer(IntegerGenerator),
    Real(RealGenerator),
    Date(DateGenerator),
    String(StringGenerator),
}

impl ValueGenerator {
    /// Build a generator for `quantity` values of `db_type`.
    ///
    /// Fails with `InvalidGenerationMode` when `mode` is not allowed for the
    /// type, `InvalidConfiguration` when a start is given for a string, and
    /// `TypeMismatch` when the start does not match the type. Without a
    /// start, generation begins at `0`, `0.0` or the Unix epoch.
    pub fn new(
        db_type: DbType,
        quantity: usize,
        mode: GenerationMode,
        start: Option<GeneratedValue>,
        words: Arc<WordLists>,
    ) -> Result<Self> {
        db_type.check_mode(mode)?;

        let generator = match (db_type, start) {
            (DbType::String, Some(_)) => {
                return Err(Error::invalid(
                    "a starting value cannot be given for type STRING",
                ))
            }
            (DbType::String, None) => {
                ValueGenerator::String(StringGenerator::new(quantity, mode, words))
            }
            (DbType::Integer, None) => {
                ValueGenerator::Integer(IntegerGenerator::new(quantity, mode, 0))
            }
            (DbType::Integer, Some(GeneratedValue::Integer(start))) => {
                ValueGenerator::Integer(IntegerGenerator::new(quantity, mode, start))
            }
            (DbType::Real, None) => ValueGenerator::Real(RealGenerator::new(quantity, mode, 0.0)),
            (DbType::Real, Some(GeneratedValue::Real(start))) => {
                ValueGenerator::Real(RealGenerator::new(quantity, mode, start))
            }
            (DbType::Real, Some(GeneratedValue::Integer(start))) => {
                ValueGenerator::Real(RealGenerator::new(quantity, mode, start as f64))
            }
            (DbType::Date, None) => {
                ValueGenerator::Date(DateGenerator::new(quantity, mode, date::epoch()))
            }
            (DbType::Date, Some(GeneratedValue::Date(start))) => {
                ValueGenerator::Date(DateGenerator::new(quantity, mode, start))
            }
            (db_type, Some(other)) => {
                return Err(Error::TypeMismatch {
                    expected: value_kind(db_type),
                    found: other.kind(),
                })
            }
        };
        Ok(generator)
    }

    pub fn db_type(&self) -> DbType {
        match self {
            ValueGenerator::Integer(_) => DbType::Integer,
            ValueGenerator::Real(_) => DbType::Real,
            ValueGenerator::Date(_) => DbType::Date,
            ValueGenerator::String(_) => DbType::String,
        }
    }

    /// Values produced so far, across every `generate` call.
    pub fn generated_count(&self) -> usize {
        match self {
            ValueGenerator::Integer(g) => g.generated_count(),
            ValueGenerator::Real(g) => g.generated_count(),
            ValueGenerator::Date(g) => g.generated_count(),
            ValueGenerator::String(g) => g.generated_count(),
        }
    }

    /// Values still to be produced.
    pub fn remaining(&self) -> usize {
        match self {
            ValueGenerator::Integer(g) => g.remaining(),
            ValueGenerator::Real(g) => g.remaining(),
            ValueGenerator::Date(g) => g.remaining(),
            ValueGenerator::String(g) => g.remaining(),
        }
    }

    /// Pattern kind this generator accepts, as named in errors.
    fn pattern_kind(&self) -> &'static str {
        match self {
            ValueGenerator::Integer(_) => "integer",
            ValueGenerator::Real(_) => "real",
            ValueGenerator::Date(_) => "duration",
            ValueGenerator::String(_) => "count",
        }
    }

    /// Start producing values with `pattern`.
    ///
    /// The pattern kind is checked here: Integer needs an integer, Real a
    /// real or an integer, Date a duration and String a count.
    pub fn generate<'a, R: Rng + ?Sized>(
        &'a mut self,
        pattern: Pattern,
        rng: &'a mut R,
    ) -> Result<Values<'a, R>> {
        let pattern = match (&*self, pattern) {
            (ValueGenerator::Integer(g), Pattern::Integer(p)) => {
                g.check_pattern(p)?;
                Pattern::Integer(p)
            }
            (ValueGenerator::Real(g), Pattern::Real(p)) => {
                g.check_pattern(p)?;
                Pattern::Real(p)
            }
            (ValueGenerator::Real(g), Pattern::Integer(p)) => {
                let p = p as f64;
                g.check_pattern(p)?;
                Pattern::Real(p)
            }
            (ValueGenerator::Date(_), Pattern::Duration(step)) => Pattern::Duration(step),
            (ValueGenerator::String(g), Pattern::Count(n)) => {
                g.check_pattern(n)?;
                Pattern::Count(n)
            }
            (generator, other) => {
                return Err(Error::TypeMismatch {
                    expected: generator.pattern_kind(),
                    found: other.kind(),
                })
            }
        };

        Ok(Values {
            generator: self,
            pattern,
            rng,
            failed: false,
        })
    }

    /// Produce every remaining value, stopping at the first error.
    pub fn generate_all<R: Rng + ?Sized>(
        &mut self,
        pattern: Pattern,
        rng: &mut R,
    ) -> Result<Vec<GeneratedValue>> {
        self.generate(pattern, rng)?.collect()
    }
}

/// Lazy sequence of generated values.
///
/// Yields `Err` at most once, and nothing after it.
pub struct Values<'a, R: Rng + ?Sized> {
    generator: &'a mut ValueGenerator,
    pattern: Pattern,
    rng: &'a mut R,
    failed: bool,
}

impl<R: Rng + ?Sized> Iterator for Values<'_, R> {
    type Item = Result<GeneratedValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.generator.remaining() == 0 {
            return None;
        }

        let rng = &mut *self.rng;
        let result = match (&mut *self.generator, self.pattern) {
            (ValueGenerator::Integer(g), Pattern::Integer(p)) => {
                g.next_value(p, rng).map(GeneratedValue::Integer)
            }
            (ValueGenerator::Real(g), Pattern::Real(p)) => {
                g.next_value(p, rng).map(GeneratedValue::Real)
            }
            (ValueGenerator::Date(g), Pattern::Duration(step)) => {
                g.next_value(step, rng).map(GeneratedValue::Date)
            }
            (ValueGenerator::String(g), Pattern::Count(n)) => {
                g.next_value(n, rng).map(GeneratedValue::String)
            }
            (generator, pattern) => Err(Error::TypeMismatch {
                expected: generator.pattern_kind(),
                found: pattern.kind(),
            }),
        };

        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.generator.remaining()))
        }
    }
}

/// Value kind of a column type, as named in errors.
fn value_kind(db_type: DbType) -> &'static str {
    match db_type {
        DbType::Integer => "integer",
        DbType::Real => "real",
        DbType::Date => "date",
        DbType::String => "string",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words() -> Arc<WordLists> {
        WordLists::builtin()
    }

    #[test]
    fn test_factory_rejects_invalid_mode() {
        let result = ValueGenerator::new(
            DbType::Date,
            3,
            GenerationMode::Repeating,
            None,
            words(),
        );
        assert!(matches!(
            result,
            Err(Error::InvalidGenerationMode {
                db_type: DbType::Date,
                ..
            })
        ));

        let result = ValueGenerator::new(
            DbType::String,
            3,
            GenerationMode::Increasing,
            None,
            words(),
        );
        assert!(matches!(result, Err(Error::InvalidGenerationMode { .. })));
    }

    #[test]
    fn test_factory_rejects_string_start() {
        let result = ValueGenerator::new(
            DbType::String,
            3,
            GenerationMode::Random,
            Some(GeneratedValue::from("abc")),
            words(),
        );
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_factory_rejects_mismatched_start() {
        let result = ValueGenerator::new(
            DbType::Integer,
            3,
            GenerationMode::Increasing,
            Some(GeneratedValue::Real(1.5)),
            words(),
        );
        assert!(matches!(
            result,
            Err(Error::TypeMismatch {
                expected: "integer",
                found: "real"
            })
        ));
    }

    #[test]
    fn test_integer_increasing_from_zero() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator =
            ValueGenerator::new(DbType::Integer, 3, GenerationMode::Increasing, None, words())
                .unwrap();

        let values = generator.generate_all(Pattern::Integer(1), &mut rng).unwrap();
        assert_eq!(
            values,
            vec![
                GeneratedValue::Integer(0),
                GeneratedValue::Integer(1),
                GeneratedValue::Integer(2)
            ]
        );
    }

    #[test]
    fn test_real_widens_integer_pattern_and_start() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator = ValueGenerator::new(
            DbType::Real,
            3,
            GenerationMode::Decreasing,
            Some(GeneratedValue::Integer(3)),
            words(),
        )
        .unwrap();

        let values = generator.generate_all(Pattern::Integer(1), &mut rng).unwrap();
        assert_eq!(
            values,
            vec![
                GeneratedValue::Real(3.0),
                GeneratedValue::Real(2.0),
                GeneratedValue::Real(1.0)
            ]
        );
    }

    #[test]
    fn test_pattern_kind_mismatch() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator =
            ValueGenerator::new(DbType::Date, 3, GenerationMode::Increasing, None, words())
                .unwrap();

        let result = generator.generate(Pattern::Integer(1), &mut rng);
        assert!(matches!(
            result,
            Err(Error::TypeMismatch {
                expected: "duration",
                found: "integer"
            })
        ));
    }

    #[test]
    fn test_partial_consumption_then_resume() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator =
            ValueGenerator::new(DbType::Integer, 5, GenerationMode::Increasing, None, words())
                .unwrap();

        let first: Vec<_> = generator
            .generate(Pattern::Integer(10), &mut rng)
            .unwrap()
            .take(2)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            first,
            vec![GeneratedValue::Integer(0), GeneratedValue::Integer(10)]
        );
        assert_eq!(generator.generated_count(), 2);

        // A fresh pattern applies from the current value onwards
        let rest = generator.generate_all(Pattern::Integer(1), &mut rng).unwrap();
        assert_eq!(
            rest,
            vec![
                GeneratedValue::Integer(20),
                GeneratedValue::Integer(21),
                GeneratedValue::Integer(22)
            ]
        );
        assert_eq!(generator.remaining(), 0);
        assert!(generator.generate_all(Pattern::Integer(1), &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_zero_modulus_rejected_at_generate() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator =
            ValueGenerator::new(DbType::Integer, 3, GenerationMode::Repeating, None, words())
                .unwrap();
        assert!(matches!(
            generator.generate(Pattern::Integer(0), &mut rng),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_overflow_ends_sequence_with_error() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator = ValueGenerator::new(
            DbType::Integer,
            5,
            GenerationMode::Increasing,
            Some(GeneratedValue::Integer(i64::MAX)),
            words(),
        )
        .unwrap();

        let items: Vec<_> = generator
            .generate(Pattern::Integer(1), &mut rng)
            .unwrap()
            .collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(matches!(items[1], Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_date_default_start_is_epoch() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator =
            ValueGenerator::new(DbType::Date, 2, GenerationMode::Increasing, None, words())
                .unwrap();
        let values = generator
            .generate_all(Pattern::Duration(TimeDelta::days(1)), &mut rng)
            .unwrap();
        assert_eq!(values[0].to_string(), "1970-01-01 00:00:00");
        assert_eq!(values[1].to_string(), "1970-01-02 00:00:00");
    }

    #[test]
    fn test_string_repeating_sequence() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator =
            ValueGenerator::new(DbType::String, 5, GenerationMode::Repeating, None, words())
                .unwrap();
        let values = generator.generate_all(Pattern::Count(2), &mut rng).unwrap();

        assert_ne!(values[0], values[1]);
        assert_eq!(values[0], values[2]);
        assert_eq!(values[1], values[3]);
        assert_eq!(values[0], values[4]);
    }

    #[test]
    fn test_size_hint_upper_bound() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator =
            ValueGenerator::new(DbType::Integer, 4, GenerationMode::Random, None, words())
                .unwrap();
        let values = generator.generate(Pattern::Integer(9), &mut rng).unwrap();
        assert_eq!(values.size_hint(), (0, Some(4)));
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(42);
            let mut generator =
                ValueGenerator::new(DbType::String, 10, GenerationMode::Random, None, words())
                    .unwrap();
            generator.generate_all(Pattern::Count(8), &mut rng).unwrap()
        };
        assert_eq!(run(), run());
    }
}
