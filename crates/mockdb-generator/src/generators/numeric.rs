//! Integer and real value generators.

use mockdb_core::{DbType, Error, GenerationMode, Result};
use rand::Rng;

/// Stateful producer of integer values.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerGenerator {
    quantity: usize,
    mode: GenerationMode,
    generated_count: usize,
    /// `None` once a step overflowed `i64`
    current_value: Option<i64>,
}

impl IntegerGenerator {
    pub fn new(quantity: usize, mode: GenerationMode, start: i64) -> Self {
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

    /// Reject patterns the current mode cannot work with.
    pub(crate) fn check_pattern(&self, pattern: i64) -> Result<()> {
        match self.mode {
            GenerationMode::Random if pattern < 0 => Err(Error::invalid(format!(
                "random integer bound must be non-negative, got {pattern}"
            ))),
            GenerationMode::Repeating if pattern <= 0 => Err(Error::invalid(format!(
                "repeating modulus must be positive, got {pattern}"
            ))),
            _ => Ok(()),
        }
    }

    pub(crate) fn next_value<R: Rng + ?Sized>(&mut self, pattern: i64, rng: &mut R) -> Result<i64> {
        let value = match self.mode {
            GenerationMode::Random => rng.gen_range(0..=pattern),
            GenerationMode::Increasing => {
                let value = self.current()?;
                self.current_value = value.checked_add(pattern);
                value
            }
            GenerationMode::Decreasing => {
                let value = self.current()?;
                self.current_value = value.checked_sub(pattern);
                value
            }
            GenerationMode::Repeating => {
                let value = self.current()?;
                let produced = (self.generated_count + 1) as u64;
                self.current_value = if produced % pattern.unsigned_abs() == 0 {
                    Some(0)
                } else {
                    value.checked_add(1)
                };
                value
            }
            mode => {
                return Err(Error::InvalidGenerationMode {
                    db_type: DbType::Integer,
                    mode,
                })
            }
        };
        self.generated_count += 1;
        Ok(value)
    }

    fn current(&self) -> Result<i64> {
        self.current_value.ok_or_else(|| {
            Error::invalid(format!(
                "integer overflow after {} values",
                self.generated_count
            ))
        })
    }
}

/// Stateful producer of real values.
#[derive(Debug, Clone, PartialEq)]
pub struct RealGenerator {
    quantity: usize,
    mode: GenerationMode,
    generated_count: usize,
    current_value: f64,
}

impl RealGenerator {
    pub fn new(quantity: usize, mode: GenerationMode, start: f64) -> Self {
        Self {
            quantity,
            mode,
            generated_count: 0,
            current_value: start,
        }
    }

    pub fn generated_count(&self) -> usize {
        self.generated_count
    }

    /// Values still to be produced.
    pub fn remaining(&self) -> usize {
        self.quantity.saturating_sub(self.generated_count)
    }

    pub(crate) fn check_pattern(&self, pattern: f64) -> Result<()> {
        if self.mode == GenerationMode::Repeating && (pattern.is_nan() || pattern <= 0.0) {
            return Err(Error::invalid(format!(
                "repeating modulus must be positive, got {pattern}"
            )));
        }
        Ok(())
    }

    pub(crate) fn next_value<R: Rng + ?Sized>(&mut self, pattern: f64, rng: &mut R) -> Result<f64> {
        let value = match self.mode {
            GenerationMode::Random => rng.gen::<f64>() * pattern,
            GenerationMode::Increasing => {
                let value = self.current_value;
                self.current_value += pattern;
                value
            }
            GenerationMode::Decreasing => {
                let value = self.current_value;
                self.current_value -= pattern;
                value
            }
            GenerationMode::Repeating => {
                let value = self.current_value;
                let produced = (self.generated_count + 1) as f64;
                self.current_value = if produced % pattern == 0.0 {
                    0.0
                } else {
                    value + 1.0
                };
                value
            }
            mode => {
                return Err(Error::InvalidGenerationMode {
                    db_type: DbType::Real,
                    mode,
                })
            }
        };
        self.generated_count += 1;
        Ok(value)
    }
}
