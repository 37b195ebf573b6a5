//! String value generator.

use super::realistic;
use crate::words::WordLists;
use mockdb_core::{DbType, Error, GenerationMode, Result};
use rand::Rng;
use std::sync::Arc;

/// Stateful producer of string values.
///
/// In Repeating mode the generator keeps a pool of distinct strings; the
/// value at position `p` is `pool[p % modulus]` once the pool is full.
#[derive(Debug, Clone)]
pub struct StringGenerator {
    quantity: usize,
    mode: GenerationMode,
    generated_count: usize,
    pool: Vec<String>,
    words: Arc<WordLists>,
}

impl StringGenerator {
    pub fn new(quantity: usize, mode: GenerationMode, words: Arc<WordLists>) -> Self {
        Self {
            quantity,
            mode,
            generated_count: 0,
            pool: Vec::new(),
            words,
        }
    }

    pub fn generated_count(&self) -> usize {
        self.generated_count
    }

    /// Values still to be produced.
    pub fn remaining(&self) -> usize {
        self.quantity.saturating_sub(self.generated_count)
    }

    /// Distinct strings collected so far in Repeating mode.
    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub(crate) fn check_pattern(&self, pattern: usize) -> Result<()> {
        if self.mode == GenerationMode::Repeating && pattern == 0 {
            return Err(Error::invalid("repeating modulus must be positive, got 0"));
        }
        Ok(())
    }

    pub(crate) fn next_value<R: Rng + ?Sized>(
        &mut self,
        pattern: usize,
        rng: &mut R,
    ) -> Result<String> {
        let value = match self.mode {
            GenerationMode::Random => realistic::random_letters(rng, pattern),
            GenerationMode::Repeating => {
                if self.pool.len() < pattern {
                    let mut candidate = realistic::random_letters(rng, pattern);
                    while self.pool.contains(&candidate) {
                        candidate = realistic::random_letters(rng, pattern);
                    }
                    self.pool.push(candidate.clone());
                    candidate
                } else {
                    self.pool[self.generated_count % pattern].clone()
                }
            }
            GenerationMode::NameSurname => realistic::name_surname(rng, &self.words),
            GenerationMode::Email => realistic::email(rng, &self.words),
            GenerationMode::Phone => realistic::phone(rng),
            GenerationMode::NaturalText => realistic::natural_text(rng, &self.words, pattern),
            mode => {
                return Err(Error::InvalidGenerationMode {
                    db_type: DbType::String,
                    mode,
                })
            }
        };
        self.generated_count += 1;
        Ok(value)
    }
}
