//! Options controlling schema generation.

use crate::words::WordLists;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Order in which attribute data is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationOrder {
    /// Every plain column first, then foreign keys by chain depth, so every
    /// key copies its referenced data.
    #[default]
    Dependency,
    /// Tables and attributes in declaration order. A key whose target is not
    /// generated yet gets independently generated values.
    Declared,
}

impl fmt::Display for GenerationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationOrder::Dependency => f.write_str("dependency"),
            GenerationOrder::Declared => f.write_str("declared"),
        }
    }
}

/// How a foreign key picks its value for each materialized row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForeignKeySampling {
    /// A uniformly random index into the referenced data, drawn per row.
    #[default]
    Random,
    /// Row `i` takes index `i % len`.
    Positional,
}

impl fmt::Display for ForeignKeySampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForeignKeySampling::Random => f.write_str("random"),
            ForeignKeySampling::Positional => f.write_str("positional"),
        }
    }
}

/// Library-level generation settings.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Seed for reproducible output; entropy when `None`
    pub seed: Option<u64>,
    pub order: GenerationOrder,
    /// Word lists for realistic strings; the built-in lists when `None`
    pub words: Option<Arc<WordLists>>,
}

impl GenerateOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_order(mut self, order: GenerationOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_words(mut self, words: Arc<WordLists>) -> Self {
        self.words = Some(words);
        self
    }

    /// Build the mutable context a generation pass runs with.
    pub fn context(&self) -> GenerationContext {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GenerationContext {
            rng,
            words: self.words.clone().unwrap_or_else(WordLists::builtin),
            order: self.order,
        }
    }
}

/// Random source, word lists and order shared by one generation pass.
#[derive(Debug)]
pub struct GenerationContext {
    pub rng: StdRng,
    pub words: Arc<WordLists>,
    pub order: GenerationOrder,
}

impl GenerationContext {
    /// Deterministic context with the built-in word lists.
    pub fn seeded(seed: u64) -> Self {
        GenerateOptions::default().with_seed(seed).context()
    }
}
