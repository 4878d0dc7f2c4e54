//! Core types shared across the extraction pipeline

use serde::{Deserialize, Serialize};

use crate::errors::{ExtractionError, Result};

/// A single tagged token as produced by an external morphological analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Surface form as it appeared in the text
    pub surface: String,
    /// Raw part-of-speech tag (may be a comma-separated feature list)
    pub tag: String,
}

impl Token {
    /// Create a new token
    pub fn new(surface: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            tag: tag.into(),
        }
    }
}

/// An ordered run of tokens. Adjacency inside a sentence drives both span
/// recognition and context association; nothing crosses sentence borders.
pub type Sentence = Vec<Token>;

/// How repeated co-occurrences of a context word with a term are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextCounting {
    /// A context word keeps only the first term seen next to it, with a
    /// count of 1.
    #[default]
    Capped,
    /// Every distinct term is kept and each repeated co-occurrence
    /// increments its count.
    Accumulate,
}

/// Tag inventory preset used to build the category mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tagset {
    /// KyTea / UniDic major tags (`接頭辞` for prefixes)
    #[default]
    Unidic,
    /// MeCab IPADIC major tags (`接頭詞` for prefixes)
    Ipadic,
}

/// Configuration for term extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Weight of the C-value in the NC-value blend
    pub cvalue_weight: f64,
    /// Weight of the context factor in the NC-value blend
    pub context_weight: f64,
    /// Counting policy for context associations
    pub context_counting: ContextCounting,
    /// Tag inventory of the tagger that produced the corpus
    pub tagset: Tagset,
    /// Whether sentence-level work may run on the rayon pool
    pub parallel: bool,
    /// Corpus size (in tokens) below which processing stays sequential
    pub parallel_min_tokens: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            cvalue_weight: 0.8,
            context_weight: 0.2,
            context_counting: ContextCounting::Capped,
            tagset: Tagset::Unidic,
            parallel: true,
            parallel_min_tokens: 1000,
        }
    }
}

impl ExtractionConfig {
    /// Parse a JSON configuration document and validate it.
    ///
    /// Omitted fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the NC-value blend weights
    pub fn with_weights(mut self, cvalue_weight: f64, context_weight: f64) -> Self {
        self.cvalue_weight = cvalue_weight;
        self.context_weight = context_weight;
        self
    }

    /// Set the context counting policy
    pub fn with_context_counting(mut self, counting: ContextCounting) -> Self {
        self.context_counting = counting;
        self
    }

    /// Set the tag inventory
    pub fn with_tagset(mut self, tagset: Tagset) -> Self {
        self.tagset = tagset;
        self
    }

    /// Enable or disable parallel sentence processing
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("cvalue_weight", self.cvalue_weight),
            ("context_weight", self.context_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ExtractionError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        Ok(())
    }

    /// Whether a corpus of `num_tokens` tokens should be processed in parallel
    pub(crate) fn use_parallel(&self, num_tokens: usize) -> bool {
        self.parallel && num_tokens >= self.parallel_min_tokens
    }
}
