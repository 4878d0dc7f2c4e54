//! Termhood scores
//!
//! This module provides the C-value calculation and the NC-value blend and
//! ranking, along with the score table they share.

pub mod cvalue;
pub mod ncvalue;

use rustc_hash::FxHashMap;

/// Per-term scores in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    term_to_id: FxHashMap<String, u32>,
    terms: Vec<String>,
    scores: Vec<f64>,
}

impl ScoreTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a score, or add to it if the term is already present
    pub fn add(&mut self, term: &str, score: f64) {
        if let Some(&id) = self.term_to_id.get(term) {
            self.scores[id as usize] += score;
            return;
        }

        let id = self.terms.len() as u32;
        self.term_to_id.insert(term.to_string(), id);
        self.terms.push(term.to_string());
        self.scores.push(score);
    }

    /// Get the score for a term
    pub fn get(&self, term: &str) -> Option<f64> {
        self.term_to_id
            .get(term)
            .map(|&id| self.scores[id as usize])
    }

    /// Get the score for a term, 0 if absent
    pub fn score(&self, term: &str) -> f64 {
        self.get(term).unwrap_or(0.0)
    }

    /// Whether the term has a score
    pub fn contains(&self, term: &str) -> bool {
        self.term_to_id.contains_key(term)
    }

    /// Number of scored terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over (term, score) in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.terms
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }
}

impl<'a> FromIterator<(&'a str, f64)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut table = ScoreTable::new();
        for (term, score) in iter {
            table.add(term, score);
        }
        table
    }
}
