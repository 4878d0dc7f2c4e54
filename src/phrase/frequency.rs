//! Candidate frequency table
//!
//! Scans each sentence once, recognizing candidate spans with the
//! [`PatternAutomaton`] and counting them. Candidates found in one unbroken
//! run are nested in each other, so when the run ends every candidate also
//! receives one extra count for each longer candidate found after it.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::pattern::{PatternAutomaton, Transition};
use crate::nlp::pos::TagMapper;
use crate::types::Sentence;

/// Count and token length of a candidate term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyEntry {
    /// Occurrences, including counts redistributed from longer candidates
    pub count: u64,
    /// Number of tokens the term had when first recorded
    pub word_length: usize,
}

/// Candidate terms with their frequencies, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    /// Maps term -> index into `terms`/`entries`
    term_to_id: FxHashMap<String, u32>,
    terms: Vec<String>,
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from a tagged corpus, one sentence at a time
    pub fn from_corpus(corpus: &[Sentence], mapper: &TagMapper) -> Self {
        let mut table = Self::new();
        for sentence in corpus {
            table.scan_sentence(sentence, mapper);
        }
        table
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether `term` is a recorded candidate
    pub fn contains(&self, term: &str) -> bool {
        self.term_to_id.contains_key(term)
    }

    /// Get the entry for a term
    pub fn get(&self, term: &str) -> Option<&FrequencyEntry> {
        self.term_to_id
            .get(term)
            .map(|&id| &self.entries[id as usize])
    }

    /// Get the count for a term, 0 if absent
    pub fn count(&self, term: &str) -> u64 {
        self.get(term).map_or(0, |e| e.count)
    }

    /// Get the position of a term in first-seen order
    pub fn term_id(&self, term: &str) -> Option<u32> {
        self.term_to_id.get(term).copied()
    }

    /// Iterate over terms in first-seen order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Iterate over (term, entry) pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrequencyEntry)> {
        self.terms
            .iter()
            .map(String::as_str)
            .zip(self.entries.iter())
    }

    /// Record one occurrence of `term`.
    ///
    /// `word_length` only takes effect when the term is new.
    pub fn record(&mut self, term: &str, word_length: usize) {
        if let Some(&id) = self.term_to_id.get(term) {
            self.entries[id as usize].count += 1;
            return;
        }

        let id = self.terms.len() as u32;
        self.term_to_id.insert(term.to_string(), id);
        self.terms.push(term.to_string());
        self.entries.push(FrequencyEntry {
            count: 1,
            word_length,
        });
    }

    /// Add `extra` to the count of an existing term
    fn add_count(&mut self, term: &str, extra: u64) {
        if let Some(&id) = self.term_to_id.get(term) {
            self.entries[id as usize].count += extra;
        }
    }

    /// Merge another table into this one.
    ///
    /// Counts are summed; for terms already present the existing word
    /// length wins. New terms are appended in `other`'s order.
    pub fn merge(&mut self, other: FrequencyTable) {
        for (term, entry) in other.terms.into_iter().zip(other.entries) {
            match self.term_to_id.get(&term) {
                Some(&id) => self.entries[id as usize].count += entry.count,
                None => {
                    let id = self.terms.len() as u32;
                    self.term_to_id.insert(term.clone(), id);
                    self.terms.push(term);
                    self.entries.push(entry);
                }
            }
        }
    }

    /// Scan one sentence and update the table
    fn scan_sentence(&mut self, sentence: &Sentence, mapper: &TagMapper) {
        let mut automaton = PatternAutomaton::new();
        let mut surface = String::new();
        let mut length = 0usize;
        // Candidates of the current run, shortest first
        let mut run: Vec<String> = Vec::new();

        for token in sentence {
            let category = mapper.token_category(token);
            let mut transition = automaton.feed(category);

            if transition == Transition::Rejected {
                self.redistribute(&run);
                run.clear();
                surface.clear();
                length = 0;
                automaton.reset();

                // The breaking token may still open a span of its own.
                transition = automaton.feed(category);
                if transition == Transition::Rejected {
                    continue;
                }
            }

            surface.push_str(&token.surface);
            length += 1;

            if transition == Transition::Complete {
                self.record(&surface, length);
                run.push(surface.clone());
            }
        }

        // A sentence end is a hard break.
        self.redistribute(&run);
    }

    /// Credit each candidate of a finished run with the longer candidates
    /// found after it.
    fn redistribute(&mut self, run: &[String]) {
        let n = run.len();
        for (i, term) in run.iter().enumerate() {
            let extra = (n - 1 - i) as u64;
            if extra > 0 {
                self.add_count(term, extra);
            }
        }
    }
}

/// Build the frequency table sequentially
pub fn build_frequency_table(corpus: &[Sentence], mapper: &TagMapper) -> FrequencyTable {
    FrequencyTable::from_corpus(corpus, mapper)
}

/// Build the frequency table with one task per sentence.
///
/// Partial tables are merged in corpus order, so the result (including
/// iteration order) matches [`build_frequency_table`].
pub fn build_frequency_table_parallel(corpus: &[Sentence], mapper: &TagMapper) -> FrequencyTable {
    let partial_tables: Vec<FrequencyTable> = corpus
        .par_iter()
        .map(|sentence| {
            let mut table = FrequencyTable::new();
            table.scan_sentence(sentence, mapper);
            table
        })
        .collect();

    let mut table = FrequencyTable::new();
    for partial in partial_tables {
        table.merge(partial);
    }
    table
}
