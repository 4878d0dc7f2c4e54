//! Context word table
//!
//! Collects, for every recognized term, the non-term words directly next to
//! it. Each sentence is scanned twice:
//!
//! - forward, growing a buffer from the left and looking at the word *after*
//!   it;
//! - backward, growing a buffer from the right and looking at the word
//!   *before* it.
//!
//! The buffer keeps growing while the two-token window it was extended over
//! is a partial candidate match, and is cleared otherwise. A neighbour is
//! recorded when the buffer text is a known term, the neighbour's own
//! surface is not a term, and the neighbour's tag is a context tag.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::nlp::pos::TagMapper;
use crate::phrase::frequency::FrequencyTable;
use crate::phrase::pattern::is_partial_match;
use crate::types::{ContextCounting, Sentence, Token};

/// A term seen next to a context word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub term: String,
    pub count: u64,
}

/// (context word, term) pairs observed in one sentence, in scan order
#[derive(Debug, Default)]
struct SentenceObservations {
    forward: Vec<(String, String)>,
    backward: Vec<(String, String)>,
}

/// Context word -> associated terms, both in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextTable {
    word_to_id: FxHashMap<String, u32>,
    words: Vec<String>,
    associations: Vec<Vec<Association>>,
    counting: ContextCounting,
}

impl ContextTable {
    /// Create an empty table with the given counting policy
    pub fn new(counting: ContextCounting) -> Self {
        Self {
            counting,
            ..Self::default()
        }
    }

    /// Scan a corpus against the terms of `frequencies`.
    ///
    /// All forward scans run before all backward scans.
    pub fn build(
        corpus: &[Sentence],
        mapper: &TagMapper,
        frequencies: &FrequencyTable,
        counting: ContextCounting,
    ) -> Self {
        let observations: Vec<SentenceObservations> = corpus
            .iter()
            .map(|sentence| observe_sentence(sentence, mapper, frequencies))
            .collect();
        Self::from_observations(observations, counting)
    }

    /// Same as [`ContextTable::build`], scanning sentences in parallel
    pub fn build_parallel(
        corpus: &[Sentence],
        mapper: &TagMapper,
        frequencies: &FrequencyTable,
        counting: ContextCounting,
    ) -> Self {
        let observations: Vec<SentenceObservations> = corpus
            .par_iter()
            .map(|sentence| observe_sentence(sentence, mapper, frequencies))
            .collect();
        Self::from_observations(observations, counting)
    }

    fn from_observations(observations: Vec<SentenceObservations>, counting: ContextCounting) -> Self {
        let mut table = Self::new(counting);
        let (forward, backward): (Vec<_>, Vec<_>) = observations
            .into_iter()
            .map(|o| (o.forward, o.backward))
            .unzip();

        for (word, term) in forward.into_iter().flatten() {
            table.observe(word, term);
        }
        for (word, term) in backward.into_iter().flatten() {
            table.observe(word, term);
        }
        table
    }

    /// Record that `word` appeared next to `term`.
    ///
    /// With [`ContextCounting::Capped`] the first term seen with a word is
    /// its only association and keeps a count of 1. With
    /// [`ContextCounting::Accumulate`] every distinct term is appended and
    /// repeated pairs are counted.
    pub fn observe(&mut self, word: String, term: String) {
        let id = match self.word_to_id.get(&word) {
            Some(&id) => id as usize,
            None => {
                let id = self.words.len();
                self.word_to_id.insert(word.clone(), id as u32);
                self.words.push(word);
                self.associations.push(vec![Association { term, count: 1 }]);
                return;
            }
        };

        if self.counting == ContextCounting::Capped {
            return;
        }

        let associations = &mut self.associations[id];
        match associations.iter_mut().find(|a| a.term == term) {
            Some(existing) => existing.count += 1,
            None => associations.push(Association { term, count: 1 }),
        }
    }

    /// Counting policy of this table
    pub fn counting(&self) -> ContextCounting {
        self.counting
    }

    /// Number of distinct context words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Associations of a context word; empty if the word was never seen
    pub fn associations(&self, word: &str) -> &[Association] {
        match self.word_to_id.get(word) {
            Some(&id) => &self.associations[id as usize],
            None => &[],
        }
    }

    /// Iterate over (context word, associations) in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Association])> {
        self.words
            .iter()
            .map(String::as_str)
            .zip(self.associations.iter().map(Vec::as_slice))
    }
}

fn observe_sentence(
    sentence: &Sentence,
    mapper: &TagMapper,
    frequencies: &FrequencyTable,
) -> SentenceObservations {
    SentenceObservations {
        forward: scan_forward(sentence, mapper, frequencies),
        backward: scan_backward(sentence, mapper, frequencies),
    }
}

/// Whether `neighbour` should be recorded as a context word of `buffer`
fn is_context_of(
    buffer: &str,
    neighbour: &Token,
    mapper: &TagMapper,
    frequencies: &FrequencyTable,
) -> bool {
    frequencies.contains(buffer)
        && !frequencies.contains(&neighbour.surface)
        && mapper.is_context_token(neighbour)
}

/// Whether a window of two adjacent tokens keeps the buffer alive
fn window_continues(left: &Token, right: &Token, mapper: &TagMapper) -> bool {
    is_partial_match(&[mapper.token_category(left), mapper.token_category(right)])
}

fn scan_forward(
    sentence: &Sentence,
    mapper: &TagMapper,
    frequencies: &FrequencyTable,
) -> Vec<(String, String)> {
    let mut found = Vec::new();
    let mut buffer = String::new();

    for pair in sentence.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        buffer.push_str(&current.surface);

        if is_context_of(&buffer, next, mapper, frequencies) {
            found.push((next.surface.clone(), buffer.clone()));
        }

        if !window_continues(current, next, mapper) {
            buffer.clear();
        }
    }

    found
}

fn scan_backward(
    sentence: &Sentence,
    mapper: &TagMapper,
    frequencies: &FrequencyTable,
) -> Vec<(String, String)> {
    let mut found = Vec::new();
    let mut buffer = String::new();

    for pair in sentence.windows(2).rev() {
        let (previous, current) = (&pair[0], &pair[1]);
        buffer.insert_str(0, &current.surface);

        if is_context_of(&buffer, previous, mapper, frequencies) {
            found.push((previous.surface.clone(), buffer.clone()));
        }

        if !window_continues(previous, current, mapper) {
            buffer.clear();
        }
    }

    found
}
