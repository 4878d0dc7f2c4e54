//! C-value calculation
//!
//! ```text
//! cvalue(a) = log2(|a|) * f(a)                                 if a is not nested
//! cvalue(a) = log2(|a|) * (f(a) - (1 / |T_a|) * Σ_{b ∈ T_a} f(b))  otherwise
//! ```
//!
//! where `|a|` is the term's token length and `T_a` the terms containing it.
//! Single-token terms score 0.

use super::ScoreTable;
use crate::phrase::containment::ContainmentTable;
use crate::phrase::frequency::{FrequencyEntry, FrequencyTable};

/// C-value of a single term given the counts of the terms containing it
pub fn cvalue(entry: &FrequencyEntry, container_counts: &[u64]) -> f64 {
    let length_factor = (entry.word_length as f64).log2();
    let frequency = entry.count as f64;

    if container_counts.is_empty() {
        return length_factor * frequency;
    }

    let total_fb: f64 = container_counts.iter().map(|&c| c as f64).sum();
    let share = 1.0 / container_counts.len() as f64;
    length_factor * (frequency - share * total_fb)
}

/// C-value for every term, in frequency-table order
pub fn cvalue_table(frequencies: &FrequencyTable, containment: &ContainmentTable) -> ScoreTable {
    frequencies
        .iter()
        .map(|(term, entry)| {
            let container_counts: Vec<u64> = containment
                .containers(term)
                .iter()
                .map(|c| frequencies.count(c))
                .collect();
            (term, cvalue(entry, &container_counts))
        })
        .collect()
}
