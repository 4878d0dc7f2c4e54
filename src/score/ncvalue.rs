//! NC-value blend and ranking
//!
//! ```text
//! ncvalue(a) = w_c * cvalue(a) + w_x * context_factor(a)
//! ```
//!
//! with `w_c = 0.8` and `w_x = 0.2` by default. A term without context words
//! has a context factor of 0.

use serde::Serialize;

use super::ScoreTable;
use crate::phrase::frequency::FrequencyTable;

/// A term with every score that went into its rank
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTerm {
    pub term: String,
    pub nc_value: f64,
    pub cvalue: f64,
    pub context_factor: f64,
    pub frequency: u64,
    pub word_length: usize,
}

/// Blend C-values and context factors, in C-value table order
pub fn nc_value_table(
    cvalues: &ScoreTable,
    factors: &ScoreTable,
    cvalue_weight: f64,
    context_weight: f64,
) -> ScoreTable {
    cvalues
        .iter()
        .map(|(term, cvalue)| {
            (
                term,
                cvalue_weight * cvalue + context_weight * factors.score(term),
            )
        })
        .collect()
}

/// Rank every term by NC-value, highest first.
///
/// The sort is stable, so equal scores keep frequency-table order.
pub fn rank_terms(
    frequencies: &FrequencyTable,
    cvalues: &ScoreTable,
    factors: &ScoreTable,
    nc_values: &ScoreTable,
) -> Vec<RankedTerm> {
    let mut ranking: Vec<RankedTerm> = frequencies
        .iter()
        .map(|(term, entry)| RankedTerm {
            term: term.to_string(),
            nc_value: nc_values.score(term),
            cvalue: cvalues.score(term),
            context_factor: factors.score(term),
            frequency: entry.count,
            word_length: entry.word_length,
        })
        .collect();

    ranking.sort_by(|a, b| b.nc_value.total_cmp(&a.nc_value));
    ranking
}
