//! Pipeline artifacts
//!
//! [`ExtractionResult`] keeps every intermediate table next to the final
//! ranking, so callers can inspect how a score came about.

use crate::context::table::ContextTable;
use crate::phrase::containment::ContainmentTable;
use crate::phrase::frequency::FrequencyTable;
use crate::score::ncvalue::RankedTerm;
use crate::score::ScoreTable;

/// Output of one extraction run
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    pub frequencies: FrequencyTable,
    pub containment: ContainmentTable,
    pub cvalues: ScoreTable,
    pub context: ContextTable,
    pub context_factors: ScoreTable,
    pub nc_values: ScoreTable,
    /// All terms, highest NC-value first
    pub ranking: Vec<RankedTerm>,
}

impl ExtractionResult {
    /// Texts of the `k` best terms. Asking for more terms than exist
    /// returns all of them.
    pub fn top_k(&self, k: usize) -> Vec<String> {
        self.ranking
            .iter()
            .take(k)
            .map(|r| r.term.clone())
            .collect()
    }

    /// The `k` best terms with their scores
    pub fn top_ranked(&self, k: usize) -> &[RankedTerm] {
        &self.ranking[..k.min(self.ranking.len())]
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.ranking.len()
    }

    /// Check if no term was found
    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }
}

/// For each document, the terms occurring in it as substrings.
///
/// Terms keep the order they are given in, which is normally ranking order.
pub fn annotate_documents<S, D>(terms: &[S], documents: &[D]) -> Vec<Vec<String>>
where
    S: AsRef<str>,
    D: AsRef<str>,
{
    documents
        .iter()
        .map(|doc| {
            let doc = doc.as_ref();
            terms
                .iter()
                .map(AsRef::as_ref)
                .filter(|term| !term.is_empty() && doc.contains(term))
                .map(str::to_string)
                .collect()
        })
        .collect()
}
