//! Context factor
//!
//! A context word's weight is the share of all candidate terms it is
//! associated with. A term's context factor sums `weight * count` over the
//! context words seen next to it.

use super::table::ContextTable;
use crate::score::ScoreTable;

/// Weight of a context word with `num_associations` associated terms
pub fn context_weight(num_associations: usize, num_terms: usize) -> f64 {
    if num_terms == 0 {
        return 0.0;
    }
    num_associations as f64 / num_terms as f64
}

/// Invert the context table into per-term context factors.
///
/// `num_terms` is the number of distinct candidate terms. Terms without any
/// context word are absent from the result.
pub fn context_factor_table(context: &ContextTable, num_terms: usize) -> ScoreTable {
    let mut factors = ScoreTable::new();

    for (_, associations) in context.iter() {
        let weight = context_weight(associations.len(), num_terms);
        for association in associations {
            factors.add(&association.term, weight * association.count as f64);
        }
    }

    factors
}
