//! Nesting relation between candidate terms
//!
//! A term is nested in another when its text occurs anywhere inside the
//! other's text. Token boundaries are not checked.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::frequency::FrequencyTable;

/// For each term, the terms that contain it (both in first-seen order)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainmentTable {
    term_to_id: FxHashMap<String, usize>,
    terms: Vec<String>,
    containers: Vec<Vec<String>>,
}

impl ContainmentTable {
    /// Resolve containment for every term of a frequency table
    pub fn from_frequencies(table: &FrequencyTable) -> Self {
        let terms: Vec<&str> = table.terms().collect();
        let containers = terms
            .iter()
            .map(|term| containers_of(term, &terms))
            .collect();
        Self::from_parts(&terms, containers)
    }

    /// Same as [`ContainmentTable::from_frequencies`], one task per term
    pub fn from_frequencies_parallel(table: &FrequencyTable) -> Self {
        let terms: Vec<&str> = table.terms().collect();
        let containers = terms
            .par_iter()
            .map(|term| containers_of(term, &terms))
            .collect();
        Self::from_parts(&terms, containers)
    }

    fn from_parts(terms: &[&str], containers: Vec<Vec<String>>) -> Self {
        Self {
            term_to_id: terms
                .iter()
                .enumerate()
                .map(|(id, t)| (t.to_string(), id))
                .collect(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
            containers,
        }
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms containing `term`; empty for non-nested or unknown terms
    pub fn containers(&self, term: &str) -> &[String] {
        match self.term_to_id.get(term) {
            Some(&id) => &self.containers[id],
            None => &[],
        }
    }

    /// Whether `term` occurs inside some other term
    pub fn is_nested(&self, term: &str) -> bool {
        !self.containers(term).is_empty()
    }

    /// Iterate over (term, containers) in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.terms
            .iter()
            .map(String::as_str)
            .zip(self.containers.iter().map(Vec::as_slice))
    }
}

fn containers_of(term: &str, terms: &[&str]) -> Vec<String> {
    terms
        .iter()
        .filter(|&&other| other != term && other.contains(term))
        .map(|other| other.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(terms: &[&str]) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for term in terms {
            table.record(term, 2);
        }
        table
    }

    #[test]
    fn test_nested_chain() {
        let freq = table(&["5ミリメートル", "5ミリメートル角", "5ミリメートル角程度"]);
        let containment = ContainmentTable::from_frequencies(&freq);

        assert_eq!(
            containment.containers("5ミリメートル"),
            &["5ミリメートル角".to_string(), "5ミリメートル角程度".to_string()]
        );
        assert_eq!(
            containment.containers("5ミリメートル角"),
            &["5ミリメートル角程度".to_string()]
        );
        assert!(!containment.is_nested("5ミリメートル角程度"));
    }

    #[test]
    fn test_substring_without_token_alignment() {
        // "物理" sits inside "生物理論" without sharing a token boundary
        let freq = table(&["物理", "生物理論"]);
        let containment = ContainmentTable::from_frequencies(&freq);
        assert!(containment.is_nested("物理"));
    }

    #[test]
    fn test_unrelated_terms() {
        let freq = table(&["鎌倉幕府", "室町幕府", "江戸幕府"]);
        let containment = ContainmentTable::from_frequencies(&freq);
        assert!(containment.iter().all(|(_, c)| c.is_empty()));
        assert_eq!(containment.len(), 3);
    }

    #[test]
    fn test_unknown_term_has_no_containers() {
        let containment = ContainmentTable::from_frequencies(&table(&["AB"]));
        assert!(containment.containers("XY").is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let freq = table(&["AB", "ABC", "BC", "XABCY", "Q"]);
        assert_eq!(
            ContainmentTable::from_frequencies(&freq),
            ContainmentTable::from_frequencies_parallel(&freq)
        );
    }

    #[test]
    fn test_empty() {
        let containment = ContainmentTable::from_frequencies(&FrequencyTable::new());
        assert!(containment.is_empty());
    }
}
