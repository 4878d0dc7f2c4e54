//! # rapid_ncvalue
//!
//! C-value / NC-value term extraction over part-of-speech tagged corpora.
//!
//! The crate takes sentences that an external morphological analyzer has
//! already split into (surface, tag) tokens, and returns multi-word terms
//! ranked by NC-value:
//!
//! - candidate spans are recognized by a small automaton over coarse
//!   part-of-speech categories ([`phrase::pattern`]);
//! - their frequencies are adjusted for nesting and turned into C-values
//!   ([`phrase`], [`score::cvalue`]);
//! - words seen next to known terms contribute a context factor
//!   ([`context`]);
//! - both are blended into the NC-value ([`score::ncvalue`]).
//!
//! ```
//! use rapid_ncvalue::nlp::tagged::parse_kytea_line;
//!
//! let corpus = vec![parse_kytea_line("組織/名詞/そしき 培養/名詞/ばいよう を/助詞/を 行う/動詞/おこなう")];
//! assert_eq!(rapid_ncvalue::extract_terms(&corpus, 10), vec!["組織培養"]);
//! ```

pub mod context;
pub mod errors;
pub mod nlp;
pub mod phrase;
pub mod pipeline;
pub mod score;
pub mod types;

pub use errors::{ExtractionError, Result};
pub use nlp::pos::{Category, TagMapper};
pub use pipeline::artifacts::{annotate_documents, ExtractionResult};
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageTimingObserver};
pub use pipeline::runner::TermExtractor;
pub use score::ncvalue::RankedTerm;
pub use types::{ContextCounting, ExtractionConfig, Sentence, Tagset, Token};

/// Top `k` terms of a tagged corpus with the default configuration
pub fn extract_terms(corpus: &[Sentence], k: usize) -> Vec<String> {
    TermExtractor::new().extract(corpus, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::tagged::parse_kytea_line;

    const CORPUS: [&str; 4] = [
        "坂東/名詞 武士/名詞 の/助詞 権力/名詞 闘争/名詞 に/助詞 より/動詞 、/補助記号 北条/名詞 義時/名詞 の/助詞 鎌倉/名詞 幕府/名詞 が/助詞 続/動詞 く/語尾 。/補助記号",
        "武家/名詞 政権/名詞 は/助詞 室町/名詞 幕府/名詞 ・/補助記号 江戸/名詞 幕府/名詞 へ/助詞 継承/名詞 さ/動詞 れ/助動詞 た/助動詞 。/補助記号",
        "植物/名詞 は/助詞 組織/名詞 切片/名詞 から/助詞 再生/名詞 する/動詞 。/補助記号",
        "ニンジン/名詞 を/助詞 5/名詞 ミリメートル/名詞 角/名詞 程度/名詞 に/助詞 切り出/動詞 し/語尾 、/補助記号 胚/名詞 ・/補助記号 不定/名詞 芽/名詞 など/助詞 を/助詞 経/動詞 て/助詞 、/補助記号 組織/名詞 培養/名詞 に/助詞 なる/動詞 。/補助記号",
    ];

    fn corpus() -> Vec<Sentence> {
        CORPUS.iter().map(|line| parse_kytea_line(line)).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_end_to_end_scores() {
        let result = TermExtractor::new().run(&corpus(), &mut NoopObserver);

        assert_eq!(result.frequencies.len(), 13);
        assert_eq!(result.frequencies.count("5ミリメートル"), 3);
        assert_eq!(result.frequencies.count("5ミリメートル角"), 2);
        assert_eq!(result.frequencies.count("5ミリメートル角程度"), 1);

        assert_eq!(
            result.containment.containers("5ミリメートル"),
            &["5ミリメートル角".to_string(), "5ミリメートル角程度".to_string()]
        );

        assert_close(result.cvalues.score("5ミリメートル"), 1.5);
        assert_close(result.cvalues.score("5ミリメートル角"), 3f64.log2());
        assert_close(result.cvalues.score("5ミリメートル角程度"), 2.0);

        assert_eq!(result.context.len(), 2);
        assert_eq!(result.context.associations("角")[0].term, "5ミリメートル");
        assert_eq!(result.context.associations("程度")[0].term, "5ミリメートル角");

        assert_close(result.nc_values.score("5ミリメートル"), 1.2153846153846155);
        assert_close(result.nc_values.score("5ミリメートル角"), 1.2833546159615403);
        assert_close(result.nc_values.score("5ミリメートル角程度"), 1.6);
        assert_close(result.nc_values.score("組織培養"), 0.8);
    }

    #[test]
    fn test_end_to_end_ranking() {
        let top = extract_terms(&corpus(), 1000);
        assert_eq!(
            top,
            vec![
                "5ミリメートル角程度",
                "5ミリメートル角",
                "5ミリメートル",
                "坂東武士",
                "権力闘争",
                "北条義時",
                "鎌倉幕府",
                "武家政権",
                "室町幕府",
                "江戸幕府",
                "組織切片",
                "不定芽",
                "組織培養",
            ]
        );
        assert_eq!(extract_terms(&corpus(), 3).len(), 3);
    }

    #[test]
    fn test_terms_without_context_score_cvalue_share() {
        let result = TermExtractor::new().run(&corpus(), &mut NoopObserver);
        for ranked in &result.ranking {
            if !result.context_factors.contains(&ranked.term) {
                assert_eq!(ranked.nc_value, 0.8 * ranked.cvalue);
            }
        }
    }

    #[test]
    fn test_single_token_term_scores_context_share_only() {
        use crate::phrase::frequency::FrequencyEntry;
        use crate::score::cvalue::cvalue;
        use crate::score::ncvalue::nc_value_table;
        use crate::score::ScoreTable;

        let entry = FrequencyEntry {
            count: 4,
            word_length: 1,
        };
        let cvalues: ScoreTable = [("培養", cvalue(&entry, &[]))].into_iter().collect();
        let factors: ScoreTable = [("培養", 0.75)].into_iter().collect();

        let nc = nc_value_table(&cvalues, &factors, 0.8, 0.2);
        assert_eq!(cvalues.get("培養"), Some(0.0));
        assert_eq!(nc.get("培養"), Some(0.2 * 0.75));
    }

    #[test]
    fn test_annotate_with_ranking() {
        let top = extract_terms(&corpus(), 1000);
        let documents = ["北条義時の鎌倉幕府", "ニンジンを5ミリメートル角程度に切る"];
        let annotated = annotate_documents(&top, &documents);
        assert_eq!(
            annotated[0],
            vec!["北条義時".to_string(), "鎌倉幕府".to_string()]
        );
        assert_eq!(
            annotated[1],
            vec![
                "5ミリメートル角程度".to_string(),
                "5ミリメートル角".to_string(),
                "5ミリメートル".to_string(),
            ]
        );
    }
}
