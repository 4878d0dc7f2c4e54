//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! [`TermExtractor::run`] executes the six stages in order, each consuming
//! the complete output of the ones before it, and notifies a
//! [`PipelineObserver`] at every boundary:
//!
//! 1. Frequency table
//! 2. Containment
//! 3. C-value
//! 4. Context table
//! 5. Context factor
//! 6. NC-value and ranking
//!
//! Stages 1, 2 and 4 switch to their rayon variants on large corpora.

use crate::context::factor::context_factor_table;
use crate::context::table::ContextTable;
use crate::errors::Result;
use crate::nlp::pos::TagMapper;
use crate::phrase::containment::ContainmentTable;
use crate::phrase::frequency::{build_frequency_table, build_frequency_table_parallel};
use crate::pipeline::artifacts::ExtractionResult;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReportBuilder, STAGE_CONTAINMENT, STAGE_CONTEXT,
    STAGE_CONTEXT_FACTOR, STAGE_CVALUE, STAGE_FREQUENCY, STAGE_RANK,
};
use crate::score::cvalue::cvalue_table;
use crate::score::ncvalue::{nc_value_table, rank_terms};
use crate::types::{ExtractionConfig, Sentence};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Log a finished stage at debug level (when the `tracing` feature is
/// enabled).
macro_rules! trace_done {
    ($name:expr, $report:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            stage = $name,
            items = ?$report.items(),
            parallel = ?$report.parallel(),
            elapsed_us = $report.elapsed().as_micros() as u64,
            "stage finished"
        );
    };
}

/// Term extractor configured once and run over any number of corpora
#[derive(Debug, Clone)]
pub struct TermExtractor {
    config: ExtractionConfig,
    mapper: TagMapper,
}

impl Default for TermExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TermExtractor {
    /// Extractor with the default configuration and the UniDic tag mapper
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
            mapper: TagMapper::default(),
        }
    }

    /// Extractor for a validated configuration.
    ///
    /// The tag mapper follows `config.tagset`.
    pub fn with_config(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        let mapper = TagMapper::for_tagset(config.tagset);
        Ok(Self { config, mapper })
    }

    /// Replace the tag mapper
    pub fn with_mapper(mut self, mapper: TagMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Tag mapper in use
    pub fn mapper(&self) -> &TagMapper {
        &self.mapper
    }

    /// Run every stage over `corpus`.
    pub fn run(
        &self,
        corpus: &[Sentence],
        observer: &mut impl PipelineObserver,
    ) -> ExtractionResult {
        let num_tokens: usize = corpus.iter().map(Vec::len).sum();
        let parallel = self.config.use_parallel(num_tokens);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sentences = corpus.len(),
            tokens = num_tokens,
            parallel,
            "starting term extraction"
        );

        // Stage 1: Frequency table
        let frequencies = {
            trace_stage!(STAGE_FREQUENCY);
            observer.on_stage_start(STAGE_FREQUENCY);
            let clock = StageClock::start();
            let frequencies = if parallel {
                build_frequency_table_parallel(corpus, &self.mapper)
            } else {
                build_frequency_table(corpus, &self.mapper)
            };
            let report = StageReportBuilder::new(clock.elapsed())
                .items(frequencies.len())
                .parallel(parallel)
                .build();
            trace_done!(STAGE_FREQUENCY, report);
            observer.on_stage_end(STAGE_FREQUENCY, &report);
            observer.on_frequencies(&frequencies);
            frequencies
        };

        // Stage 2: Containment
        let containment = {
            trace_stage!(STAGE_CONTAINMENT);
            observer.on_stage_start(STAGE_CONTAINMENT);
            let clock = StageClock::start();
            let containment = if parallel {
                ContainmentTable::from_frequencies_parallel(&frequencies)
            } else {
                ContainmentTable::from_frequencies(&frequencies)
            };
            let nested = containment.iter().filter(|(_, c)| !c.is_empty()).count();
            let report = StageReportBuilder::new(clock.elapsed())
                .items(nested)
                .parallel(parallel)
                .build();
            trace_done!(STAGE_CONTAINMENT, report);
            observer.on_stage_end(STAGE_CONTAINMENT, &report);
            observer.on_containment(&containment);
            containment
        };

        // Stage 3: C-value
        let cvalues = {
            trace_stage!(STAGE_CVALUE);
            observer.on_stage_start(STAGE_CVALUE);
            let clock = StageClock::start();
            let cvalues = cvalue_table(&frequencies, &containment);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(cvalues.len())
                .build();
            trace_done!(STAGE_CVALUE, report);
            observer.on_stage_end(STAGE_CVALUE, &report);
            cvalues
        };

        // Stage 4: Context table
        let context = {
            trace_stage!(STAGE_CONTEXT);
            observer.on_stage_start(STAGE_CONTEXT);
            let clock = StageClock::start();
            let counting = self.config.context_counting;
            let context = if parallel {
                ContextTable::build_parallel(corpus, &self.mapper, &frequencies, counting)
            } else {
                ContextTable::build(corpus, &self.mapper, &frequencies, counting)
            };
            let report = StageReportBuilder::new(clock.elapsed())
                .items(context.len())
                .parallel(parallel)
                .build();
            trace_done!(STAGE_CONTEXT, report);
            observer.on_stage_end(STAGE_CONTEXT, &report);
            observer.on_context(&context);
            context
        };

        // Stage 5: Context factor
        let context_factors = {
            trace_stage!(STAGE_CONTEXT_FACTOR);
            observer.on_stage_start(STAGE_CONTEXT_FACTOR);
            let clock = StageClock::start();
            let factors = context_factor_table(&context, frequencies.len());
            let report = StageReportBuilder::new(clock.elapsed())
                .items(factors.len())
                .build();
            trace_done!(STAGE_CONTEXT_FACTOR, report);
            observer.on_stage_end(STAGE_CONTEXT_FACTOR, &report);
            factors
        };

        // Stage 6: NC-value and ranking
        let (nc_values, ranking) = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let nc_values = nc_value_table(
                &cvalues,
                &context_factors,
                self.config.cvalue_weight,
                self.config.context_weight,
            );
            let ranking = rank_terms(&frequencies, &cvalues, &context_factors, &nc_values);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(ranking.len())
                .build();
            trace_done!(STAGE_RANK, report);
            observer.on_stage_end(STAGE_RANK, &report);
            (nc_values, ranking)
        };

        ExtractionResult {
            frequencies,
            containment,
            cvalues,
            context,
            context_factors,
            nc_values,
            ranking,
        }
    }

    /// Top `k` term texts by NC-value
    pub fn extract(&self, corpus: &[Sentence], k: usize) -> Vec<String> {
        self.run(corpus, &mut NoopObserver).top_k(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrase::containment::ContainmentTable;
    use crate::phrase::frequency::FrequencyTable;
    use crate::pipeline::observer::{StageTimingObserver, STAGES};
    use crate::types::{ContextCounting, Tagset, Token};

    fn sentence(tokens: &[(&str, &str)]) -> Sentence {
        tokens
            .iter()
            .map(|&(surface, tag)| Token::new(surface, tag))
            .collect()
    }

    fn sample_corpus() -> Vec<Sentence> {
        vec![
            sentence(&[
                ("組織", "名詞"),
                ("培養", "名詞"),
                ("を", "助詞"),
                ("行う", "動詞"),
            ]),
            sentence(&[
                ("植物", "名詞"),
                ("の", "助詞"),
                ("組織", "名詞"),
                ("培養", "名詞"),
                ("系", "名詞"),
                ("する", "動詞"),
            ]),
        ]
    }

    #[test]
    fn test_run_with_noop_observer() {
        let extractor = TermExtractor::new();
        let result = extractor.run(&sample_corpus(), &mut NoopObserver);
        assert_eq!(result.len(), 2);
        assert_eq!(result.frequencies.count("組織培養"), 3);
        assert!(result.containment.is_nested("組織培養"));
    }

    #[test]
    fn test_timing_observer_sees_every_stage() {
        let extractor = TermExtractor::new();
        let mut obs = StageTimingObserver::new();
        let _result = extractor.run(&sample_corpus(), &mut obs);

        let stage_names: Vec<&str> = obs.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(stage_names, STAGES.to_vec());

        let freq = obs.report(STAGE_FREQUENCY).unwrap();
        assert_eq!(freq.items(), Some(2));
        assert_eq!(freq.parallel(), Some(false));
        assert_eq!(obs.report(STAGE_RANK).unwrap().items(), Some(2));
    }

    /// Observer that captures artifact snapshots.
    #[derive(Default)]
    struct ArtifactObserver {
        starts: usize,
        num_terms: Option<usize>,
        nested: Option<usize>,
        context_words: Option<usize>,
    }

    impl PipelineObserver for ArtifactObserver {
        fn on_stage_start(&mut self, _stage: &'static str) {
            self.starts += 1;
        }
        fn on_frequencies(&mut self, frequencies: &FrequencyTable) {
            self.num_terms = Some(frequencies.len());
        }
        fn on_containment(&mut self, containment: &ContainmentTable) {
            self.nested = Some(containment.iter().filter(|(_, c)| !c.is_empty()).count());
        }
        fn on_context(&mut self, context: &ContextTable) {
            self.context_words = Some(context.len());
        }
    }

    #[test]
    fn test_artifact_hooks() {
        let mut obs = ArtifactObserver::default();
        let _result = TermExtractor::new().run(&sample_corpus(), &mut obs);

        assert_eq!(obs.starts, 6);
        assert_eq!(obs.num_terms, Some(2));
        assert_eq!(obs.nested, Some(1));
        // "系" after 組織培養 and "する" after 組織培養系
        assert_eq!(obs.context_words, Some(2));
    }

    #[test]
    fn test_parallel_run_matches_sequential() {
        let corpus: Vec<Sentence> = (0..200).flat_map(|_| sample_corpus()).collect();

        let sequential = TermExtractor::with_config(ExtractionConfig::default().with_parallel(false))
            .unwrap()
            .run(&corpus, &mut NoopObserver);
        let mut obs = StageTimingObserver::new();
        let parallel = TermExtractor::new().run(&corpus, &mut obs);

        assert_eq!(obs.report(STAGE_CONTEXT).unwrap().parallel(), Some(true));
        assert_eq!(sequential.frequencies, parallel.frequencies);
        assert_eq!(sequential.context, parallel.context);
        assert_eq!(sequential.ranking, parallel.ranking);
    }

    #[test]
    fn test_accumulate_counting_changes_factor() {
        let corpus: Vec<Sentence> = (0..3).flat_map(|_| sample_corpus()).collect();
        let capped = TermExtractor::new().run(&corpus, &mut NoopObserver);
        let accumulated = TermExtractor::with_config(
            ExtractionConfig::default().with_context_counting(ContextCounting::Accumulate),
        )
        .unwrap()
        .run(&corpus, &mut NoopObserver);

        let term = "組織培養";
        assert_eq!(
            accumulated.context_factors.score(term),
            3.0 * capped.context_factors.score(term)
        );
    }

    #[test]
    fn test_ipadic_prefix() {
        let corpus = vec![sentence(&[
            ("非", "接頭詞,名詞接続,*,*"),
            ("同期", "名詞,サ変接続,*,*"),
            ("通信", "名詞,サ変接続,*,*"),
        ])];

        let unidic = TermExtractor::new().extract(&corpus, 10);
        assert_eq!(unidic, vec!["同期通信"]);

        let ipadic =
            TermExtractor::with_config(ExtractionConfig::default().with_tagset(Tagset::Ipadic))
                .unwrap()
                .extract(&corpus, 10);
        assert_eq!(ipadic, vec!["非同期通信"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractionConfig::default().with_weights(-1.0, 0.2);
        assert!(TermExtractor::with_config(config).is_err());
    }

    #[test]
    fn test_empty_corpus() {
        let result = TermExtractor::new().run(&[], &mut NoopObserver);
        assert!(result.is_empty());
        assert!(result.frequencies.is_empty());
        assert!(result.context.is_empty());
        assert!(result.top_k(5).is_empty());
    }
}
