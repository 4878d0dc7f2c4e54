//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. [`NoopObserver`] ignores everything; [`StageTimingObserver`]
//! keeps one [`StageReport`] per stage.

use std::time::{Duration, Instant};

use crate::context::table::ContextTable;
use crate::phrase::containment::ContainmentTable;
use crate::phrase::frequency::FrequencyTable;

pub const STAGE_FREQUENCY: &str = "frequency";
pub const STAGE_CONTAINMENT: &str = "containment";
pub const STAGE_CVALUE: &str = "cvalue";
pub const STAGE_CONTEXT: &str = "context";
pub const STAGE_CONTEXT_FACTOR: &str = "context_factor";
pub const STAGE_RANK: &str = "rank";

/// All stages in execution order
pub const STAGES: [&str; 6] = [
    STAGE_FREQUENCY,
    STAGE_CONTAINMENT,
    STAGE_CVALUE,
    STAGE_CONTEXT,
    STAGE_CONTEXT_FACTOR,
    STAGE_RANK,
];

/// Callbacks invoked by [`crate::pipeline::runner::TermExtractor::run`].
///
/// Every method has an empty default body, so implementors only override
/// what they need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Called once the frequency table is complete
    fn on_frequencies(&mut self, _frequencies: &FrequencyTable) {}

    /// Called once containment has been resolved
    fn on_containment(&mut self, _containment: &ContainmentTable) {}

    /// Called once the context table is complete
    fn on_context(&mut self, _context: &ContextTable) {}
}

/// Observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Wall-clock timer for one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    /// Start timing now
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since [`StageClock::start`]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Summary of a finished stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    items: Option<usize>,
    parallel: Option<bool>,
}

impl StageReport {
    /// Report carrying only the elapsed time
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    /// Wall-clock time the stage took
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of entries the stage produced, if reported
    pub fn items(&self) -> Option<usize> {
        self.items
    }

    /// Whether the stage ran on the rayon pool, if it can
    pub fn parallel(&self) -> Option<bool> {
        self.parallel
    }
}

/// Builder for [`StageReport`]s with optional metrics
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn items(mut self, items: usize) -> Self {
        self.report.items = Some(items);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.report.parallel = Some(parallel);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Observer that records a report for every finished stage
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports in stage completion order
    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Report for a given stage, if it ran
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    /// Sum of all stage timings
    pub fn total_elapsed(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}
