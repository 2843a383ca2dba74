//! Chained stage evaluation
//!
//! Pushes an interval set through every stage in order. Stages always run
//! one after another; within a stage the input set can optionally be fanned
//! out over a rayon pool, with the per-chunk outputs concatenated before the
//! next stage starts.

use crate::core::error::{MappingError, RangeMapError};
use crate::core::stage::{Stage, StageStats};
use crate::core::Interval;
use log::{debug, warn};
use rayon::prelude::*;
use rayon::ThreadPool;

/// Intervals handed to one rayon task
const CHUNK_SIZE: usize = 256;

/// How intervals within a stage are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// Single thread, intervals in input order
    #[default]
    Sequential,
    /// Rayon pool with the given number of worker threads
    Parallel { threads: usize },
}

impl Execution {
    /// `Sequential` for one thread, `Parallel` otherwise
    pub fn with_threads(threads: usize) -> Self {
        if threads <= 1 {
            Execution::Sequential
        } else {
            Execution::Parallel { threads }
        }
    }

    /// Worker pool for this schedule, `None` when sequential
    ///
    /// Build it once and pass it to [`Pipeline::trace_in`] to reuse the
    /// same workers across several runs.
    pub fn build_pool(&self) -> Result<Option<ThreadPool>, RangeMapError> {
        match *self {
            Execution::Sequential => Ok(None),
            Execution::Parallel { threads } => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map(Some)
                .map_err(|e| RangeMapError::ThreadPool(e.to_string())),
        }
    }
}

/// Statistics for one stage of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub name: String,
    pub stats: StageStats,
}

/// Outcome of [`Pipeline::trace`]
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Final interval set after the last stage
    pub intervals: Vec<Interval>,
    /// One entry per stage, in pipeline order
    pub stages: Vec<StageReport>,
}

impl PipelineReport {
    /// Smallest start in the final set
    pub fn lowest(&self) -> Result<i64, MappingError> {
        lowest_start(&self.intervals)
    }
}

/// Smallest start over a set of intervals
///
/// Empty intervals are skipped; an empty set has no minimum.
pub fn lowest_start(intervals: &[Interval]) -> Result<i64, MappingError> {
    intervals
        .iter()
        .filter(|i| !i.is_empty())
        .map(|i| i.start())
        .min()
        .ok_or(MappingError::EmptyIntervalSet)
}

/// Ordered, immutable chain of stages
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Build a pipeline, warning when categories do not chain
    pub fn new(stages: Vec<Stage>) -> Self {
        for pair in stages.windows(2) {
            if pair[0].destination_category() != pair[1].source_category() {
                warn!(
                    "Stage {} is followed by {}: categories do not chain",
                    pair[0].name(),
                    pair[1].name()
                );
            }
        }
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Category path, e.g. `["seed", "soil", "location"]`
    pub fn categories(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.stages.len() + 1);
        if let Some(first) = self.stages.first() {
            path.push(first.source_category());
        }
        path.extend(self.stages.iter().map(|s| s.destination_category()));
        path
    }

    /// Image of a single value through every stage
    pub fn map_value(&self, value: i64) -> i64 {
        self.stages.iter().fold(value, |v, stage| stage.map_value(v))
    }

    /// Map an interval set through every stage
    pub fn map_intervals(
        &self,
        seeds: &[Interval],
        execution: Execution,
    ) -> Result<Vec<Interval>, RangeMapError> {
        Ok(self.trace(seeds, execution)?.intervals)
    }

    /// Map an interval set and keep per-stage statistics
    pub fn trace(
        &self,
        seeds: &[Interval],
        execution: Execution,
    ) -> Result<PipelineReport, RangeMapError> {
        let pool = execution.build_pool()?;
        Ok(self.trace_in(seeds, pool.as_ref()))
    }

    /// Like [`Pipeline::trace`], on an existing pool (`None` runs sequentially)
    pub fn trace_in(&self, seeds: &[Interval], pool: Option<&ThreadPool>) -> PipelineReport {
        let mut current: Vec<Interval> = seeds.iter().copied().filter(|i| !i.is_empty()).collect();
        let mut reports = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let (next, stats) = match pool {
                None => stage.map_intervals(&current),
                Some(pool) => pool.install(|| map_stage_parallel(stage, &current)),
            };
            reports.push(StageReport { name: stage.name(), stats });
            current = next;
        }

        debug!(
            "Pipeline of {} stages produced {} intervals from {} seeds",
            self.stages.len(),
            current.len(),
            seeds.len()
        );

        PipelineReport { intervals: current, stages: reports }
    }

    /// Smallest value reachable from `seeds`
    pub fn lowest_location(
        &self,
        seeds: &[Interval],
        execution: Execution,
    ) -> Result<i64, RangeMapError> {
        let intervals = self.map_intervals(seeds, execution)?;
        Ok(lowest_start(&intervals)?)
    }

    /// Like [`Pipeline::lowest_location`], on an existing pool
    pub fn lowest_location_in(
        &self,
        seeds: &[Interval],
        pool: Option<&ThreadPool>,
    ) -> Result<i64, MappingError> {
        self.trace_in(seeds, pool).lowest()
    }
}

/// Fan out one stage over chunks of the input, then concatenate
fn map_stage_parallel(stage: &Stage, intervals: &[Interval]) -> (Vec<Interval>, StageStats) {
    let chunks: Vec<(Vec<Interval>, StageStats)> = intervals
        .par_chunks(CHUNK_SIZE)
        .map(|chunk| {
            let mut out = Vec::with_capacity(chunk.len());
            let mut stats = StageStats::default();
            for interval in chunk {
                let s = stage.map_interval_into(*interval, &mut out);
                stats.merge(&s);
            }
            (out, stats)
        })
        .collect();

    let total = chunks.iter().map(|(out, _)| out.len()).sum();
    let mut merged = Vec::with_capacity(total);
    let mut stats = StageStats::default();
    for (out, s) in chunks {
        merged.extend(out);
        stats.merge(&s);
    }

    debug!(
        "Stage {} (parallel): {} -> {} intervals",
        stage.name(),
        stats.inputs,
        stats.outputs
    );

    (merged, stats)
}
