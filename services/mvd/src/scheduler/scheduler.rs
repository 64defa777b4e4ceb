use crate::config::AnalysisConfig;
use crate::dataset::DatasetView;
use crate::discovery::{discover, Algorithm};
use crate::error::{MvdError, Result};
use crate::journal::Journal;
use crate::model::Attribute;
use crate::scheduler::clock::{Clock, MonotonicClock};
use crate::scheduler::plan::{ChunkPlan, ExecutionMode};
use crate::tree::{merge, DependencyTree};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Work done for one (row block, attribute group) unit.
pub trait UnitAnalyzer {
    fn analyze(&self, view: &DatasetView, attributes: &[Attribute]) -> Result<DependencyTree>;
}

impl UnitAnalyzer for Algorithm {
    fn analyze(&self, view: &DatasetView, attributes: &[Attribute]) -> Result<DependencyTree> {
        discover(view, attributes, *self)
    }
}

impl<F> UnitAnalyzer for F
where
    F: Fn(&DatasetView, &[Attribute]) -> Result<DependencyTree>,
{
    fn analyze(&self, view: &DatasetView, attributes: &[Attribute]) -> Result<DependencyTree> {
        self(view, attributes)
    }
}

/// Result of one scheduled analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub tree: DependencyTree,
    pub mode: ExecutionMode,
    pub units_completed: usize,
    pub units_failed: usize,
    /// Row blocks were skipped because the deadline passed.
    pub truncated: bool,
    pub elapsed: Duration,
}

#[derive(Debug, Default)]
struct Tally {
    completed: usize,
    failed: usize,
}

pub struct ChunkScheduler<C: Clock = MonotonicClock> {
    config: AnalysisConfig,
    clock: C,
}

impl ChunkScheduler<MonotonicClock> {
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> ChunkScheduler<C> {
    pub fn with_clock(config: AnalysisConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// Chunking applies only when both rows and attributes exceed their
    /// thresholds, unless forced by configuration.
    pub fn mode_for(&self, rows: usize, attributes: usize) -> ExecutionMode {
        let large = rows > self.config.chunk_row_threshold
            && attributes > self.config.chunk_attribute_threshold;
        if large || self.config.force_chunked {
            ExecutionMode::Chunked
        } else {
            ExecutionMode::Direct
        }
    }

    pub fn plan(&self, rows: usize, attributes: &[Attribute]) -> ChunkPlan {
        match self.mode_for(rows, attributes.len()) {
            ExecutionMode::Direct => ChunkPlan::direct(rows, attributes),
            ExecutionMode::Chunked => ChunkPlan::chunked(
                rows,
                attributes,
                self.config.row_block_size,
                self.config.attribute_group_size,
            ),
        }
    }

    /// Run `analyzer` over every unit of `view` restricted to `attributes`
    /// and merge the per-unit trees.
    ///
    /// Returns `Ok(None)` when the deadline passed before any unit completed.
    /// Failing units are logged and skipped.
    pub fn analyze<A>(
        &self,
        view: &DatasetView,
        attributes: &[Attribute],
        analyzer: &A,
        journal: &dyn Journal,
    ) -> Result<Option<AnalysisOutcome>>
    where
        A: UnitAnalyzer + ?Sized,
    {
        let started = self.clock.now();
        let max_time = self.config.max_time();
        let view = view.select(attributes)?;
        let plan = self.plan(view.height(), attributes);

        match plan.mode {
            ExecutionMode::Chunked => {
                info!(
                    "Using chunk-based processing: {} row blocks x {} attribute groups",
                    plan.row_blocks.len(),
                    plan.attribute_groups.len()
                );
                journal.info("Using chunk-based processing for both rows and columns due to large data size.");
            }
            ExecutionMode::Direct => {
                info!(
                    "Using direct processing over {} rows and {} attributes",
                    view.height(),
                    attributes.len()
                );
            }
        }

        let mut aggregate = DependencyTree::new();
        let mut tally = Tally::default();
        let mut truncated = false;

        for (block_index, rows) in plan.row_blocks.iter().enumerate() {
            let elapsed = self.clock.now().saturating_sub(started);
            if elapsed > max_time {
                warn!(
                    "Processing terminated due to exceeding time limit after {:?} ({} of {} row blocks done)",
                    elapsed,
                    block_index,
                    plan.row_blocks.len()
                );
                journal.warn("Processing terminated due to exceeding time limit.");
                truncated = true;
                break;
            }

            let block = view.slice_rows(rows.start, rows.len());
            for group in &plan.attribute_groups {
                self.run_unit(&block, block_index, group, analyzer, journal, &mut aggregate, &mut tally);
            }
        }

        if truncated && tally.completed == 0 {
            warn!("Processing terminated due to timeout before any unit completed");
            journal.warn("Processing terminated due to timeout.");
            return Ok(None);
        }

        let elapsed = self.clock.now().saturating_sub(started);
        info!(
            "Analysis finished in {:?}: {} units completed, {} failed, {} dependencies",
            elapsed,
            tally.completed,
            tally.failed,
            aggregate.dependency_count()
        );

        Ok(Some(AnalysisOutcome {
            tree: aggregate,
            mode: plan.mode,
            units_completed: tally.completed,
            units_failed: tally.failed,
            truncated,
            elapsed,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    fn run_unit<A>(
        &self,
        block: &DatasetView,
        block_index: usize,
        group: &[Attribute],
        analyzer: &A,
        journal: &dyn Journal,
        aggregate: &mut DependencyTree,
        tally: &mut Tally,
    ) where
        A: UnitAnalyzer + ?Sized,
    {
        let result = panic::catch_unwind(AssertUnwindSafe(|| analyzer.analyze(block, group)))
            .unwrap_or_else(|payload| Err(MvdError::UnitPanicked(panic_message(payload))));

        match result {
            Ok(local) => {
                let summary = merge(aggregate, local);
                debug!(
                    "Merged chunk {} {:?}: {} dependencies added, {} subtrees grafted",
                    block_index,
                    group,
                    summary.dependencies_added,
                    summary.subtrees_grafted
                );
                for line in &summary.trace {
                    debug!("{}", line);
                }
                tally.completed += 1;
            }
            Err(e) => {
                let names: Vec<&str> = group.iter().map(Attribute::as_str).collect();
                let message = format!(
                    "Error processing chunk {} with attributes {:?}: {}",
                    block_index, names, e
                );
                error!("{}", message);
                journal.error(&message);
                tally.failed += 1;
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
