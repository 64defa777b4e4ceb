use crate::config::AnalysisConfig;
use crate::dataset::DatasetView;
use crate::error::Result;
use crate::journal::Journal;
use crate::report::{SessionReport, VariantReport};
use crate::scheduler::ChunkScheduler;
use std::time::Instant;
use tracing::info;

/// One analysis run over a dataset: every configured variant is scheduled,
/// timed, rendered and written to the journal.
pub struct AnalysisSession<'j> {
    config: AnalysisConfig,
    journal: &'j dyn Journal,
}

impl<'j> AnalysisSession<'j> {
    pub fn new(config: AnalysisConfig, journal: &'j dyn Journal) -> Self {
        Self { config, journal }
    }

    pub fn run(&self, dataset: &str, view: &DatasetView) -> Result<SessionReport> {
        let attributes = view.attributes();
        info!(
            "Analyzing {}: {} rows, {} attributes, variants {:?}",
            dataset,
            view.height(),
            attributes.len(),
            self.config.algorithms
        );
        self.journal.info("Starting a new logging session.");

        let mut variants = Vec::with_capacity(self.config.algorithms.len());
        for &algorithm in &self.config.algorithms {
            let started = Instant::now();
            let scheduler = ChunkScheduler::new(self.config.clone());
            let outcome = scheduler.analyze(view, &attributes, &algorithm, self.journal)?;
            let elapsed = started.elapsed();

            let report = VariantReport::from_outcome(algorithm, outcome, elapsed);
            info!(
                "{} finished in {:.3}s with {} dependencies",
                algorithm, report.elapsed_secs, report.dependency_count
            );
            variants.push(report);
        }

        self.journal.info(&format!("Data {}", dataset));
        for report in &variants {
            self.journal.info(&report.text);
            self.journal.info(&format!(
                "{} processing time - {}",
                report.algorithm, report.elapsed_secs
            ));
        }

        Ok(SessionReport {
            dataset: dataset.to_string(),
            rows: view.height(),
            attributes,
            variants,
        })
    }
}
