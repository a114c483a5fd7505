use crate::analysis::run::{RunRecord, classify_run, split_runs};
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::extract::MetricExtractors;
use crate::stats::StatSummary;
use std::path::Path;
use tracing::info;

/// Accumulated metrics of every run in one result file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileResult {
    pub throughput: Vec<f64>,
    pub time: Vec<f64>,
    pub operations: Vec<u64>,
    pub errors: usize,
    pub timeouts: usize,
}

impl FileResult {
    /// Fold one run into the accumulators
    pub fn record(&mut self, run: RunRecord) {
        match run {
            RunRecord::Timeout => self.timeouts += 1,
            RunRecord::Error => self.errors += 1,
            RunRecord::Success(metrics) => {
                self.throughput.extend(metrics.throughput);
                self.time.extend(metrics.time);
                self.operations.extend(metrics.operations);
            }
        }
    }

    pub fn throughput_stats(&self) -> Option<StatSummary> {
        StatSummary::from_values(&self.throughput)
    }

    pub fn time_stats(&self) -> Option<StatSummary> {
        StatSummary::from_values(&self.time)
    }

    pub fn operation_stats(&self) -> Option<StatSummary> {
        StatSummary::from_counts(&self.operations)
    }
}

/// Analyse result file content already in memory
pub fn analyze_content(
    content: &str,
    config: &AnalyzerConfig,
    extractors: &MetricExtractors,
) -> FileResult {
    split_runs(content, &config.run_marker)
        .into_iter()
        .map(|segment| classify_run(segment, config, extractors))
        .fold(FileResult::default(), |mut result, run| {
            result.record(run);
            result
        })
}

/// Read and analyse one result file
pub fn analyze_file(
    path: &Path,
    config: &AnalyzerConfig,
    extractors: &MetricExtractors,
) -> Result<FileResult> {
    let content = std::fs::read_to_string(path).map_err(|source| AnalyzerError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let result = analyze_content(&content, config, extractors);
    info!(
        "{}: {} throughput, {} time, {} operation value(s); {} error(s), {} timeout(s)",
        path.display(),
        result.throughput.len(),
        result.time.len(),
        result.operations.len(),
        result.errors,
        result.timeouts
    );
    Ok(result)
}
