use crate::config::AnalyzerConfig;
use crate::extract::{MetricExtractors, RunMetrics};
use tracing::debug;

/// Outcome of one benchmark run segment
#[derive(Debug, Clone, PartialEq)]
pub enum RunRecord {
    Timeout,
    Error,
    Success(RunMetrics),
}

/// Split file content into run segments
///
/// Text before the first marker is a header and not a run. Content without
/// any marker is a single implicit run.
pub fn split_runs<'a>(content: &'a str, run_marker: &str) -> Vec<&'a str> {
    if run_marker.is_empty() || !content.contains(run_marker) {
        return vec![content];
    }
    content.split(run_marker).skip(1).collect()
}

/// Classify a run segment; the timeout sentinel takes precedence over the error one
pub fn classify_run(
    segment: &str,
    config: &AnalyzerConfig,
    extractors: &MetricExtractors,
) -> RunRecord {
    if segment.contains(&config.timeout_sentinel) {
        debug!("run classified as timeout");
        RunRecord::Timeout
    } else if segment.contains(&config.error_sentinel) {
        debug!("run classified as error");
        RunRecord::Error
    } else {
        RunRecord::Success(extractors.extract(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(segment: &str) -> RunRecord {
        classify_run(
            segment,
            &AnalyzerConfig::default(),
            MetricExtractors::standard(),
        )
    }

    #[test]
    fn test_no_marker_is_single_run() {
        let content = "Throughput: 1 ops/sec\nTiempo: 0.1000 segundos\n";
        assert_eq!(split_runs(content, "=== RUN "), vec![content]);
    }

    #[test]
    fn test_header_is_dropped() {
        let content = "header line\n=== RUN 1\nfirst\n=== RUN 2\nsecond\n";
        assert_eq!(split_runs(content, "=== RUN "), vec!["1\nfirst\n", "2\nsecond\n"]);
    }

    #[test]
    fn test_marker_at_start() {
        let content = "=== RUN 1\nonly\n";
        assert_eq!(split_runs(content, "=== RUN "), vec!["1\nonly\n"]);
    }

    #[test]
    fn test_timeout_wins_over_error() {
        assert_eq!(classify("ERROR: lost data\nTIMEOUT after 10s"), RunRecord::Timeout);
        assert_eq!(classify("TIMEOUT\nERROR"), RunRecord::Timeout);
    }

    #[test]
    fn test_error_run() {
        assert_eq!(
            classify("Corrección: ERROR - pérdida de datos\nThroughput: 5 ops/sec"),
            RunRecord::Error
        );
    }

    #[test]
    fn test_sentinels_are_case_sensitive() {
        match classify("timeout? error? Throughput: 5 ops/sec") {
            RunRecord::Success(metrics) => assert_eq!(metrics.throughput, vec![5.0]),
            other => panic!("expected success, got {:?}", other),
        }
    }
}
