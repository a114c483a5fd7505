use std::path::PathBuf;

/// Analysis configuration
///
/// Every literal the analyzer relies on (file naming contract, run marker,
/// sentinels, output names) lives here so callers can adapt to logs written
/// by a different benchmark harness.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Directory holding the `p*.txt` result logs
    pub results_dir: PathBuf,

    /// Result files must start with this prefix
    pub file_prefix: String,

    /// Result files must end with this suffix
    pub file_extension: String,

    /// Literal that opens every run inside a result file
    pub run_marker: String,

    /// Substring marking a run that timed out
    pub timeout_sentinel: String,

    /// Substring marking a run that failed
    pub error_sentinel: String,

    /// Practice id is the file name up to the first occurrence of this
    pub practice_separator: char,

    /// How many configurations to list per practice ranking
    pub ranking_depth: usize,

    /// File name of the CSV summary, written inside `results_dir`
    pub summary_filename: String,

    /// File name of the throughput chart, written inside `results_dir`
    pub plot_filename: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            file_prefix: "p".to_string(),
            file_extension: ".txt".to_string(),
            run_marker: "=== RUN ".to_string(),
            timeout_sentinel: "TIMEOUT".to_string(),
            error_sentinel: "ERROR".to_string(),
            practice_separator: '_',
            ranking_depth: 3,
            summary_filename: "analysis_summary.csv".to_string(),
            plot_filename: "throughput_comparison.png".to_string(),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_results_dir(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            ..Default::default()
        }
    }

    pub fn summary_path(&self) -> PathBuf {
        self.results_dir.join(&self.summary_filename)
    }

    pub fn plot_path(&self) -> PathBuf {
        self.results_dir.join(&self.plot_filename)
    }

    /// Whether a directory entry name follows the result file naming contract
    pub fn is_result_file(&self, name: &str) -> bool {
        name.starts_with(&self.file_prefix) && name.ends_with(&self.file_extension)
    }

    /// Grouping key of a result file: its name up to the first separator
    ///
    /// A name without separator is its own practice id.
    pub fn practice_id<'a>(&self, filename: &'a str) -> &'a str {
        filename
            .split(self.practice_separator)
            .next()
            .unwrap_or(filename)
    }

    /// Configuration label shown in rankings (`p1_mutex_4.txt` -> `mutex_4`)
    pub fn config_label(&self, filename: &str) -> String {
        let practice = self.practice_id(filename);
        let prefix = format!("{}{}", practice, self.practice_separator);
        filename
            .replace(&self.file_extension, "")
            .replace(&prefix, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_file_contract() {
        let config = AnalyzerConfig::default();
        assert!(config.is_result_file("p1_naive.txt"));
        assert!(config.is_result_file("p.txt"));
        assert!(!config.is_result_file("analysis_summary.csv"));
        assert!(!config.is_result_file("q1_naive.txt"));
        assert!(!config.is_result_file("p1_naive.log"));
    }

    #[test]
    fn test_practice_id() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.practice_id("p1_mutex_4.txt"), "p1");
        assert_eq!(config.practice_id("p3.txt"), "p3.txt");
    }

    #[test]
    fn test_config_label() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.config_label("p2_ring_2x2.txt"), "ring_2x2");
        assert_eq!(config.config_label("p5.txt"), "p5");
    }
}
