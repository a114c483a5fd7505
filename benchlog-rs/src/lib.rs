//! Metric extraction and reporting for plaintext benchmark logs
//!
//! This crate reads the `p*.txt` result files written by the lab benchmarks,
//! splits them into runs, extracts throughput, elapsed time and operation
//! counts, summarises them and writes a CSV summary plus a throughput chart.
//!
//! # Quick Start
//!
//! ```no_run
//! use benchlog_rs::{AnalyzerConfig, PlotConfig, generate_report, plot_summary};
//!
//! let config = AnalyzerConfig::with_results_dir("results");
//! let report = generate_report(&config, &mut std::io::stdout())?;
//! println!("{} file(s) analysed", report.files.len());
//!
//! // Plotting is best-effort: it needs the CSV written above
//! if let Err(e) = plot_summary(&config, &PlotConfig::default()) {
//!     eprintln!("plot skipped: {}", e);
//! }
//! # Ok::<(), benchlog_rs::AnalyzerError>(())
//! ```
//!
//! # Single runs
//!
//! The building blocks are usable on their own:
//!
//! ```rust
//! use benchlog_rs::{AnalyzerConfig, MetricExtractors, StatSummary, analyze_content};
//!
//! let log = "=== RUN 1\nThroughput: 500 ops/sec\n=== RUN 2\nThroughput: 700 ops/sec\n";
//! let result = analyze_content(log, &AnalyzerConfig::default(), MetricExtractors::standard());
//! let stats = StatSummary::from_values(&result.throughput).unwrap();
//! assert_eq!(stats.mean, 600.0);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod extract;
pub mod plots;
pub mod report;
pub mod stats;

pub use analysis::{FileResult, RunRecord, analyze_content, analyze_file};
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
pub use extract::{
    MetricExtractors, PatternTable, RunMetrics, extract_operations, extract_throughput,
    extract_time,
};
pub use plots::{PlotConfig, plot_summary};
pub use report::{
    AnalysisReport, FileReport, PracticeRanking, RankEntry, ReportGenerator, SummaryRow,
    generate_report,
};
pub use stats::StatSummary;
