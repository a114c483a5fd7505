//! Report generation
//!
//! Scans the results directory, analyses every result file, prints the
//! human-readable report to a writer, ranks configurations per practice and
//! saves the CSV summary.

pub mod summary;

pub use summary::{SummaryRow, read_summary_csv, summary_frame, write_summary_csv};

use crate::analysis::{FileResult, analyze_file};
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::extract::MetricExtractors;
use crate::stats::{StatSummary, mean};
use itertools::Itertools;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const BANNER_WIDTH: usize = 60;
const RULE_WIDTH: usize = 40;

/// A result file that was read successfully
#[derive(Debug, Clone)]
pub struct AnalyzedFile {
    pub filename: String,
    pub practice: String,
    pub result: FileResult,
}

impl AnalyzedFile {
    pub fn mean_throughput(&self) -> Option<f64> {
        mean(&self.result.throughput)
    }

    /// CSV row, only when the file produced both throughput and time values
    pub fn summary_row(&self) -> Option<SummaryRow> {
        let throughput = self.result.throughput_stats()?;
        let time = self.result.time_stats()?;
        Some(SummaryRow {
            archivo: self.filename.clone(),
            practica: self.practice.clone(),
            throughput_promedio: throughput.mean,
            tiempo_promedio: time.mean,
            throughput_std: throughput.stdev,
            tiempo_std: time.stdev,
            errores: self.result.errors as u64,
            timeouts: self.result.timeouts as u64,
        })
    }
}

/// Per-file section of the report
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub filename: String,
    pub practice: String,
    pub errors: usize,
    pub timeouts: usize,
    pub throughput: Option<StatSummary>,
    pub time: Option<StatSummary>,
    pub operations: Option<StatSummary>,
}

impl From<&AnalyzedFile> for FileReport {
    fn from(file: &AnalyzedFile) -> Self {
        Self {
            filename: file.filename.clone(),
            practice: file.practice.clone(),
            errors: file.result.errors,
            timeouts: file.result.timeouts,
            throughput: file.result.throughput_stats(),
            time: file.result.time_stats(),
            operations: file.result.operation_stats(),
        }
    }
}

/// One ranked configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub filename: String,
    pub config: String,
    pub mean_throughput: f64,
}

/// Top configurations of one practice
#[derive(Debug, Clone, Serialize)]
pub struct PracticeRanking {
    pub practice: String,
    pub entries: Vec<RankEntry>,
}

/// Everything the report printed, for callers that want structured output
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub results_dir: PathBuf,
    pub files: Vec<FileReport>,
    /// Files that could not be read
    pub skipped: Vec<String>,
    pub rankings: Vec<PracticeRanking>,
    pub summary_path: Option<PathBuf>,
}

/// List result files directly inside the results directory, sorted by name
pub fn list_result_files(config: &AnalyzerConfig) -> Result<Vec<PathBuf>> {
    let dir = &config.results_dir;
    if !dir.exists() {
        return Err(AnalyzerError::ResultsDirMissing(dir.clone()));
    }

    let list_err = |source| AnalyzerError::ListDir {
        path: dir.clone(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let raw_name = entry.file_name();
        let name = raw_name.to_string_lossy();
        if config.is_result_file(&name) {
            if raw_name.to_str().is_none() {
                warn!("Result file name is not valid UTF-8: {}", path.display());
            }
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(AnalyzerError::NoResultFiles(dir.clone()));
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Group items by key, keeping groups in order of first appearance
pub fn group_by_key<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(&item);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(item),
            None => groups.push((k, vec![item])),
        }
    }
    groups
}

/// Rank files by mean throughput, highest first
///
/// Files without throughput values are not ranked. Ties keep input order.
pub fn rank_by_throughput(files: &[&AnalyzedFile], config: &AnalyzerConfig) -> Vec<RankEntry> {
    files
        .iter()
        .filter_map(|file| {
            file.mean_throughput().map(|mean_throughput| RankEntry {
                filename: file.filename.clone(),
                config: config.config_label(&file.filename),
                mean_throughput,
            })
        })
        .sorted_by(|a, b| b.mean_throughput.total_cmp(&a.mean_throughput))
        .collect()
}

/// Drives one report: analysis, console output, rankings and CSV
pub struct ReportGenerator<'a> {
    config: &'a AnalyzerConfig,
    extractors: &'a MetricExtractors,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(config: &'a AnalyzerConfig, extractors: &'a MetricExtractors) -> Self {
        Self { config, extractors }
    }

    /// Run the full report, writing the console text to `out`
    ///
    /// # Errors
    /// `ResultsDirMissing` and `NoResultFiles` are returned before anything is
    /// written. Unreadable result files are reported to `out` and skipped.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<AnalysisReport> {
        let paths = list_result_files(self.config)?;
        info!(
            "Found {} result file(s) in {}",
            paths.len(),
            self.config.results_dir.display()
        );

        banner(out, "ANÁLISIS DE RESULTADOS - LABORATORIO 6")?;

        let mut analyzed = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();

        for path in &paths {
            let filename = file_name(path);
            writeln!(out, "\nAnalizando: {}", filename)?;
            writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

            match analyze_file(path, self.config, self.extractors) {
                Ok(result) => {
                    let file = AnalyzedFile {
                        practice: self.config.practice_id(&filename).to_string(),
                        filename,
                        result,
                    };
                    write_file_section(out, &FileReport::from(&file))?;
                    analyzed.push(file);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    let reason = match &e {
                        AnalyzerError::ReadFile { source, .. } => source.to_string(),
                        other => other.to_string(),
                    };
                    writeln!(out, "Error procesando {}: {}", path.display(), reason)?;
                    skipped.push(filename);
                }
            }
        }

        writeln!(out)?;
        banner(out, "COMPARATIVAS POR PRÁCTICA")?;

        let mut rankings = Vec::new();
        for (practice, members) in group_by_key(analyzed.iter(), |f| f.practice.clone()) {
            writeln!(out, "\n--- {} ---", practice.to_uppercase())?;

            let mut entries = rank_by_throughput(&members, self.config);
            entries.truncate(self.config.ranking_depth);
            if !entries.is_empty() {
                writeln!(out, "🏆 Ranking por throughput:")?;
                for (i, entry) in entries.iter().enumerate() {
                    writeln!(
                        out,
                        "   {}. {}: {:.0} ops/seg",
                        i + 1,
                        entry.config,
                        entry.mean_throughput
                    )?;
                }
            }
            rankings.push(PracticeRanking { practice, entries });
        }

        let rows: Vec<SummaryRow> = analyzed.iter().filter_map(AnalyzedFile::summary_row).collect();
        let summary_path = if rows.is_empty() {
            info!("No file produced both throughput and time values; CSV not written");
            None
        } else {
            let path = self.config.summary_path();
            write_summary_csv(&rows, &path)?;
            writeln!(out, "\n📊 Datos guardados en: {}", path.display())?;
            Some(path)
        };

        writeln!(out)?;
        banner(out, "ANÁLISIS COMPLETADO")?;

        Ok(AnalysisReport {
            results_dir: self.config.results_dir.clone(),
            files: analyzed.iter().map(FileReport::from).collect(),
            skipped,
            rankings,
            summary_path,
        })
    }
}

/// Run a report with the stock extractors
pub fn generate_report<W: Write>(config: &AnalyzerConfig, out: &mut W) -> Result<AnalysisReport> {
    ReportGenerator::new(config, MetricExtractors::standard()).run(out)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn banner<W: Write>(out: &mut W, title: &str) -> Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{}\n{}\n{}", rule, title, rule)?;
    Ok(())
}

fn write_file_section<W: Write>(out: &mut W, file: &FileReport) -> Result<()> {
    if file.errors > 0 {
        writeln!(out, "⚠️  Errores: {}", file.errors)?;
    }
    if file.timeouts > 0 {
        writeln!(out, "⚠️  Timeouts: {}", file.timeouts)?;
    }

    if let Some(stats) = &file.throughput {
        writeln!(out, "📊 Throughput (ops/seg):")?;
        writeln!(out, "   Promedio: {:.0} ± {:.0}", stats.mean, stats.stdev)?;
        writeln!(out, "   Rango: {:.0} - {:.0}", stats.min, stats.max)?;
    }

    if let Some(stats) = &file.time {
        writeln!(out, "⏱️  Tiempo (segundos):")?;
        writeln!(out, "   Promedio: {:.4} ± {:.4}", stats.mean, stats.stdev)?;
        writeln!(out, "   Rango: {:.4} - {:.4}", stats.min, stats.max)?;
    }

    if let Some(stats) = &file.operations {
        writeln!(out, "🔢 Operaciones completadas:")?;
        writeln!(out, "   Promedio: {:.0}", stats.mean)?;
        writeln!(out, "   Rango: {:.0} - {:.0}", stats.min, stats.max)?;
    }

    Ok(())
}
