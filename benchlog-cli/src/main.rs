use anyhow::Result;
use benchlog_rs::{
    AnalysisReport, AnalyzerConfig, AnalyzerError, MetricExtractors, PlotConfig, ReportGenerator,
    plot_summary,
};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Benchlog - Benchmark result log analysis
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "benchlog")]
#[command(about = "Summarise throughput, time and operation metrics from benchmark logs", long_about = None)]
struct Cli {
    /// Directory containing the p*.txt result files
    #[arg(value_name = "RESULTS_DIR", default_value = "results")]
    results_dir: PathBuf,

    /// Number of configurations listed per practice ranking
    #[arg(long, default_value = "3")]
    top: usize,

    /// Generate the throughput chart after the report
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    plots: bool,

    /// Chart width in pixels
    #[arg(long, default_value = "1200")]
    plot_width: u32,

    /// Chart height in pixels
    #[arg(long, default_value = "800")]
    plot_height: u32,

    /// Save the analysis as JSON
    #[arg(long, value_name = "REPORT_PATH")]
    report: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn write_json_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "results_dir": report.results_dir,
        "total_files": report.files.len() + report.skipped.len(),
        "analyzed": report.files.len(),
        "skipped": report.skipped,
        "summary_csv": report.summary_path,
        "files": report.files,
        "rankings": report.rankings,
    });
    std::fs::write(path, serde_json::to_string_pretty(&json)?)?;
    debug!("Saved JSON report to {}", path.display());
    Ok(())
}

/// Best-effort chart generation; failures are reported, never propagated
fn run_plots(config: &AnalyzerConfig, plot_config: &PlotConfig) {
    match plot_summary(config, plot_config) {
        Ok(path) => println!("📈 Gráfico guardado en: {}", path.display()),
        Err(AnalyzerError::SummaryMissing(_)) => {
            println!("❌ Ejecutar análisis primero para generar CSV");
        }
        Err(AnalyzerError::PlottingUnavailable) => {
            println!("⚠️  plotting no disponible, omitiendo gráficos");
        }
        Err(e) => {
            warn!("Plot generation failed: {}", e);
            println!("❌ Error generando gráficos: {}", e);
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Diagnostics stay quiet unless asked for, the report goes to stdout
    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = AnalyzerConfig {
        results_dir: args.results_dir.clone(),
        ranking_depth: args.top,
        ..Default::default()
    };

    let extractors = MetricExtractors::default();
    let generator = ReportGenerator::new(&config, &extractors);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = generator.run(&mut out);
    out.flush()?;
    drop(out);

    // A missing directory or an empty one ends the report but not the process
    let report = match outcome {
        Ok(report) => Some(report),
        Err(e @ (AnalyzerError::ResultsDirMissing(_) | AnalyzerError::NoResultFiles(_))) => {
            println!("❌ {}", e);
            None
        }
        Err(e) => return Err(e.into()),
    };

    if let (Some(report), Some(report_path)) = (&report, &args.report) {
        write_json_report(report, report_path)?;
    }

    if args.plots {
        let plot_config = PlotConfig {
            width: args.plot_width,
            height: args.plot_height,
            ..Default::default()
        };
        run_plots(&config, &plot_config);
    }

    Ok(())
}
