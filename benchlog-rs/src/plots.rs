//! Throughput comparison chart
//!
//! Reads the CSV summary back and draws one bar per result file, one colour
//! per practice. Rendering needs the `plots` feature; without it the plotter
//! reports [`AnalyzerError::PlottingUnavailable`].

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::report::{SummaryRow, read_summary_csv};
use std::path::{Path, PathBuf};
use tracing::info;

/// Configuration for the throughput chart
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Output image width in pixels
    pub width: u32,

    /// Output image height in pixels
    pub height: u32,

    /// Bar fill opacity (0.0 - 1.0)
    pub bar_opacity: f64,

    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            bar_opacity: 0.7,
            title: "Throughput por Configuración".to_string(),
            x_label: "Configuración".to_string(),
            y_label: "Throughput (ops/seg)".to_string(),
        }
    }
}

/// Render the throughput chart from the CSV summary in the results directory
///
/// # Errors
/// `SummaryMissing` when the report has not produced a CSV yet,
/// `PlottingUnavailable` when built without the `plots` feature, and
/// `PlotError` for rendering failures.
pub fn plot_summary(config: &AnalyzerConfig, plot_config: &PlotConfig) -> Result<PathBuf> {
    let csv_path = config.summary_path();
    if !csv_path.exists() {
        return Err(AnalyzerError::SummaryMissing(csv_path));
    }

    let rows = read_summary_csv(&csv_path)?;
    let plot_path = config.plot_path();
    render_throughput_chart(&rows, &plot_path, plot_config)?;

    info!("Wrote throughput chart to {}", plot_path.display());
    Ok(plot_path)
}

/// Upper bound of the y axis, with headroom above the tallest bar
#[cfg_attr(not(feature = "plots"), allow(dead_code))]
fn y_axis_max(rows: &[SummaryRow]) -> f64 {
    let max = rows
        .iter()
        .map(|r| r.throughput_promedio)
        .fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

#[cfg(feature = "plots")]
fn render_throughput_chart(rows: &[SummaryRow], output_path: &Path, config: &PlotConfig) -> Result<()> {
    use crate::report::group_by_key;
    use plotters::prelude::*;

    if rows.is_empty() {
        return Err(AnalyzerError::PlotError("Summary has no rows to plot".to_string()));
    }

    let labels: Vec<&str> = rows.iter().map(|r| r.archivo.as_str()).collect();
    let n_bars = rows.len() as u32;

    let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AnalyzerError::PlotError(format!("Failed to fill background: {:?}", e)))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(160)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..n_bars).into_segmented(), 0.0..y_axis_max(rows))
        .map_err(|e| AnalyzerError::PlotError(format!("Failed to build chart: {:?}", e)))?;

    let label_formatter = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => labels
            .get(*i as usize)
            .map(|s| s.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .x_labels(rows.len())
        .x_label_style(
            ("sans-serif", 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_label_formatter(&label_formatter)
        .draw()
        .map_err(|e| AnalyzerError::PlotError(format!("Failed to draw mesh: {:?}", e)))?;

    let groups = group_by_key(rows.iter().enumerate(), |(_, row)| row.practica.clone());
    for (color_idx, (practice, members)) in groups.into_iter().enumerate() {
        let color = Palette99::pick(color_idx).mix(config.bar_opacity);

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(color.filled())
                    .margin(4)
                    .data(
                        members
                            .iter()
                            .map(|(idx, row)| (*idx as u32, row.throughput_promedio)),
                    ),
            )
            .map_err(|e| AnalyzerError::PlotError(format!("Failed to draw bars: {:?}", e)))?
            .label(practice)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| AnalyzerError::PlotError(format!("Failed to draw legend: {:?}", e)))?;

    root.present()
        .map_err(|e| AnalyzerError::PlotError(format!("Failed to present plot: {:?}", e)))?;

    Ok(())
}

#[cfg(not(feature = "plots"))]
fn render_throughput_chart(_rows: &[SummaryRow], _output_path: &Path, _config: &PlotConfig) -> Result<()> {
    Err(AnalyzerError::PlottingUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(archivo: &str, throughput: f64) -> SummaryRow {
        SummaryRow {
            archivo: archivo.to_string(),
            practica: AnalyzerConfig::default().practice_id(archivo).to_string(),
            throughput_promedio: throughput,
            tiempo_promedio: 1.0,
            throughput_std: 0.0,
            tiempo_std: 0.0,
            errores: 0,
            timeouts: 0,
        }
    }

    #[test]
    fn test_y_axis_headroom() {
        assert_eq!(y_axis_max(&[]), 1.0);
        assert_eq!(y_axis_max(&[row("p1_a.txt", 0.0)]), 1.0);
        let max = y_axis_max(&[row("p1_a.txt", 100.0), row("p2_a.txt", 200.0)]);
        assert!((max - 220.0).abs() < 1e-9);
    }

    #[cfg(feature = "plots")]
    #[test]
    fn test_render_rejects_empty_rows() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("chart.png");
        let err = render_throughput_chart(&[], &output, &PlotConfig::default()).unwrap_err();
        assert!(matches!(err, AnalyzerError::PlotError(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_summary_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = AnalyzerConfig::with_results_dir(dir.path());
        let err = plot_summary(&config, &PlotConfig::default()).unwrap_err();
        assert!(matches!(err, AnalyzerError::SummaryMissing(_)));
        assert!(!config.plot_path().exists());
    }
}
