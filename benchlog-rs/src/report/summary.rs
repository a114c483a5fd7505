//! CSV summary table
//!
//! One row per result file that produced both throughput and time values.
//! Column names are part of the output contract and consumed by the plotter.

use crate::error::{AnalyzerError, Result};
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;
use tracing::info;

pub const COL_FILE: &str = "archivo";
pub const COL_PRACTICE: &str = "practica";
pub const COL_THROUGHPUT_MEAN: &str = "throughput_promedio";
pub const COL_TIME_MEAN: &str = "tiempo_promedio";
pub const COL_THROUGHPUT_STD: &str = "throughput_std";
pub const COL_TIME_STD: &str = "tiempo_std";
pub const COL_ERRORS: &str = "errores";
pub const COL_TIMEOUTS: &str = "timeouts";

/// One summary row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub archivo: String,
    pub practica: String,
    pub throughput_promedio: f64,
    pub tiempo_promedio: f64,
    pub throughput_std: f64,
    pub tiempo_std: f64,
    pub errores: u64,
    pub timeouts: u64,
}

/// Build the summary DataFrame, columns in contract order
pub fn summary_frame(rows: &[SummaryRow]) -> Result<DataFrame> {
    let archivo: Vec<&str> = rows.iter().map(|r| r.archivo.as_str()).collect();
    let practica: Vec<&str> = rows.iter().map(|r| r.practica.as_str()).collect();
    let throughput_mean: Vec<f64> = rows.iter().map(|r| r.throughput_promedio).collect();
    let time_mean: Vec<f64> = rows.iter().map(|r| r.tiempo_promedio).collect();
    let throughput_std: Vec<f64> = rows.iter().map(|r| r.throughput_std).collect();
    let time_std: Vec<f64> = rows.iter().map(|r| r.tiempo_std).collect();
    let errores: Vec<u64> = rows.iter().map(|r| r.errores).collect();
    let timeouts: Vec<u64> = rows.iter().map(|r| r.timeouts).collect();

    let columns = vec![
        Column::new(COL_FILE.into(), archivo),
        Column::new(COL_PRACTICE.into(), practica),
        Column::new(COL_THROUGHPUT_MEAN.into(), throughput_mean),
        Column::new(COL_TIME_MEAN.into(), time_mean),
        Column::new(COL_THROUGHPUT_STD.into(), throughput_std),
        Column::new(COL_TIME_STD.into(), time_std),
        Column::new(COL_ERRORS.into(), errores),
        Column::new(COL_TIMEOUTS.into(), timeouts),
    ];

    Ok(DataFrame::new(columns)?)
}

/// Write the summary CSV with a header row
pub fn write_summary_csv(rows: &[SummaryRow], path: &Path) -> Result<()> {
    let mut df = summary_frame(rows)?;
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    info!("Wrote {} summary row(s) to {}", rows.len(), path.display());
    Ok(())
}

/// Read a summary CSV back into rows
pub fn read_summary_csv(path: &Path) -> Result<Vec<SummaryRow>> {
    if !path.exists() {
        return Err(AnalyzerError::SummaryMissing(path.to_path_buf()));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    // Header-only files carry no dtype information for the columns
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let archivo = text_column(&df, COL_FILE)?;
    let practica = text_column(&df, COL_PRACTICE)?;
    let throughput_promedio = float_column(&df, COL_THROUGHPUT_MEAN)?;
    let tiempo_promedio = float_column(&df, COL_TIME_MEAN)?;
    let throughput_std = float_column(&df, COL_THROUGHPUT_STD)?;
    let tiempo_std = float_column(&df, COL_TIME_STD)?;
    let errores = count_column(&df, COL_ERRORS)?;
    let timeouts = count_column(&df, COL_TIMEOUTS)?;

    Ok((0..df.height())
        .map(|i| SummaryRow {
            archivo: archivo[i].clone(),
            practica: practica[i].clone(),
            throughput_promedio: throughput_promedio[i],
            tiempo_promedio: tiempo_promedio[i],
            throughput_std: throughput_std[i],
            tiempo_std: tiempo_std[i],
            errores: errores[i],
            timeouts: timeouts[i],
        })
        .collect())
}

fn malformed(column: &str, reason: impl Into<String>) -> AnalyzerError {
    AnalyzerError::MalformedSummary {
        column: column.to_string(),
        reason: reason.into(),
    }
}

fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    column
        .str()?
        .into_iter()
        .map(|v| {
            v.map(str::to_string)
                .ok_or_else(|| malformed(name, "missing value"))
        })
        .collect()
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    column
        .f64()?
        .into_iter()
        .map(|v| v.ok_or_else(|| malformed(name, "missing or non-numeric value")))
        .collect()
}

fn count_column(df: &DataFrame, name: &str) -> Result<Vec<u64>> {
    let column = df.column(name)?.cast(&DataType::UInt64)?;
    column
        .u64()?
        .into_iter()
        .map(|v| v.ok_or_else(|| malformed(name, "missing or non-integer value")))
        .collect()
}
