use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Directorio {0} no existe")]
    ResultsDirMissing(PathBuf),

    #[error("No se encontraron archivos de resultados en {0}")]
    NoResultFiles(PathBuf),

    #[error("Failed to list {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid metric pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Polars error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),

    #[error("Report output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("Summary CSV not found: {0}")]
    SummaryMissing(PathBuf),

    #[error("Summary CSV column {column} is malformed: {reason}")]
    MalformedSummary { column: String, reason: String },

    #[error("Plot generation error: {0}")]
    PlotError(String),

    #[error("Plotting support not compiled in")]
    PlottingUnavailable,
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
