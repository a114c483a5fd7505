//! Metric extractors for benchmark log text
//!
//! Three independent vocabularies are recognised:
//! - throughput: `Throughput: 1234 ops/sec` (also `elementos/segundo`,
//!   `items/segundo`), case-insensitive
//! - elapsed time: `Tiempo total: 1.2345 segundos`, `completado en 0.5 segundos`,
//!   `Tiempo: 0.25 segundos`
//! - operation counts: `total=42`, `Resultado: 42`, `Items procesados: 42`,
//!   `Operaciones completadas: 42`
//!
//! No unit consistency is checked: every match contributes.

pub mod patterns;

pub use patterns::PatternTable;

use crate::error::Result;
use once_cell::sync::Lazy;
use tracing::error;

const THROUGHPUT_PATTERNS: &[&str] =
    &[r"(?i)Throughput:\s+(\d+(?:\.\d+)?)\s+(?:ops/sec|elementos/segundo|items/segundo)"];

const TIME_PATTERNS: &[&str] = &[
    r"Tiempo total:\s+(\d+\.\d+)\s+segundos",
    r"completado en\s+(\d+\.\d+)\s+segundos",
    r"Tiempo:\s+(\d+\.\d+)\s+segundos",
];

const OPERATION_PATTERNS: &[&str] = &[
    r"total=(\d+)",
    r"Resultado:\s+(\d+)",
    r"Items procesados:\s+(\d+)",
    r"Operaciones completadas:\s+(\d+)",
];

static STOCK_EXTRACTORS: Lazy<MetricExtractors> = Lazy::new(MetricExtractors::stock);

// Stock sources are literals; test_stock_patterns_compile guards them
fn stock_table(name: &'static str, sources: &[&str]) -> PatternTable {
    PatternTable::from_patterns(name, sources).unwrap_or_else(|e| {
        error!("{} patterns failed to compile: {}", name, e);
        PatternTable::new(name)
    })
}

/// Metrics extracted from one block of log text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
    pub throughput: Vec<f64>,
    pub time: Vec<f64>,
    pub operations: Vec<u64>,
}

/// One pattern table per metric
#[derive(Debug, Clone)]
pub struct MetricExtractors {
    pub throughput: PatternTable,
    pub time: PatternTable,
    pub operations: PatternTable,
}

impl MetricExtractors {
    fn stock() -> Self {
        Self {
            throughput: stock_table("throughput", THROUGHPUT_PATTERNS),
            time: stock_table("time", TIME_PATTERNS),
            operations: stock_table("operations", OPERATION_PATTERNS),
        }
    }

    /// Tables for the phrasings emitted by the lab benchmarks
    pub fn standard() -> &'static MetricExtractors {
        &STOCK_EXTRACTORS
    }

    /// Run all three extractors over a run segment
    pub fn extract(&self, text: &str) -> RunMetrics {
        RunMetrics {
            throughput: self.throughput.extract(text),
            time: self.time.extract(text),
            operations: self.operations.extract(text),
        }
    }

    /// Add an extra throughput phrasing
    pub fn with_throughput_pattern(mut self, source: &str) -> Result<Self> {
        self.throughput = self.throughput.with_pattern(source)?;
        Ok(self)
    }

    /// Add an extra elapsed-time phrasing
    pub fn with_time_pattern(mut self, source: &str) -> Result<Self> {
        self.time = self.time.with_pattern(source)?;
        Ok(self)
    }

    /// Add an extra operation-count phrasing
    pub fn with_operations_pattern(mut self, source: &str) -> Result<Self> {
        self.operations = self.operations.with_pattern(source)?;
        Ok(self)
    }
}

impl Default for MetricExtractors {
    fn default() -> Self {
        STOCK_EXTRACTORS.clone()
    }
}

pub fn extract_throughput(text: &str) -> Vec<f64> {
    STOCK_EXTRACTORS.throughput.extract(text)
}

pub fn extract_time(text: &str) -> Vec<f64> {
    STOCK_EXTRACTORS.time.extract(text)
}

pub fn extract_operations(text: &str) -> Vec<u64> {
    STOCK_EXTRACTORS.operations.extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stock_patterns_compile() {
        for (name, sources) in [
            ("throughput", THROUGHPUT_PATTERNS),
            ("time", TIME_PATTERNS),
            ("operations", OPERATION_PATTERNS),
        ] {
            let table = PatternTable::from_patterns(name, sources).unwrap();
            assert_eq!(table.len(), sources.len());
        }
    }

    #[test]
    fn test_throughput_ops_sec() {
        assert_eq!(extract_throughput("Throughput: 500 ops/sec"), vec![500.0]);
    }

    #[test]
    fn test_throughput_elementos_fractional() {
        let values = extract_throughput("Throughput: 500.5 elementos/segundo");
        assert_eq!(values.len(), 1);
        assert_relative_eq!(values[0], 500.5);
    }

    #[test]
    fn test_throughput_is_case_insensitive() {
        let text = "THROUGHPUT: 10 OPS/SEC\nthroughput: 20 Items/Segundo";
        assert_eq!(extract_throughput(text), vec![10.0, 20.0]);
    }

    #[test]
    fn test_throughput_rejects_unknown_unit() {
        // p3 prints "ops/segundo", which is not an accepted label
        assert!(extract_throughput("Throughput: 900 ops/segundo").is_empty());
    }

    #[test]
    fn test_time_total() {
        let values = extract_time("Tiempo total: 1.2300 segundos");
        assert_eq!(values.len(), 1);
        assert_relative_eq!(values[0], 1.23);
    }

    #[test]
    fn test_time_phrasings_in_table_order() {
        let text = "Tiempo: 0.5000 segundos\n\
                    Productor 0 completado en 0.2500 segundos\n\
                    Tiempo total: 1.0000 segundos";
        assert_eq!(extract_time(text), vec![1.0, 0.25, 0.5]);
    }

    #[test]
    fn test_time_requires_decimal_point() {
        assert!(extract_time("Tiempo total: 3 segundos").is_empty());
    }

    #[test]
    fn test_time_is_case_sensitive() {
        assert!(extract_time("tiempo total: 1.5 segundos").is_empty());
    }

    #[test]
    fn test_operations() {
        let text = "Resultado: 42 (esperado: 50)\n\
                    total=7\n\
                    Items procesados: 100\n\
                    Operaciones completadas: 9";
        assert_eq!(extract_operations(text), vec![7, 42, 100, 9]);
    }

    #[test]
    fn test_extract_all_metrics() {
        let text = "Resultado: 4000000\nTiempo: 0.1234 segundos\nThroughput: 32414911 ops/sec\n";
        let metrics = MetricExtractors::standard().extract(text);
        assert_eq!(metrics.throughput, vec![32414911.0]);
        assert_eq!(metrics.time, vec![0.1234]);
        assert_eq!(metrics.operations, vec![4000000]);
    }

    #[test]
    fn test_custom_phrasing_extends_table() {
        let extractors = MetricExtractors::default()
            .with_throughput_pattern(r"Rate:\s+(\d+(?:\.\d+)?)\s+ops/s\b")
            .unwrap();
        let metrics = extractors.extract("Throughput: 10 ops/sec\nRate: 20 ops/s\n");
        assert_eq!(metrics.throughput, vec![10.0, 20.0]);
        assert!(MetricExtractors::standard().extract("Rate: 20 ops/s").throughput.is_empty());
    }
}
