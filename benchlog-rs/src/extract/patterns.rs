//! Pattern tables for metric extraction
//!
//! A [`PatternTable`] is an ordered list of compiled phrasings for one metric.
//! Each pattern must capture the numeric value in its first group; the value
//! converter is the numeric type requested from [`PatternTable::extract`].

use crate::error::Result;
use regex::Regex;
use std::str::FromStr;
use tracing::debug;

/// Ordered set of accepted log phrasings for a single metric
#[derive(Debug, Clone)]
pub struct PatternTable {
    name: &'static str,
    patterns: Vec<Regex>,
}

impl PatternTable {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            patterns: Vec::new(),
        }
    }

    /// Compile a table from pattern sources, failing on the first invalid one
    pub fn from_patterns(name: &'static str, sources: &[&str]) -> Result<Self> {
        sources
            .iter()
            .try_fold(Self::new(name), |table, source| table.with_pattern(source))
    }

    /// Append a phrasing; it is tried after every pattern already present
    pub fn with_pattern(mut self, source: &str) -> Result<Self> {
        self.patterns.push(Regex::new(source)?);
        Ok(self)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Extract every captured value, pattern by pattern then match by match
    ///
    /// Captures that do not convert to `T` are skipped.
    pub fn extract<T: FromStr>(&self, text: &str) -> Vec<T> {
        let values: Vec<T> = self
            .patterns
            .iter()
            .flat_map(|pattern| pattern.captures_iter(text))
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| match m.as_str().parse::<T>() {
                Ok(value) => Some(value),
                Err(_) => {
                    debug!("{}: discarding unparsable value {:?}", self.name, m.as_str());
                    None
                }
            })
            .collect();

        debug!("{}: extracted {} value(s)", self.name, values.len());
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_order_then_match_order() {
        let table = PatternTable::from_patterns("demo", &[r"b=(\d+)", r"a=(\d+)"]).unwrap();
        let values: Vec<u64> = table.extract("a=1 b=2 a=3 b=4");
        assert_eq!(values, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = PatternTable::new("demo").with_pattern(r"(\d+");
        assert!(result.is_err());
    }

    #[test]
    fn test_overflowing_capture_is_skipped() {
        let table = PatternTable::from_patterns("demo", &[r"n=(\d+)"]).unwrap();
        let values: Vec<u8> = table.extract("n=12 n=999");
        assert_eq!(values, vec![12]);
    }
}
