pub mod summary;

pub use summary::{StatSummary, mean, median, sample_stdev};
