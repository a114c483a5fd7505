pub mod file;
pub mod run;

pub use file::{FileResult, analyze_content, analyze_file};
pub use run::{RunRecord, classify_run, split_runs};
