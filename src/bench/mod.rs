//! Benchmark engine module
//!
//! Contains the timing primitive, the per-file benchmark driver, and the
//! suite orchestration.

pub mod file;
pub mod suite;
pub mod timing;

// Re-export commonly used types
pub use file::{async_benefit, comparison, ComparisonSummary, FileBenchmark};
pub use suite::SuiteRunner;
pub use timing::{measure, measure_async, Measurement};
