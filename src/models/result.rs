//! Benchmark result data models
//!
//! Contains the per-method result record and the suite-level result set
//! handed to the exporters at the end of a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One measured (fixture, method) outcome.
///
/// Constructed once per measurement and never mutated afterwards; a new
/// measurement produces a new record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodResult {
    /// Name of the overall benchmark run
    pub benchmark_name: String,
    /// Human description of the input fixture
    pub test_case: String,
    /// Name of the library under test
    pub library: String,
    /// Name of the access pattern measured
    pub method: String,
    /// Record count observed, normalized per iteration
    pub row_count: u64,
    /// Number of timed repetitions executed (warmup excluded)
    pub iterations: u32,
    /// Elapsed time of all timed iterations divided by `iterations`
    pub mean_time_ms: f64,
    /// Standard deviation across iterations; this harness does not
    /// compute variance, so the field is always 0.0
    pub std_dev_ms: f64,
    /// Allocated bytes per operation; not measured, always 0
    pub allocated_bytes: u64,
    /// Human-readable size of the input file
    pub file_size: String,
    /// Descriptor of the runtime the measurement was taken under
    pub environment: String,
}

impl MethodResult {
    /// One-line summary for console reporting
    pub fn summary(&self) -> String {
        format!(
            "{} / {} : {:.2} ms/op over {} iterations ({} records)",
            self.test_case, self.method, self.mean_time_ms, self.iterations, self.row_count
        )
    }
}

/// Ordered collection of method results plus suite-level metadata.
///
/// Created once per suite invocation, appended to throughout the run, and
/// handed whole to the export collaborator at the end. Insertion order is
/// measurement order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    /// Name of the benchmark suite
    pub suite_name: String,
    /// Runtime/environment descriptor for the whole run
    pub runtime_descriptor: String,
    /// Timestamp when the suite run started
    pub timestamp: DateTime<Utc>,
    /// Collected records, in measurement order
    pub results: Vec<MethodResult>,
}

impl ResultSet {
    /// Create an empty result set for a new suite run
    pub fn new(suite_name: impl Into<String>) -> Self {
        Self {
            suite_name: suite_name.into(),
            runtime_descriptor: detect_runtime(),
            timestamp: Utc::now(),
            results: Vec::new(),
        }
    }

    /// Append a record, preserving insertion order
    pub fn push(&mut self, result: MethodResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Describe the runtime the measurements are taken under
pub fn detect_runtime() -> String {
    format!(
        "Rust ({} {})",
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
