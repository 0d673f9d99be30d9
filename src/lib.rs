//! csvbench - CSV parsing benchmark harness
//!
//! Drives a CSV engine through several access patterns (bulk read,
//! count-only, streaming, and serialized async variants) against a set of
//! fixture files and assembles the measurements into an exportable
//! result set.

use std::fmt;

// Public re-exports
pub mod bench;
pub mod config;
pub mod engine;
pub mod export;
pub mod fixtures;
pub mod models;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum CsvBenchError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Benchmark execution error
    BenchmarkError(String),
    /// CSV engine failure (malformed input, reader error)
    EngineError(String),
    /// Result export error
    ExportError(String),
    /// Fixture generation error
    FixtureError(String),
}

impl fmt::Display for CsvBenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvBenchError::IoError(err) => write!(f, "I/O error: {}", err),
            CsvBenchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            CsvBenchError::BenchmarkError(msg) => write!(f, "Benchmark error: {}", msg),
            CsvBenchError::EngineError(msg) => write!(f, "CSV engine error: {}", msg),
            CsvBenchError::ExportError(msg) => write!(f, "Export error: {}", msg),
            CsvBenchError::FixtureError(msg) => write!(f, "Fixture error: {}", msg),
        }
    }
}

impl std::error::Error for CsvBenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CsvBenchError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CsvBenchError {
    fn from(err: std::io::Error) -> Self {
        CsvBenchError::IoError(err)
    }
}

impl From<csv::Error> for CsvBenchError {
    fn from(err: csv::Error) -> Self {
        CsvBenchError::EngineError(err.to_string())
    }
}

impl From<serde_json::Error> for CsvBenchError {
    fn from(err: serde_json::Error) -> Self {
        CsvBenchError::ExportError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for CsvBenchError {
    fn from(err: toml::de::Error) -> Self {
        CsvBenchError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for CsvBenchError {
    fn from(err: toml::ser::Error) -> Self {
        CsvBenchError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for csvbench operations
pub type Result<T> = std::result::Result<T, CsvBenchError>;

// Common constants
pub const APP_NAME: &str = "csvbench";
pub const CONFIG_FILE: &str = "csvbench.toml";
pub const RESULTS_JSON_FILE: &str = "results.json";
pub const RESULTS_CSV_FILE: &str = "results.csv";
pub const SUITE_NAME: &str = "CSV Real Data Performance";
pub const BENCHMARK_NAME: &str = "Real Data Performance";
