//! Configuration management module
//!
//! Handles loading, saving, and validation of the harness configuration,
//! including the iteration-budget policy applied per fixture.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::ReadOptions;
use crate::{CsvBenchError, Result, APP_NAME, CONFIG_FILE};

/// Harness configuration covering directories and the iteration policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Directory containing the fixture files
    pub fixture_dir: PathBuf,
    /// Directory the exporters write into
    pub output_dir: PathBuf,
    /// Timed iterations for an ordinary fixture
    pub default_iterations: u32,
    /// Timed iterations for fixtures whose name signals a large file
    pub large_file_iterations: u32,
    /// Ceiling applied to asynchronous methods regardless of file size
    pub async_iteration_cap: u32,
    /// Timed iterations for synchronous methods in the extreme pass
    pub extreme_iterations: u32,
    /// Timed iterations for asynchronous methods in the extreme pass
    pub extreme_async_iterations: u32,
    /// Substring of a fixture name that triggers the reduced count
    pub large_marker: String,
    /// File name of the optional extreme fixture
    pub extreme_fixture: String,
    /// Whether the async engine variants run
    pub enable_async: bool,
    /// Whether fixtures carry a header row
    pub has_header: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            fixture_dir: PathBuf::from("fixtures"),
            output_dir: PathBuf::from("benchmark-results"),
            default_iterations: 20,
            large_file_iterations: 5,
            async_iteration_cap: 10,
            extreme_iterations: 3,
            extreme_async_iterations: 2,
            large_marker: "large".to_string(),
            extreme_fixture: "huge_dataset.csv".to_string(),
            enable_async: true,
            has_header: true,
        }
    }
}

impl BenchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timed iteration count for a fixture, by name
    pub fn iterations_for(&self, file_name: &str) -> u32 {
        if file_name.contains(&self.large_marker) {
            self.large_file_iterations
        } else {
            self.default_iterations
        }
    }

    /// Iteration count for asynchronous methods against a fixture.
    ///
    /// Async overhead per call is assumed higher, so the count is capped
    /// below the file-size policy.
    pub fn async_iterations_for(&self, file_name: &str) -> u32 {
        self.iterations_for(file_name).min(self.async_iteration_cap)
    }

    /// Parsing options handed to the engine
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            has_header: self.has_header,
            ..ReadOptions::default()
        }
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.fixture_dir.as_os_str().is_empty() {
            return Err(CsvBenchError::ConfigError(
                "Fixture directory must not be empty".to_string(),
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(CsvBenchError::ConfigError(
                "Output directory must not be empty".to_string(),
            ));
        }

        for (name, value) in [
            ("default_iterations", self.default_iterations),
            ("large_file_iterations", self.large_file_iterations),
            ("async_iteration_cap", self.async_iteration_cap),
            ("extreme_iterations", self.extreme_iterations),
            ("extreme_async_iterations", self.extreme_async_iterations),
        ] {
            if value == 0 {
                return Err(CsvBenchError::ConfigError(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }

        const MAX_ITERATIONS: u32 = 10_000;
        if self.default_iterations > MAX_ITERATIONS {
            return Err(CsvBenchError::ConfigError(format!(
                "Too many iterations: {} (max: {})",
                self.default_iterations, MAX_ITERATIONS
            )));
        }

        if self.large_marker.is_empty() {
            return Err(CsvBenchError::ConfigError(
                "Large-file marker must not be empty".to_string(),
            ));
        }

        if self.extreme_fixture.is_empty() {
            return Err(CsvBenchError::ConfigError(
                "Extreme fixture name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the fixture directory
    pub fn with_fixture_dir(mut self, dir: PathBuf) -> Self {
        self.fixture_dir = dir;
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Set the default iteration count
    pub fn with_default_iterations(mut self, iterations: u32) -> Self {
        self.default_iterations = iterations;
        self
    }

    /// Enable or disable the asynchronous method variants
    pub fn with_async(mut self, enabled: bool) -> Self {
        self.enable_async = enabled;
        self
    }

    /// Load configuration from the standard config file location.
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            CsvBenchError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            CsvBenchError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CsvBenchError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CsvBenchError::ConfigError(format!("Failed to serialize configuration: {}", e))
        })?;

        fs::write(&config_path, content).map_err(|e| {
            CsvBenchError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            CsvBenchError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
