//! Result export
//!
//! Persists a completed result set to an output directory. The suite
//! driver only depends on the [`ResultExporter`] capability; the concrete
//! formats live behind it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::ResultSet;
use crate::{CsvBenchError, Result, RESULTS_CSV_FILE, RESULTS_JSON_FILE};

/// Export collaborator: receives the full result set exactly once
pub trait ResultExporter {
    fn export_all(&self, set: &ResultSet, output_dir: &Path) -> Result<()>;
}

/// Versioned JSON document structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportFile {
    pub version: u32,
    pub result_set: ResultSet,
}

/// Writes the result set as a versioned JSON document
#[derive(Debug, Default)]
pub struct JsonExporter;

impl ResultExporter for JsonExporter {
    fn export_all(&self, set: &ResultSet, output_dir: &Path) -> Result<()> {
        ensure_output_dir(output_dir)?;

        let document = ExportFile {
            version: 1,
            result_set: set.clone(),
        };
        let content = serde_json::to_string_pretty(&document)?;

        let path = output_dir.join(RESULTS_JSON_FILE);
        fs::write(&path, content).map_err(|e| {
            CsvBenchError::ExportError(format!(
                "Failed to write results file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

/// Writes one CSV row per method result
#[derive(Debug, Default)]
pub struct CsvExporter;

impl ResultExporter for CsvExporter {
    fn export_all(&self, set: &ResultSet, output_dir: &Path) -> Result<()> {
        ensure_output_dir(output_dir)?;

        let path = output_dir.join(RESULTS_CSV_FILE);
        let mut writer = csv::Writer::from_path(&path).map_err(|e| {
            CsvBenchError::ExportError(format!(
                "Failed to open results file {}: {}",
                path.display(),
                e
            ))
        })?;

        writer.write_record([
            "benchmark_name",
            "test_case",
            "library",
            "method",
            "row_count",
            "iterations",
            "mean_time_ms",
            "std_dev_ms",
            "allocated_bytes",
            "file_size",
            "environment",
        ])?;

        for record in &set.results {
            writer.write_record([
                record.benchmark_name.clone(),
                record.test_case.clone(),
                record.library.clone(),
                record.method.clone(),
                record.row_count.to_string(),
                record.iterations.to_string(),
                format!("{:.4}", record.mean_time_ms),
                format!("{:.4}", record.std_dev_ms),
                record.allocated_bytes.to_string(),
                record.file_size.clone(),
                record.environment.clone(),
            ])?;
        }

        writer
            .flush()
            .map_err(|e| CsvBenchError::ExportError(format!("Failed to flush results: {}", e)))?;

        Ok(())
    }
}

/// Runs a list of exporters against the same result set
pub struct CompositeExporter {
    exporters: Vec<Box<dyn ResultExporter>>,
}

impl CompositeExporter {
    pub fn new(exporters: Vec<Box<dyn ResultExporter>>) -> Self {
        Self { exporters }
    }

    /// The standard format set: JSON document plus CSV table
    pub fn standard() -> Self {
        Self::new(vec![Box::new(JsonExporter), Box::new(CsvExporter)])
    }
}

impl ResultExporter for CompositeExporter {
    fn export_all(&self, set: &ResultSet, output_dir: &Path) -> Result<()> {
        for exporter in &self.exporters {
            exporter.export_all(set, output_dir)?;
        }
        Ok(())
    }
}

fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir).map_err(|e| {
        CsvBenchError::ExportError(format!(
            "Failed to create output directory {}: {}",
            output_dir.display(),
            e
        ))
    })
}
