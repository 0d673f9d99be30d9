//! Fixture catalog and synthetic dataset generation
//!
//! The suite measures a declared, ordered list of named sample files.
//! Fixtures that are not checked in can be synthesized deterministically
//! so a fresh checkout still produces a full run.

use std::path::Path;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{CsvBenchError, Result};

/// One declared benchmark input: file name plus human description
#[derive(Debug, Clone)]
pub struct FixtureSpec {
    pub file_name: String,
    pub description: String,
}

impl FixtureSpec {
    pub fn new(file_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            description: description.into(),
        }
    }
}

/// The declared suite fixtures, in measurement order
pub fn standard_fixtures() -> Vec<FixtureSpec> {
    vec![
        FixtureSpec::new("simple.csv", "Simple 3-record file"),
        FixtureSpec::new("employees.csv", "Employee data (10 records)"),
        FixtureSpec::new("products.csv", "Product catalog with quotes"),
        FixtureSpec::new("mixed_data_types.csv", "Mixed data types"),
        FixtureSpec::new("medium_dataset.csv", "Medium dataset (1K records)"),
        FixtureSpec::new("large_dataset_10k.csv", "Large dataset (10K records)"),
    ]
}

/// Row counts used when a standard fixture has to be synthesized
fn standard_row_count(file_name: &str) -> usize {
    match file_name {
        "simple.csv" => 3,
        "employees.csv" => 10,
        "products.csv" => 25,
        "mixed_data_types.csv" => 50,
        "medium_dataset.csv" => 1_000,
        "large_dataset_10k.csv" => 10_000,
        _ => 100,
    }
}

/// Write a deterministic synthetic dataset with `rows` records.
///
/// Schema is `id,name,value,score` with a quoted name column; the RNG is
/// seeded from the row count so repeated generation is reproducible.
pub fn generate_dataset(path: &Path, rows: usize) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            CsvBenchError::FixtureError(format!(
                "Failed to create fixture directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut rng = SmallRng::seed_from_u64(rows as u64);
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        CsvBenchError::FixtureError(format!("Failed to create fixture {}: {}", path.display(), e))
    })?;

    writer.write_record(["id", "name", "value", "score"])?;
    for id in 0..rows {
        let value: f64 = rng.gen_range(0.0..10_000.0);
        let score: u32 = rng.gen_range(0..100);
        writer.write_record([
            id.to_string(),
            format!("name, {}", id),
            format!("{:.2}", value),
            score.to_string(),
        ])?;
    }

    writer
        .flush()
        .map_err(|e| CsvBenchError::FixtureError(format!("Failed to flush fixture: {}", e)))?;

    Ok(())
}

/// Generate any missing standard fixture under `dir`.
///
/// Existing files are left untouched. Returns the names generated.
pub fn ensure_standard_fixtures(dir: &Path) -> Result<Vec<String>> {
    let mut generated = Vec::new();

    for spec in standard_fixtures() {
        let path = dir.join(&spec.file_name);
        if path.exists() {
            continue;
        }
        generate_dataset(&path, standard_row_count(&spec.file_name))?;
        generated.push(spec.file_name);
    }

    Ok(generated)
}

/// Generate the extreme fixture with an explicit row count.
///
/// Never created implicitly; the extreme pass is gated on its presence.
pub fn generate_extreme(dir: &Path, file_name: &str, rows: usize) -> Result<()> {
    generate_dataset(&dir.join(file_name), rows)
}
