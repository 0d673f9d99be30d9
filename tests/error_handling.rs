//! Failure containment: per-file errors are absorbed, export errors are not

use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use csvbench::bench::file::BULK_READ;
use csvbench::bench::SuiteRunner;
use csvbench::config::BenchConfig;
use csvbench::engine::{CsvEngine, CsvRecord, ReadOptions, RecordStream};
use csvbench::export::{CompositeExporter, ResultExporter};
use csvbench::fixtures::FixtureSpec;
use csvbench::models::ResultSet;
use csvbench::CsvBenchError;

/// Engine whose count-only path always fails
#[derive(Debug, Clone, Copy)]
struct CountFailsEngine;

impl CsvEngine for CountFailsEngine {
    fn name(&self) -> &'static str {
        "failing-csv"
    }

    fn read_all_records(
        &self,
        _text: &str,
        _options: &ReadOptions,
    ) -> csvbench::Result<Vec<CsvRecord>> {
        Ok(vec![CsvRecord::new(vec!["x".to_string()]); 2])
    }

    fn count_records(&self, _text: &str, _options: &ReadOptions) -> csvbench::Result<u64> {
        Err(CsvBenchError::EngineError("count failed".to_string()))
    }

    fn open_reader(
        &self,
        _input: Box<dyn Read + Send>,
        _options: &ReadOptions,
    ) -> csvbench::Result<Box<dyn RecordStream + Send>> {
        Err(CsvBenchError::EngineError("open failed".to_string()))
    }
}

/// Exporter that always fails
struct FailingExporter;

impl ResultExporter for FailingExporter {
    fn export_all(&self, _set: &ResultSet, _output_dir: &Path) -> csvbench::Result<()> {
        Err(CsvBenchError::ExportError("disk full".to_string()))
    }
}

fn test_config(dir: &TempDir) -> BenchConfig {
    BenchConfig::default()
        .with_fixture_dir(dir.path().to_path_buf())
        .with_output_dir(dir.path().join("out"))
        .with_default_iterations(2)
}

fn write_fixture(dir: &TempDir, name: &str) {
    fs::write(dir.path().join(name), "a,b\n1,2\n3,4\n").unwrap();
}

#[tokio::test]
async fn test_mid_file_failure_retains_earlier_records() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "first.csv");
    write_fixture(&dir, "second.csv");

    let config = test_config(&dir);
    let engine: Arc<dyn CsvEngine> = Arc::new(CountFailsEngine);
    let exporter = CompositeExporter::standard();
    let runner = SuiteRunner::new(&config, engine, &exporter);

    let fixtures = vec![
        FixtureSpec::new("first.csv", "First fixture"),
        FixtureSpec::new("second.csv", "Second fixture"),
    ];
    let set = runner.run(&fixtures).await.unwrap();

    // Count Only failed, so each file contributes only its Bulk Read
    // record; the suite still covers every fixture and exports.
    assert_eq!(set.len(), 2);
    assert!(set.results.iter().all(|r| r.method == BULK_READ));
    let cases: Vec<&str> = set.results.iter().map(|r| r.test_case.as_str()).collect();
    assert_eq!(cases, vec!["First fixture", "Second fixture"]);
}

#[tokio::test]
async fn test_export_failure_propagates() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "first.csv");

    let config = test_config(&dir).with_async(false);
    let engine: Arc<dyn CsvEngine> = Arc::new(CountFailsEngine);
    let exporter = FailingExporter;
    let runner = SuiteRunner::new(&config, engine, &exporter);

    let fixtures = vec![FixtureSpec::new("first.csv", "First fixture")];
    let result = runner.run(&fixtures).await;

    assert!(matches!(result, Err(CsvBenchError::ExportError(_))));
}

#[tokio::test]
async fn test_empty_fixture_list_is_fatal() {
    let dir = TempDir::new().unwrap();

    let config = test_config(&dir);
    let engine: Arc<dyn CsvEngine> = Arc::new(CountFailsEngine);
    let exporter = CompositeExporter::standard();
    let runner = SuiteRunner::new(&config, engine, &exporter);

    let result = runner.run(&[]).await;
    assert!(matches!(result, Err(CsvBenchError::ConfigError(_))));
}

#[tokio::test]
async fn test_missing_extreme_fixture_is_skipped() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "first.csv");

    let config = test_config(&dir);
    let engine: Arc<dyn CsvEngine> = Arc::new(CountFailsEngine);
    let exporter = CompositeExporter::standard();
    let runner = SuiteRunner::new(&config, engine, &exporter);

    let fixtures = vec![FixtureSpec::new("first.csv", "First fixture")];
    let set = runner.run(&fixtures).await.unwrap();

    assert!(set
        .results
        .iter()
        .all(|r| r.test_case != "Huge dataset (extreme)"));
}
