//! End-to-end suite runs against a mock engine and tempdir fixtures

use std::fs;
use std::io::Read;
use std::sync::Arc;

use tempfile::TempDir;

use csvbench::bench::file::{ASYNC_READ, ASYNC_STREAM, BULK_READ, COUNT_ONLY, STREAM_READING};
use csvbench::bench::SuiteRunner;
use csvbench::config::BenchConfig;
use csvbench::engine::{CsvEngine, CsvRecord, ReadOptions, RecordStream, RustCsvEngine};
use csvbench::export::{CompositeExporter, ExportFile};
use csvbench::fixtures::{self, FixtureSpec};
use csvbench::{RESULTS_CSV_FILE, RESULTS_JSON_FILE};

/// Engine that reports a fixed record count for every access pattern
#[derive(Debug, Clone, Copy)]
struct MockEngine {
    count: u64,
}

struct MockStream {
    remaining: u64,
}

impl RecordStream for MockStream {
    fn try_read_record(&mut self) -> csvbench::Result<Option<CsvRecord>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        Ok(Some(CsvRecord::new(vec!["x".to_string()])))
    }
}

impl CsvEngine for MockEngine {
    fn name(&self) -> &'static str {
        "mock-csv"
    }

    fn read_all_records(
        &self,
        _text: &str,
        _options: &ReadOptions,
    ) -> csvbench::Result<Vec<CsvRecord>> {
        Ok((0..self.count)
            .map(|i| CsvRecord::new(vec![i.to_string()]))
            .collect())
    }

    fn count_records(&self, _text: &str, _options: &ReadOptions) -> csvbench::Result<u64> {
        Ok(self.count)
    }

    fn open_reader(
        &self,
        _input: Box<dyn Read + Send>,
        _options: &ReadOptions,
    ) -> csvbench::Result<Box<dyn RecordStream + Send>> {
        Ok(Box::new(MockStream {
            remaining: self.count,
        }))
    }
}

fn test_config(dir: &TempDir) -> BenchConfig {
    BenchConfig::default()
        .with_fixture_dir(dir.path().to_path_buf())
        .with_output_dir(dir.path().join("out"))
        .with_default_iterations(4)
}

fn write_fixture(dir: &TempDir, name: &str) {
    fs::write(dir.path().join(name), "a,b\n1,2\n3,4\n5,6\n").unwrap();
}

#[tokio::test]
async fn test_records_only_for_present_fixtures() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "alpha.csv");

    let config = test_config(&dir);
    let engine: Arc<dyn CsvEngine> = Arc::new(MockEngine { count: 3 });
    let exporter = CompositeExporter::standard();
    let runner = SuiteRunner::new(&config, engine, &exporter);

    let fixtures = vec![
        FixtureSpec::new("alpha.csv", "Alpha fixture"),
        FixtureSpec::new("ghost.csv", "Missing fixture"),
    ];
    let set = runner.run(&fixtures).await.unwrap();

    // One record per declared method, only for the present file
    let methods: Vec<&str> = set.results.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(
        methods,
        vec![BULK_READ, COUNT_ONLY, STREAM_READING, ASYNC_READ, ASYNC_STREAM]
    );
    assert!(set.results.iter().all(|r| r.test_case == "Alpha fixture"));
    assert!(set.results.iter().all(|r| r.row_count == 3));
    assert!(set.results.iter().all(|r| r.library == "mock-csv"));
    assert!(set.results.iter().all(|r| r.iterations == 4));
    assert!(set.results.iter().all(|r| r.std_dev_ms == 0.0));
}

#[tokio::test]
async fn test_large_marker_uses_reduced_iterations() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "large_input.csv");
    write_fixture(&dir, "small_input.csv");

    let config = test_config(&dir);
    let engine: Arc<dyn CsvEngine> = Arc::new(MockEngine { count: 3 });
    let exporter = CompositeExporter::standard();
    let runner = SuiteRunner::new(&config, engine, &exporter);

    let fixtures = vec![
        FixtureSpec::new("large_input.csv", "Large fixture"),
        FixtureSpec::new("small_input.csv", "Small fixture"),
    ];
    let set = runner.run(&fixtures).await.unwrap();

    for record in &set.results {
        let expected = if record.test_case == "Large fixture" {
            config.large_file_iterations
        } else {
            config.default_iterations
        };
        assert_eq!(record.iterations, expected, "method {}", record.method);
    }
}

#[tokio::test]
async fn test_async_cap_bounds_async_methods() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "alpha.csv");

    let mut config = test_config(&dir);
    config.default_iterations = 20;
    config.async_iteration_cap = 10;

    let engine: Arc<dyn CsvEngine> = Arc::new(MockEngine { count: 3 });
    let exporter = CompositeExporter::standard();
    let runner = SuiteRunner::new(&config, engine, &exporter);

    let fixtures = vec![FixtureSpec::new("alpha.csv", "Alpha fixture")];
    let set = runner.run(&fixtures).await.unwrap();

    for record in &set.results {
        let expected = if record.method.starts_with("Async") { 10 } else { 20 };
        assert_eq!(record.iterations, expected, "method {}", record.method);
    }
}

#[tokio::test]
async fn test_async_disabled_runs_sync_methods_only() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "alpha.csv");

    let config = test_config(&dir).with_async(false);
    let engine: Arc<dyn CsvEngine> = Arc::new(MockEngine { count: 3 });
    let exporter = CompositeExporter::standard();
    let runner = SuiteRunner::new(&config, engine, &exporter);

    let fixtures = vec![FixtureSpec::new("alpha.csv", "Alpha fixture")];
    let set = runner.run(&fixtures).await.unwrap();

    let methods: Vec<&str> = set.results.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, vec![BULK_READ, COUNT_ONLY, STREAM_READING]);
}

#[tokio::test]
async fn test_extreme_pass_emits_records() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "alpha.csv");
    write_fixture(&dir, "huge_dataset.csv");

    let mut config = test_config(&dir);
    config.extreme_iterations = 3;
    config.extreme_async_iterations = 2;

    let engine: Arc<dyn CsvEngine> = Arc::new(MockEngine { count: 3 });
    let exporter = CompositeExporter::standard();
    let runner = SuiteRunner::new(&config, engine, &exporter);

    let fixtures = vec![FixtureSpec::new("alpha.csv", "Alpha fixture")];
    let set = runner.run(&fixtures).await.unwrap();

    let extreme: Vec<_> = set
        .results
        .iter()
        .filter(|r| r.test_case == "Huge dataset (extreme)")
        .collect();
    assert_eq!(extreme.len(), 3);
    assert_eq!(extreme[0].method, COUNT_ONLY);
    assert_eq!(extreme[0].iterations, 3);
    assert_eq!(extreme[1].method, STREAM_READING);
    assert_eq!(extreme[1].iterations, 3);
    assert_eq!(extreme[2].method, "Async Lazy Stream");
    assert_eq!(extreme[2].iterations, 2);
}

#[tokio::test]
async fn test_export_round_trip() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "alpha.csv");

    let config = test_config(&dir);
    let engine: Arc<dyn CsvEngine> = Arc::new(MockEngine { count: 3 });
    let exporter = CompositeExporter::standard();
    let runner = SuiteRunner::new(&config, engine, &exporter);

    let fixtures = vec![FixtureSpec::new("alpha.csv", "Alpha fixture")];
    let set = runner.run(&fixtures).await.unwrap();

    let json_path = config.output_dir.join(RESULTS_JSON_FILE);
    let csv_path = config.output_dir.join(RESULTS_CSV_FILE);
    assert!(json_path.exists());
    assert!(csv_path.exists());

    let document: ExportFile =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(document.version, 1);
    assert_eq!(document.result_set.results.len(), set.len());

    let csv_content = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv_content.lines().count(), set.len() + 1);
}

#[tokio::test]
async fn test_real_engine_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("simple.csv");
    fixtures::generate_dataset(&path, 3).unwrap();

    let config = test_config(&dir).with_default_iterations(2);
    let engine: Arc<dyn CsvEngine> = Arc::new(RustCsvEngine::new());
    let exporter = CompositeExporter::standard();
    let runner = SuiteRunner::new(&config, engine, &exporter);

    let fixtures = vec![FixtureSpec::new("simple.csv", "Simple 3-record file")];
    let set = runner.run(&fixtures).await.unwrap();

    assert_eq!(set.len(), 5);
    assert!(set.results.iter().all(|r| r.row_count == 3));
    assert!(set.results.iter().all(|r| r.library == "rust-csv"));
    assert!(set.results.iter().all(|r| r.mean_time_ms >= 0.0));
}
