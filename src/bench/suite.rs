//! Suite orchestration
//!
//! Iterates the declared fixture list, skips missing files, drives the
//! per-file benchmark, optionally runs the extreme-file pass, and hands
//! the completed result set to the export collaborator exactly once.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::bench::file::{FileBenchmark, COUNT_ONLY, STREAM_READING};
use crate::bench::timing::{measure, measure_async, Measurement};
use crate::config::BenchConfig;
use crate::engine::{AsyncCsvEngine, CsvEngine};
use crate::export::ResultExporter;
use crate::fixtures::FixtureSpec;
use crate::models::{detect_runtime, MethodResult, ResultSet};
use crate::util::units::{calculate_throughput_mbps, format_file_size};
use crate::{CsvBenchError, Result, BENCHMARK_NAME, SUITE_NAME};

/// Method name for the extreme pass's lazy async variant
pub const ASYNC_LAZY_STREAM: &str = "Async Lazy Stream";

const EXTREME_TEST_CASE: &str = "Huge dataset (extreme)";

/// Runs the whole benchmark suite against one engine
pub struct SuiteRunner<'a> {
    config: &'a BenchConfig,
    engine: Arc<dyn CsvEngine>,
    async_engine: Option<AsyncCsvEngine>,
    exporter: &'a dyn ResultExporter,
}

impl<'a> SuiteRunner<'a> {
    /// Create a runner; the async capability is resolved here, once,
    /// from the configuration.
    pub fn new(
        config: &'a BenchConfig,
        engine: Arc<dyn CsvEngine>,
        exporter: &'a dyn ResultExporter,
    ) -> Self {
        let async_engine = config
            .enable_async
            .then(|| AsyncCsvEngine::new(Arc::clone(&engine)));

        Self {
            config,
            engine,
            async_engine,
            exporter,
        }
    }

    /// Run the suite over the declared fixtures and export the result set.
    ///
    /// Missing fixtures are skipped with a notice; per-file failures are
    /// contained by the file driver. An empty fixture list and export
    /// failures are fatal.
    pub async fn run(&self, fixtures: &[FixtureSpec]) -> Result<ResultSet> {
        if fixtures.is_empty() {
            return Err(CsvBenchError::ConfigError(
                "fixture list is empty".to_string(),
            ));
        }

        let started = Instant::now();
        let mut set = ResultSet::new(SUITE_NAME);

        println!("{} Analysis", SUITE_NAME);
        println!("=====================================");
        println!();

        let driver = FileBenchmark::new(
            Arc::clone(&self.engine),
            self.async_engine.as_ref(),
            self.config,
        );

        for spec in fixtures {
            let path = self.config.fixture_dir.join(&spec.file_name);
            if !path.exists() {
                warn!(file = %spec.file_name, "skipping missing fixture");
                continue;
            }
            driver
                .run(&path, &spec.file_name, &spec.description, &mut set)
                .await;
        }

        self.run_extreme_case(&mut set).await;

        self.exporter.export_all(&set, &self.config.output_dir)?;

        let elapsed = Duration::from_secs(started.elapsed().as_secs());
        info!(
            records = set.len(),
            elapsed = %humantime::format_duration(elapsed),
            "suite complete"
        );

        Ok(set)
    }

    /// Separate reduced-method pass against the optional huge fixture
    async fn run_extreme_case(&self, set: &mut ResultSet) {
        let path = self.config.fixture_dir.join(&self.config.extreme_fixture);
        if !path.exists() {
            return;
        }

        println!("EXTREME PERFORMANCE TEST");
        println!("========================");

        if let Err(err) = self.run_extreme_methods(&path, set).await {
            error!(
                file = %self.config.extreme_fixture,
                error = %err,
                "error in extreme benchmark"
            );
        }
        println!();
    }

    async fn run_extreme_methods(&self, path: &Path, set: &mut ResultSet) -> Result<()> {
        let bytes = fs::metadata(path)?.len();
        let file_size = format_file_size(bytes);
        println!("File: {} ({})", self.config.extreme_fixture, file_size);

        let options = self.config.read_options();
        let mut throughputs: Vec<(&str, f64)> = Vec::new();

        let count_only = measure(
            || {
                let content = fs::read_to_string(path)?;
                self.engine.count_records(&content, &options)
            },
            self.config.extreme_iterations,
        )?;
        self.report(COUNT_ONLY, &count_only);
        throughputs.push((COUNT_ONLY, calculate_throughput_mbps(bytes, count_only.mean_time())));
        set.push(self.extreme_record(COUNT_ONLY, &count_only, &file_size));

        let streamed = measure(
            || {
                let file = fs::File::open(path)?;
                let mut stream = self.engine.open_reader(Box::new(file), &options)?;
                stream.count_records()
            },
            self.config.extreme_iterations,
        )?;
        self.report(STREAM_READING, &streamed);
        throughputs.push((
            STREAM_READING,
            calculate_throughput_mbps(bytes, streamed.mean_time()),
        ));
        set.push(self.extreme_record(STREAM_READING, &streamed, &file_size));

        if let Some(async_engine) = &self.async_engine {
            let engine = async_engine.clone();
            let owned_path = path.to_owned();
            let opts = options.clone();
            let lazy = measure_async(
                move || {
                    let engine = engine.clone();
                    let path = owned_path.clone();
                    let opts = opts.clone();
                    async move {
                        let mut rx = engine.read_file_lazy(&path, &opts).await?;
                        let mut count = 0u64;
                        while let Some(record) = rx.recv().await {
                            record?;
                            count += 1;
                        }
                        Ok(count)
                    }
                },
                self.config.extreme_async_iterations,
            )
            .await?;
            self.report(ASYNC_LAZY_STREAM, &lazy);
            throughputs.push((
                ASYNC_LAZY_STREAM,
                calculate_throughput_mbps(bytes, lazy.mean_time()),
            ));
            set.push(self.extreme_record(ASYNC_LAZY_STREAM, &lazy, &file_size));

            println!(
                "Best for huge files: {} ({:.2} ms/op)",
                ASYNC_LAZY_STREAM, lazy.mean_time_ms
            );
        }

        println!("Stream and async methods hold constant memory");

        // Throughput is computed per method; the best figure is the headline
        let best = throughputs
            .iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        if let Some((method, mbps)) = best {
            println!("Throughput: ~{:.1} MB/s ({})", mbps, method);
        }

        Ok(())
    }

    fn report(&self, method: &str, measurement: &Measurement) {
        println!(
            "  {:<18} : {} ms ({:.2} ms/op, {} records)",
            method,
            measurement.elapsed.as_millis(),
            measurement.mean_time_ms,
            measurement.rows_per_iteration()
        );
    }

    fn extreme_record(
        &self,
        method: &str,
        measurement: &Measurement,
        file_size: &str,
    ) -> MethodResult {
        MethodResult {
            benchmark_name: BENCHMARK_NAME.to_string(),
            test_case: EXTREME_TEST_CASE.to_string(),
            library: self.engine.name().to_string(),
            method: method.to_string(),
            row_count: measurement.rows_per_iteration(),
            iterations: measurement.iterations,
            mean_time_ms: measurement.mean_time_ms,
            std_dev_ms: 0.0,
            allocated_bytes: 0,
            file_size: file_size.to_string(),
            environment: detect_runtime(),
        }
    }
}
