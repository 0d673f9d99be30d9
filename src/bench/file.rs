//! Per-file benchmark driver
//!
//! Runs the declared set of access-pattern methods against one fixture
//! file through the timing primitive, appends one result record per
//! method, and derives a comparison summary from the records it produced.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use crate::bench::timing::{measure, measure_async, Measurement};
use crate::config::BenchConfig;
use crate::engine::{AsyncCsvEngine, CsvEngine};
use crate::models::{detect_runtime, MethodResult, ResultSet};
use crate::util::units::format_file_size;
use crate::{Result, BENCHMARK_NAME};

// Declared method names, in measurement order
pub const BULK_READ: &str = "Bulk Read";
pub const COUNT_ONLY: &str = "Count Only";
pub const STREAM_READING: &str = "Stream Reading";
pub const ASYNC_READ: &str = "Async Read";
pub const ASYNC_STREAM: &str = "Async Stream";

/// Drives the declared access patterns against a single fixture file
pub struct FileBenchmark<'a> {
    engine: Arc<dyn CsvEngine>,
    async_engine: Option<&'a AsyncCsvEngine>,
    config: &'a BenchConfig,
}

impl<'a> FileBenchmark<'a> {
    pub fn new(
        engine: Arc<dyn CsvEngine>,
        async_engine: Option<&'a AsyncCsvEngine>,
        config: &'a BenchConfig,
    ) -> Self {
        Self {
            engine,
            async_engine,
            config,
        }
    }

    /// Benchmark one fixture, appending records to the shared result set.
    ///
    /// Failures are contained at file granularity: the error is logged
    /// with the file name and the suite moves on. Records produced for
    /// earlier methods of the same file are retained.
    pub async fn run(
        &self,
        path: &Path,
        file_name: &str,
        description: &str,
        set: &mut ResultSet,
    ) {
        let start_idx = set.len();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
        spinner.enable_steady_tick(Duration::from_millis(120));

        let outcome = self
            .run_methods(&spinner, path, file_name, description, set)
            .await;
        spinner.finish_and_clear();

        match outcome {
            Ok(()) => {
                if let Some(summary) = comparison(&set.results[start_idx..]) {
                    println!("Performance Summary:");
                    println!(
                        "  Fastest: {} ({:.2} ms/op)",
                        summary.fastest_method, summary.fastest_mean_ms
                    );
                    println!(
                        "  Best for processing: {} ({:.2} ms/op)",
                        summary.best_processing_method, summary.best_processing_mean_ms
                    );
                    if let Some(benefit) = &summary.async_benefit {
                        println!("  Async benefit: {}", benefit);
                    }
                }
                println!();
            }
            Err(err) => {
                error!(file = %file_name, error = %err, "error benchmarking fixture, continuing with next");
            }
        }
    }

    async fn run_methods(
        &self,
        spinner: &ProgressBar,
        path: &Path,
        file_name: &str,
        description: &str,
        set: &mut ResultSet,
    ) -> Result<()> {
        let file_size = format_file_size(fs::metadata(path)?.len());
        println!("{}", description);
        println!("File: {} ({})", file_name, file_size);

        let iterations = self.config.iterations_for(file_name);
        let options = self.config.read_options();

        spinner.set_message(format!("{}...", BULK_READ));
        let bulk = measure(
            || {
                let content = fs::read_to_string(path)?;
                let records = self.engine.read_all_records(&content, &options)?;
                Ok(records.len() as u64)
            },
            iterations,
        )?;
        self.report(spinner, BULK_READ, &bulk);
        set.push(self.record(BULK_READ, description, &bulk, &file_size));

        spinner.set_message(format!("{}...", COUNT_ONLY));
        let count_only = measure(
            || {
                let content = fs::read_to_string(path)?;
                self.engine.count_records(&content, &options)
            },
            iterations,
        )?;
        self.report(spinner, COUNT_ONLY, &count_only);
        set.push(self.record(COUNT_ONLY, description, &count_only, &file_size));

        spinner.set_message(format!("{}...", STREAM_READING));
        let streamed = measure(
            || {
                let file = fs::File::open(path)?;
                let mut stream = self.engine.open_reader(Box::new(file), &options)?;
                stream.count_records()
            },
            iterations,
        )?;
        self.report(spinner, STREAM_READING, &streamed);
        set.push(self.record(STREAM_READING, description, &streamed, &file_size));

        if let Some(async_engine) = self.async_engine {
            let async_iterations = self.config.async_iterations_for(file_name);

            spinner.set_message(format!("{}...", ASYNC_READ));
            let engine = async_engine.clone();
            let owned_path = path.to_owned();
            let opts = options.clone();
            let async_read = measure_async(
                move || {
                    let engine = engine.clone();
                    let path = owned_path.clone();
                    let opts = opts.clone();
                    async move { Ok(engine.read_file(&path, &opts).await?.len() as u64) }
                },
                async_iterations,
            )
            .await?;
            self.report(spinner, ASYNC_READ, &async_read);
            set.push(self.record(ASYNC_READ, description, &async_read, &file_size));

            spinner.set_message(format!("{}...", ASYNC_STREAM));
            let engine = async_engine.clone();
            let owned_path = path.to_owned();
            let opts = options.clone();
            let async_stream = measure_async(
                move || {
                    let engine = engine.clone();
                    let path = owned_path.clone();
                    let opts = opts.clone();
                    async move { engine.count_stream(&path, &opts).await }
                },
                async_iterations,
            )
            .await?;
            self.report(spinner, ASYNC_STREAM, &async_stream);
            set.push(self.record(ASYNC_STREAM, description, &async_stream, &file_size));
        }

        Ok(())
    }

    fn report(&self, spinner: &ProgressBar, method: &str, measurement: &Measurement) {
        spinner.println(format!(
            "  {:<16} : {} ms ({:.2} ms/op, {} records)",
            method,
            measurement.elapsed.as_millis(),
            measurement.mean_time_ms,
            measurement.rows_per_iteration()
        ));
    }

    fn record(
        &self,
        method: &str,
        description: &str,
        measurement: &Measurement,
        file_size: &str,
    ) -> MethodResult {
        MethodResult {
            benchmark_name: BENCHMARK_NAME.to_string(),
            test_case: description.to_string(),
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

/// Derived comparison over the records one file's run just produced
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSummary {
    pub fastest_method: String,
    pub fastest_mean_ms: f64,
    pub best_processing_method: String,
    pub best_processing_mean_ms: f64,
    pub async_benefit: Option<String>,
}

/// Pure function of already-measured records; nothing is re-measured.
///
/// "Best for processing" considers only the methods that materialize
/// usable record data (bulk vs streaming), excluding the count-only
/// shortcut.
pub fn comparison(records: &[MethodResult]) -> Option<ComparisonSummary> {
    let fastest = records.iter().min_by(|a, b| {
        a.mean_time_ms
            .partial_cmp(&b.mean_time_ms)
            .unwrap_or(Ordering::Equal)
    })?;

    let bulk = records.iter().find(|r| r.method == BULK_READ);
    let streamed = records.iter().find(|r| r.method == STREAM_READING);
    let best_processing = match (bulk, streamed) {
        (Some(b), Some(s)) => {
            if b.mean_time_ms <= s.mean_time_ms {
                b
            } else {
                s
            }
        }
        (Some(b), None) => b,
        (None, Some(s)) => s,
        (None, None) => fastest,
    };

    let async_read = records.iter().find(|r| r.method == ASYNC_READ);
    let benefit = match (bulk, async_read) {
        (Some(sync), Some(asynced)) => Some(async_benefit(sync.mean_time_ms, asynced.mean_time_ms)),
        _ => None,
    };

    Some(ComparisonSummary {
        fastest_method: fastest.method.clone(),
        fastest_mean_ms: fastest.mean_time_ms,
        best_processing_method: best_processing.method.clone(),
        best_processing_mean_ms: best_processing.mean_time_ms,
        async_benefit: benefit,
    })
}

/// Report how much the async read gained over the synchronous bulk read.
///
/// A zero synchronous mean makes the percentage undefined; the "n/a"
/// sentinel is returned instead of NaN.
pub fn async_benefit(sync_ms: f64, async_ms: f64) -> String {
    if sync_ms == 0.0 {
        return "n/a".to_string();
    }
    let pct = (sync_ms - async_ms) / sync_ms * 100.0;
    let label = if sync_ms > async_ms { "YES" } else { "MINIMAL" };
    format!("{} ({:.0}% faster)", label, pct)
}
