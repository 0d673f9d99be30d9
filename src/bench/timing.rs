//! Timing primitive
//!
//! Wraps an operation with one untimed warmup invocation followed by a
//! fixed number of timed repetitions on a monotonic clock. The async
//! variant awaits each invocation to completion before starting the next,
//! so both variants measure serialized per-call latency.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::{CsvBenchError, Result};

/// Outcome of one measured operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Total elapsed time of all timed iterations, warmup excluded
    pub elapsed: Duration,
    /// Elapsed milliseconds divided by the iteration count
    pub mean_time_ms: f64,
    /// Sum of the counts returned by the timed iterations
    pub total_count: u64,
    /// Number of timed iterations executed
    pub iterations: u32,
}

impl Measurement {
    fn from_run(elapsed: Duration, total_count: u64, iterations: u32) -> Self {
        Self {
            elapsed,
            mean_time_ms: elapsed.as_secs_f64() * 1000.0 / iterations as f64,
            total_count,
            iterations,
        }
    }

    /// Record count normalized per iteration
    pub fn rows_per_iteration(&self) -> u64 {
        self.total_count / self.iterations as u64
    }

    /// Mean time as a Duration, for throughput computation
    pub fn mean_time(&self) -> Duration {
        Duration::from_secs_f64(self.mean_time_ms / 1000.0)
    }
}

fn check_iterations(iterations: u32) -> Result<()> {
    if iterations == 0 {
        return Err(CsvBenchError::BenchmarkError(
            "iteration count must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Measure a synchronous operation returning a record count.
///
/// The operation runs once untimed as a warmup; its result and count are
/// discarded entirely. Errors from the operation propagate unchanged.
pub fn measure<F>(mut operation: F, iterations: u32) -> Result<Measurement>
where
    F: FnMut() -> Result<u64>,
{
    check_iterations(iterations)?;

    // Warmup, excluded from every total
    operation()?;

    let start = Instant::now();
    let mut total_count = 0u64;
    for _ in 0..iterations {
        total_count += operation()?;
    }
    let elapsed = start.elapsed();

    Ok(Measurement::from_run(elapsed, total_count, iterations))
}

/// Measure an asynchronous operation returning a record count.
///
/// Identical contract to [`measure`]; each invocation is awaited to
/// completion before the next begins, never run concurrently.
pub async fn measure_async<F, Fut>(mut operation: F, iterations: u32) -> Result<Measurement>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<u64>>,
{
    check_iterations(iterations)?;

    // Warmup, excluded from every total
    operation().await?;

    let start = Instant::now();
    let mut total_count = 0u64;
    for _ in 0..iterations {
        total_count += operation().await?;
    }
    let elapsed = start.elapsed();

    Ok(Measurement::from_run(elapsed, total_count, iterations))
}
