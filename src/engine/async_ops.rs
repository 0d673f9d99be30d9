//! Async wrappers over the CSV engine
//!
//! The engine interface itself is synchronous; these wrappers provide the
//! asynchronous access patterns the harness measures, running the parse on
//! the blocking pool and file reads through tokio's fs.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task;

use super::{CsvEngine, CsvRecord, ReadOptions};
use crate::{CsvBenchError, Result};

/// Buffered capacity of the lazy record channel
const LAZY_CHANNEL_CAPACITY: usize = 256;

/// Async access to a CSV engine
#[derive(Clone)]
pub struct AsyncCsvEngine {
    inner: Arc<dyn CsvEngine>,
}

impl AsyncCsvEngine {
    pub fn new(inner: Arc<dyn CsvEngine>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped library
    pub fn engine_name(&self) -> &'static str {
        self.inner.name()
    }

    /// Asynchronously read all records from a file path
    pub async fn read_file(&self, path: &Path, options: &ReadOptions) -> Result<Vec<CsvRecord>> {
        let text = tokio::fs::read_to_string(path).await?;
        let inner = Arc::clone(&self.inner);
        let options = options.clone();

        task::spawn_blocking(move || inner.read_all_records(&text, &options))
            .await
            .map_err(|e| CsvBenchError::BenchmarkError(format!("async read task failed: {}", e)))?
    }

    /// Asynchronously open a stream over a file and count its records
    pub async fn count_stream(&self, path: &Path, options: &ReadOptions) -> Result<u64> {
        let inner = Arc::clone(&self.inner);
        let options = options.clone();
        let path = path.to_owned();

        task::spawn_blocking(move || {
            let file = File::open(&path)?;
            let mut stream = inner.open_reader(Box::new(file), &options)?;
            stream.count_records()
        })
        .await
        .map_err(|e| CsvBenchError::BenchmarkError(format!("async stream task failed: {}", e)))?
    }

    /// Asynchronously read a file as a lazy sequence of records.
    ///
    /// A blocking producer feeds a bounded channel; the consumer pulls one
    /// record at a time and never holds the whole file in memory. The
    /// producer stops when the receiver is dropped.
    pub async fn read_file_lazy(
        &self,
        path: &Path,
        options: &ReadOptions,
    ) -> Result<mpsc::Receiver<Result<CsvRecord>>> {
        let inner = Arc::clone(&self.inner);
        let options = options.clone();
        let path = path.to_owned();
        let (tx, rx) = mpsc::channel(LAZY_CHANNEL_CAPACITY);

        task::spawn_blocking(move || {
            let open = || -> Result<Box<dyn super::RecordStream + Send>> {
                let file = File::open(&path)?;
                inner.open_reader(Box::new(file), &options)
            };

            let mut stream = match open() {
                Ok(stream) => stream,
                Err(err) => {
                    let _ = tx.blocking_send(Err(err));
                    return;
                }
            };

            loop {
                match stream.try_read_record() {
                    Ok(Some(record)) => {
                        if tx.blocking_send(Ok(record)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        let _ = tx.blocking_send(Err(err));
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }
}
