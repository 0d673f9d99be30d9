//! CSV engine capability interface
//!
//! The harness measures a parsing engine through these traits rather than
//! calling a concrete library directly, so drivers and tests can inject
//! alternative engines.

use std::io::Read;

use crate::Result;

pub mod async_ops;
pub mod rust_csv;

// Re-export commonly used types
pub use async_ops::AsyncCsvEngine;
pub use rust_csv::RustCsvEngine;

/// Parsing options shared by every access pattern
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Whether the first row is a header and excluded from record counts
    pub has_header: bool,
    /// Field delimiter byte
    pub delimiter: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
        }
    }
}

/// One parsed CSV record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    pub fields: Vec<String>,
}

impl CsvRecord {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// Scoped reader over a byte source, yielding records one at a time.
///
/// The underlying source is released when the reader is dropped, within
/// the method invocation that opened it.
pub trait RecordStream {
    /// Read the next record, or `None` at end of input
    fn try_read_record(&mut self) -> Result<Option<CsvRecord>>;

    /// Count remaining records without materializing them
    fn count_records(&mut self) -> Result<u64> {
        let mut count = 0u64;
        while self.try_read_record()?.is_some() {
            count += 1;
        }
        Ok(count)
    }
}

/// Capability interface of the CSV library under test
pub trait CsvEngine: Send + Sync {
    /// Name of the library, used in result records
    fn name(&self) -> &'static str;

    /// Parse text into a fully materialized collection of records
    fn read_all_records(&self, text: &str, options: &ReadOptions) -> Result<Vec<CsvRecord>>;

    /// Parse text and return only the record count
    fn count_records(&self, text: &str, options: &ReadOptions) -> Result<u64>;

    /// Open a streaming reader over a byte source
    fn open_reader(
        &self,
        input: Box<dyn Read + Send>,
        options: &ReadOptions,
    ) -> Result<Box<dyn RecordStream + Send>>;
}
