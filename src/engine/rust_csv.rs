//! CSV engine implementation backed by the `csv` crate

use std::io::Read;

use csv::{ByteRecord, ReaderBuilder, StringRecord};

use super::{CsvEngine, CsvRecord, ReadOptions, RecordStream};
use crate::Result;

/// The `csv` crate driven through the engine capability interface
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCsvEngine;

impl RustCsvEngine {
    pub fn new() -> Self {
        Self
    }

    fn builder(options: &ReadOptions) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(options.has_header)
            .delimiter(options.delimiter);
        builder
    }
}

impl CsvEngine for RustCsvEngine {
    fn name(&self) -> &'static str {
        "rust-csv"
    }

    fn read_all_records(&self, text: &str, options: &ReadOptions) -> Result<Vec<CsvRecord>> {
        let mut reader = Self::builder(options).from_reader(text.as_bytes());
        let mut records = Vec::new();
        let mut record = StringRecord::new();

        while reader.read_record(&mut record)? {
            records.push(CsvRecord::new(
                record.iter().map(|field| field.to_string()).collect(),
            ));
        }

        Ok(records)
    }

    fn count_records(&self, text: &str, options: &ReadOptions) -> Result<u64> {
        let mut reader = Self::builder(options).from_reader(text.as_bytes());
        let mut record = ByteRecord::new();
        let mut count = 0u64;

        // ByteRecord avoids per-field UTF-8 validation on the count path
        while reader.read_byte_record(&mut record)? {
            count += 1;
        }

        Ok(count)
    }

    fn open_reader(
        &self,
        input: Box<dyn Read + Send>,
        options: &ReadOptions,
    ) -> Result<Box<dyn RecordStream + Send>> {
        let reader = Self::builder(options).from_reader(input);
        Ok(Box::new(CsvRecordStream { reader }))
    }
}

/// Streaming reader over an arbitrary byte source
struct CsvRecordStream {
    reader: csv::Reader<Box<dyn Read + Send>>,
}

impl RecordStream for CsvRecordStream {
    fn try_read_record(&mut self) -> Result<Option<CsvRecord>> {
        let mut record = StringRecord::new();
        if self.reader.read_record(&mut record)? {
            Ok(Some(CsvRecord::new(
                record.iter().map(|field| field.to_string()).collect(),
            )))
        } else {
            Ok(None)
        }
    }

    fn count_records(&mut self) -> Result<u64> {
        let mut record = ByteRecord::new();
        let mut count = 0u64;
        while self.reader.read_byte_record(&mut record)? {
            count += 1;
        }
        Ok(count)
    }
}
