use bytes::Bytes;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Mutex;
use crate::error::ExtractError;
use crate::models::{CompanyRecord, SummaryTable};
use super::ProbeExtractor;

/// One uploaded spreadsheet.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub data: Bytes,
}

impl InputFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// A file that was dropped from the batch, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileError {
    pub file: String,
    pub message: String,
}

impl FileError {
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

/// Receives per-file failures while a batch keeps going.
pub trait ErrorReporter: Sync {
    fn report(&self, error: FileError);
}

/// Logs failures and forgets them.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: FileError) {
        tracing::error!("Error processing {}: {}", error.file, error.message);
    }
}

/// Logs failures and keeps them for the caller.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    errors: Mutex<Vec<FileError>>,
}

impl CollectingReporter {
    pub fn into_errors(self) -> Vec<FileError> {
        self.errors.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, error: FileError) {
        TracingReporter.report(error.clone());
        let mut errors = self.errors.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        errors.push(error);
    }
}

impl ProbeExtractor {
    /// Runs every file through the extractor. Failures are handed to
    /// `reporter` and left out of the table; the rest keep input order.
    pub fn process_batch(&self, files: &[InputFile], reporter: &dyn ErrorReporter) -> SummaryTable {
        let start = std::time::Instant::now();
        tracing::info!(
            "Processing batch of {} files{}",
            files.len(),
            if self.options().parallel { " in parallel" } else { "" }
        );

        let results: Vec<Result<CompanyRecord, ExtractError>> = if self.options().parallel {
            files.par_iter().map(|file| self.extract_file(file)).collect()
        } else {
            files.iter().map(|file| self.extract_file(file)).collect()
        };

        let mut records = Vec::with_capacity(files.len());
        for (file, result) in files.iter().zip(results) {
            match result {
                Ok(record) => records.push(record),
                Err(e) => reporter.report(FileError::new(&file.name, e.to_string())),
            }
        }

        tracing::info!(
            "Batch complete: {} of {} files summarized in {:?}",
            records.len(),
            files.len(),
            start.elapsed()
        );
        SummaryTable::new(records)
    }
}
