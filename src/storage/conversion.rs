//! Conversion of a batch of export files into one ordered row list.
//!
//! Files are parsed in parallel. A file that cannot be parsed is reported as
//! a [`FileFailure`] and does not affect rows from the other files.

use std::path::{Path, PathBuf};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    domain::{AlarmRow, sort_rows},
    storage::{
        document::{Document, DocumentError},
        extractor::extract_rows,
    },
};

/// Settings for a conversion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Conversion {
    ignore_blank_descriptions: bool,
}

impl Conversion {
    /// Creates a conversion that keeps every row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ignore_blank_descriptions: false,
        }
    }

    /// Sets whether rows with a blank description are left out.
    #[must_use]
    pub const fn ignore_blank_descriptions(mut self, ignore: bool) -> Self {
        self.ignore_blank_descriptions = ignore;
        self
    }

    /// Converts the given files.
    #[must_use]
    pub fn run(&self, paths: &[PathBuf]) -> ConversionReport {
        self.run_with_progress(paths, |_| {})
    }

    /// Converts the given files, calling `on_file` as each file finishes.
    ///
    /// `on_file` may be called from several threads at once, in any order.
    pub fn run_with_progress<F>(&self, paths: &[PathBuf], on_file: F) -> ConversionReport
    where
        F: Fn(&Path) + Sync,
    {
        let results: Vec<_> = paths
            .par_iter()
            .map(|path| {
                let result = load_rows(path);
                on_file(path.as_path());
                (path, result)
            })
            .collect();

        let mut rows = Vec::new();
        let mut failures = Vec::new();
        let mut files_parsed = 0;

        for (path, result) in results {
            match result {
                Ok(file_rows) => {
                    files_parsed += 1;
                    rows.extend(file_rows);
                }
                Err(error) => {
                    tracing::warn!("Failed to parse {}: {error}", path.display());
                    failures.push(FileFailure {
                        path: path.clone(),
                        error,
                    });
                }
            }
        }

        let mut report = self.finish(rows);
        report.failures = failures;
        report.files_parsed = files_parsed;
        report
    }

    /// Filters and orders rows that have already been extracted.
    #[must_use]
    pub fn finish(&self, rows: Vec<AlarmRow>) -> ConversionReport {
        let total_rows = rows.len();

        let mut rows: Vec<AlarmRow> = if self.ignore_blank_descriptions {
            rows.into_iter()
                .filter(|row| !row.has_blank_description())
                .collect()
        } else {
            rows
        };
        let skipped_rows = total_rows - rows.len();

        sort_rows(&mut rows);

        ConversionReport {
            rows,
            failures: Vec::new(),
            files_parsed: 0,
            total_rows,
            skipped_rows,
        }
    }
}

fn load_rows(path: &Path) -> Result<Vec<AlarmRow>, DocumentError> {
    let document = Document::load(path)?;
    let messages = document.descendants("message").count();
    let rows = extract_rows(&document);
    tracing::debug!(
        "Parsed {}: {} of {messages} messages produced rows",
        path.display(),
        rows.len()
    );
    Ok(rows)
}

/// A file that could not be converted.
#[derive(Debug)]
pub struct FileFailure {
    /// The file path.
    pub path: PathBuf,
    /// Why it could not be parsed.
    pub error: DocumentError,
}

/// The outcome of a conversion run.
#[derive(Debug, Default)]
pub struct ConversionReport {
    rows: Vec<AlarmRow>,
    failures: Vec<FileFailure>,
    files_parsed: usize,
    total_rows: usize,
    skipped_rows: usize,
}

impl ConversionReport {
    /// The ordered rows to export.
    #[must_use]
    pub fn rows(&self) -> &[AlarmRow] {
        &self.rows
    }

    /// Consumes the report, returning the ordered rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<AlarmRow> {
        self.rows
    }

    /// Files that could not be parsed.
    #[must_use]
    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    /// Whether any file failed to parse.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// The number of files parsed successfully.
    #[must_use]
    pub const fn files_parsed(&self) -> usize {
        self.files_parsed
    }

    /// The number of rows extracted before filtering.
    #[must_use]
    pub const fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// The number of rows left out by the blank-description filter.
    #[must_use]
    pub const fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// The number of rows to export.
    #[must_use]
    pub fn exported_rows(&self) -> usize {
        self.rows.len()
    }
}
