//! Batch intake of applicant exports.
//!
//! Rows are read with the same lenient rules as single submissions: headers
//! may use snake_case or the camelCase form names, and unusable cells fall
//! back to defaults instead of rejecting the row.

use crate::scoring::{ApplicantProfile, ApplicantSubmission};
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("failed to read applicant export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid applicant CSV at row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("applicant export contains no rows")]
    Empty,
}

/// One parsed row, numbered from 1 after the header.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantRow {
    pub row: usize,
    pub profile: ApplicantProfile,
}

pub struct ApplicantCsvImporter;

impl ApplicantCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ApplicantRow>, IntakeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ApplicantRow>, IntakeError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut rows = Vec::new();

        for (index, record) in csv_reader.deserialize::<ApplicantSubmission>().enumerate() {
            let row = index + 1;
            let submission = record.map_err(|source| IntakeError::Csv { row, source })?;
            rows.push(ApplicantRow {
                row,
                profile: submission.into_profile(),
            });
        }

        if rows.is_empty() {
            return Err(IntakeError::Empty);
        }

        debug!(rows = rows.len(), "applicant export parsed");
        Ok(rows)
    }
}
