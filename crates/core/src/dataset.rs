//! Raw patient dataset as bundled on disk.
//!
//! The bundled file is a JSON array of records in a fixed, nested shape. It is
//! read once at startup and handed to [`crate::normalize`].

use crate::{DirectoryError, DirectoryResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One contact entry of a raw record. Every field may be null.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawContact {
    pub address: Option<String>,
    pub number: Option<String>,
    pub email: Option<String>,
}

/// A patient record as it appears in the bundled dataset.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RawPatient {
    pub patient_id: u32,
    pub patient_name: String,
    pub age: u32,
    /// Accepted for shape compatibility; not surfaced by the directory.
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub contact: Vec<RawContact>,
    pub medical_issue: String,
}

impl RawPatient {
    /// The contact entry used for display; later entries are ignored.
    pub fn primary_contact(&self) -> Option<&RawContact> {
        self.contact.first()
    }
}

/// Parse a JSON array of raw records.
///
/// # Errors
///
/// Returns `DirectoryError::Deserialization` naming the JSON path of the first
/// offending value.
pub fn parse_dataset(json: &str) -> DirectoryResult<Vec<RawPatient>> {
    let de = &mut serde_json::Deserializer::from_str(json);
    Ok(serde_path_to_error::deserialize(de)?)
}

/// Read and parse the dataset file at `path`.
///
/// # Errors
///
/// Returns `DirectoryError::DatasetRead` if the file cannot be read, or
/// `DirectoryError::Deserialization` if its content does not match the raw shape.
pub fn load_dataset(path: &Path) -> DirectoryResult<Vec<RawPatient>> {
    let contents = fs::read_to_string(path).map_err(|source| DirectoryError::DatasetRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_dataset(&contents)?;
    tracing::debug!("read {} raw records from {}", records.len(), path.display());
    Ok(records)
}
