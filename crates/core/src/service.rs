//! The directory service: a normalised, read-only dataset plus the query entry point.

use crate::config::CoreConfig;
use crate::dataset::load_dataset;
use crate::error::DirectoryResult;
use crate::normalize::{normalize, PatientRecord};
use crate::params::QueryParams;
use crate::query::{query, PatientPage};
use std::sync::Arc;

/// Pure directory operations - no API concerns.
///
/// Cloning is cheap; all clones share the same immutable records.
#[derive(Clone, Debug)]
pub struct DirectoryService {
    records: Arc<[PatientRecord]>,
}

impl DirectoryService {
    /// Creates a service over already-normalised records.
    pub fn new(records: Vec<PatientRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Loads and normalises the dataset named by `cfg`.
    ///
    /// # Errors
    ///
    /// Returns a `DirectoryError` if the dataset file cannot be read or parsed.
    pub fn from_config(cfg: &CoreConfig) -> DirectoryResult<Self> {
        let raw = load_dataset(cfg.dataset_path())?;
        let service = Self::new(normalize(raw));
        tracing::info!(
            "loaded {} patient records from {}",
            service.len(),
            cfg.dataset_path().display()
        );
        Ok(service)
    }

    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lists one page of patients matching `params`.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Internal` if the page cannot be assembled.
    pub fn list_patients(&self, params: &QueryParams) -> DirectoryResult<PatientPage> {
        let page = query(&self.records, params)?;
        tracing::debug!(
            "listing matched {} records, serving page {}/{}",
            page.total,
            page.page,
            page.total_pages
        );
        Ok(page)
    }
}
