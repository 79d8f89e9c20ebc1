//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! directory service. Request handling never reads environment variables.

use crate::constants::DEFAULT_DATASET_PATH;
use crate::{DirectoryError, DirectoryResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    dataset_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidInput` if `dataset_path` is not a regular file.
    pub fn new(dataset_path: PathBuf) -> DirectoryResult<Self> {
        if !dataset_path.is_file() {
            return Err(DirectoryError::InvalidInput(format!(
                "dataset path is not a file: {}",
                dataset_path.display()
            )));
        }

        Ok(Self { dataset_path })
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }
}

/// Resolve the bundled dataset file without reading environment variables.
///
/// If `override_path` is provided it must point at an existing file. Otherwise
/// this looks for `data/patients.json` relative to the current working directory
/// and then walks up from `CARGO_MANIFEST_DIR`.
pub fn resolve_dataset_path(override_path: Option<PathBuf>) -> DirectoryResult<PathBuf> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Ok(path);
        }
        return Err(DirectoryError::InvalidInput(format!(
            "PATIENT_DATASET_PATH override does not point at a file: {}",
            path.display()
        )));
    }

    let cwd_relative = PathBuf::from(DEFAULT_DATASET_PATH);
    if cwd_relative.is_file() {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .map(|ancestor| ancestor.join(DEFAULT_DATASET_PATH))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            DirectoryError::InvalidInput(format!(
                "could not locate {DEFAULT_DATASET_PATH} from the working directory or workspace"
            ))
        })
}

/// Parse an optional path setting, treating blank values as unset.
pub fn dataset_path_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
