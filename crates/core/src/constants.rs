//! Constants used throughout the directory core crate.

/// Dataset location, relative to the working directory or a workspace ancestor.
pub const DEFAULT_DATASET_PATH: &str = "data/patients.json";

/// Address substituted when a record has no contact address.
pub const MISSING_ADDRESS: &str = "N/A";

/// Prefix of display identifiers, e.g. `ID-0001`.
pub const PATIENT_ID_PREFIX: &str = "ID-";

/// Page size used when `limit` is absent or unparseable.
pub const DEFAULT_LIMIT: u32 = 12;

/// Upper bound for `limit`.
pub const MAX_LIMIT: u32 = 100;

/// Page served when `page` is absent or unparseable.
pub const DEFAULT_PAGE: u32 = 1;

/// Upper bound for the requested `page`.
pub const MAX_PAGE: u32 = 1_000_000;
