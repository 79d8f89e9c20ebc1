//! # Directory Core
//!
//! Core logic for the patient directory.
//!
//! This crate contains pure data operations:
//! - Loading the bundled raw dataset and normalising it once
//! - Permissive coercion of listing parameters
//! - The filter → sort → paginate listing pipeline
//!
//! **No API concerns**: HTTP servers, OpenAPI documents, and CLI parsing belong in
//! `api-rest`, `api-shared`, or `directory-cli`.

pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod normalize;
pub mod params;
pub mod query;
pub mod service;

pub use config::{dataset_path_from_env_value, resolve_dataset_path, CoreConfig};
pub use error::{DirectoryError, DirectoryResult};
pub use normalize::{normalize, PatientRecord};
pub use params::{QueryParams, SortField, SortOrder};
pub use query::PatientPage;
pub use service::DirectoryService;

pub use directory_types::{IssueColor, SearchText};
