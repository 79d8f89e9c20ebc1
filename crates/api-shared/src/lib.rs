//! # API Shared
//!
//! Shared definitions for the patient directory APIs.
//!
//! Contains:
//! - Wire types that are not part of the core domain (`wire` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
