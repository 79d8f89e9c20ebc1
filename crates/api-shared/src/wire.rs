//! JSON bodies returned by the HTTP surface alongside the core page type.

use serde::{Deserialize, Serialize};

/// Message returned for every unexpected server-side fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Generic failure body. It never carries internal detail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn internal() -> Self {
        Self {
            error: INTERNAL_ERROR_MESSAGE.into(),
        }
    }
}
