use serde::{Deserialize, Serialize};

/// Coarse classification shared by every failure the booking flow can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    NotFound,
    Validation,
    PaymentFailed,
    Unavailable,
    Cancelled,
    Internal,
}

/// Error body TMDB returns alongside non-success statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub status_code: i64,
    #[serde(default)]
    pub status_message: String,
}

impl ApiError {
    pub fn new(status_code: i64, status_message: impl Into<String>) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
        }
    }
}
