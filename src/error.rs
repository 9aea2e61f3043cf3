//! Faults raised while a tool runs. Tools never hand these to their caller;
//! each one renders its own JSON error document from them.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP Error {}: {}", .0.as_u16(), .0.canonical_reason().unwrap_or("Unknown"))]
    Status(StatusCode),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ToolError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ToolError::Status(status) if *status == StatusCode::NOT_FOUND)
    }
}

pub type ToolResult<T> = Result<T, ToolError>;
