use serde::Serialize;

/// Machine-readable category carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    DecodeFailure,
    Internal,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: ErrorKind,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: u16, error: ErrorKind, message: String) -> Self {
        Self {
            status,
            error,
            message,
        }
    }
}
