use crate::imaging::ImagingError;
use crate::response::{ErrorKind, ErrorResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Decode Failure: {0}")]
    DecodeFailure(String),
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DecodeFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::BadRequest(_) => ErrorKind::BadRequest,
            AppError::DecodeFailure(_) => ErrorKind::DecodeFailure,
            AppError::InternalServerError(_) => ErrorKind::Internal,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }

        let kind = self.kind();
        let message = match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::DecodeFailure(msg)
            | AppError::InternalServerError(msg) => msg,
        };

        let body = Json(ErrorResponse::new(status.as_u16(), kind, message));
        (status, body).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(err.to_string()),
            _ => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl From<ImagingError> for AppError {
    fn from(err: ImagingError) -> Self {
        let message = err.to_string();
        match err {
            ImagingError::Io(io) => io.into(),
            ImagingError::Decode(_) => AppError::DecodeFailure(message),
            ImagingError::Exif(_)
            | ImagingError::MissingOrientation
            | ImagingError::Resize(_)
            | ImagingError::Encode(_) => AppError::InternalServerError(message),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalServerError(format!("worker task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mapping() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: AppError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_imaging_error_mapping() {
        let err: AppError = ImagingError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing.jpg",
        ))
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let decode = image::ImageError::IoError(std::io::Error::other("truncated"));
        let err: AppError = ImagingError::Decode(decode).into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_error_response_is_not_ok() {
        let response = AppError::BadRequest("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
