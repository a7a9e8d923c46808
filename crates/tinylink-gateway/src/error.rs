use crate::model::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tinylink_core::RegistryError;
use tinylink_registry::QrError;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    Registry(RegistryError),
    Qr(QrError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Registry(err) => match err {
                RegistryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
                RegistryError::CodeConflict(_) => StatusCode::CONFLICT,
                RegistryError::CodeSpaceExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
                RegistryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Qr(QrError::Encode(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Qr(QrError::Png(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Registry(err) => err.to_string(),
            AppError::Qr(err) => err.to_string(),
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        AppError::Registry(err)
    }
}

impl From<QrError> for AppError {
    fn from(err: QrError) -> Self {
        AppError::Qr(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!(error = %message, "request failed");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
