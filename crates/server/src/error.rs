use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::CatalogError;
use log::error;
use serde_json::json;

/// Error returned by every handler, rendered as `{"error": "..."}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Authentication required.")]
    Unauthorized,

    #[error("Administrator role required.")]
    AdminOnly,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(err) => match err {
                CatalogError::ValidationFailed(_) | CatalogError::BadRequest(_) => {
                    StatusCode::BAD_REQUEST
                }
                CatalogError::Forbidden(_) => StatusCode::FORBIDDEN,
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::Conflict(_) => StatusCode::CONFLICT,
                CatalogError::Internal(_) | CatalogError::Database(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::AdminOnly => StatusCode::FORBIDDEN,
        }
    }

    /// Message safe to show to the client
    fn public_message(&self) -> String {
        match self {
            Self::Catalog(CatalogError::Database(_)) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("Request failed: {self}");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
