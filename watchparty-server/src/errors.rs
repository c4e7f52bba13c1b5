use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use watchparty_collab::RoomError;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{resource} not found")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },
    #[error("{0}")]
    BadRequest(String),
    #[error("Only the host can do that")]
    Forbidden,
}

impl ServerError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));

        (self.as_status_code(), body).into_response()
    }
}

impl From<RoomError> for ServerError {
    fn from(value: RoomError) -> Self {
        match value {
            RoomError::NotFound {
                resource,
                identifier,
            } => Self::NotFound {
                resource,
                identifier,
            },
            e @ RoomError::InvalidInput(_) => Self::BadRequest(e.to_string()),
            RoomError::Unauthorized => Self::Forbidden,
        }
    }
}
