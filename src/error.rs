use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Field name → validation message. Sorted so error bodies are deterministic.
pub type FieldErrors = BTreeMap<String, String>;

/// Failures raised by a [`crate::db::RoomStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A persisted row that no longer maps onto a [`crate::models::Room`].
    #[error("room {id} has invalid {column}: {value:?}")]
    Corrupt {
        id: i64,
        column: &'static str,
        value: String,
    },
}

/// Error type returned by every HTTP handler.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Room store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn validation_errors_render_as_json_map() {
        let mut errors = FieldErrors::new();
        errors.insert("roomType".into(), "bad type".into());
        errors.insert("name".into(), "blank".into());

        let response = AppError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(response).await,
            r#"{"name":"blank","roomType":"bad type"}"#
        );
    }

    #[tokio::test]
    async fn store_errors_hide_driver_details() {
        let err = AppError::from(StoreError::Database(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal server error");
    }

    #[tokio::test]
    async fn not_found_is_plain_text() {
        let response = AppError::NotFound("Room not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Room not found");
    }
}
