use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::{
    AjaxResponse, FavoriteKind, MSG_ASK_FAILED, MSG_COMMENT_FAILED, MSG_FAVORITE_FAILED,
    MSG_NOT_LOGGED_IN,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Jwt(e) => {
                tracing::warn!(error = %e, "JWT error");
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = json!({
            "error": error_message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failures of the favorite toggle. All of them are reported to the caller
/// through the `{"status":"fail"}` envelope.
#[derive(Error, Debug)]
pub enum FavoriteError {
    #[error("User is not logged in")]
    Unauthenticated,

    #[error("Invalid favorite request: {0}")]
    InvalidArgument(String),

    #[error("{kind} {id} not found")]
    TargetNotFound { kind: FavoriteKind, id: i32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl FavoriteError {
    pub fn message(&self) -> &'static str {
        match self {
            FavoriteError::Unauthenticated => MSG_NOT_LOGGED_IN,
            _ => MSG_FAVORITE_FAILED,
        }
    }
}

impl IntoResponse for FavoriteError {
    fn into_response(self) -> Response {
        match &self {
            FavoriteError::Database(e) => {
                tracing::error!(error = %e, "Favorite toggle failed");
            }
            other => {
                tracing::debug!(reason = %other, "Favorite toggle rejected");
            }
        }

        (StatusCode::OK, Json(AjaxResponse::fail(self.message()))).into_response()
    }
}

#[derive(Error, Debug)]
pub enum CommentError {
    #[error("User is not logged in")]
    Unauthenticated,

    #[error("Invalid comment")]
    InvalidArgument,

    #[error("Course {0} not found")]
    CourseNotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CommentError {
    pub fn message(&self) -> &'static str {
        match self {
            CommentError::Unauthenticated => MSG_NOT_LOGGED_IN,
            _ => MSG_COMMENT_FAILED,
        }
    }
}

impl IntoResponse for CommentError {
    fn into_response(self) -> Response {
        if let CommentError::Database(e) = &self {
            tracing::error!(error = %e, "Adding comment failed");
        }

        (StatusCode::OK, Json(AjaxResponse::fail(self.message()))).into_response()
    }
}

/// Rejected consultation requests. Anonymous callers may ask, so there is
/// no login failure here.
#[derive(Error, Debug)]
pub enum UserAskError {
    #[error("Invalid consultation request")]
    InvalidArgument,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for UserAskError {
    fn into_response(self) -> Response {
        if let UserAskError::Database(e) = &self {
            tracing::error!(error = %e, "Saving consultation request failed");
        }

        (StatusCode::OK, Json(AjaxResponse::fail(MSG_ASK_FAILED))).into_response()
    }
}
