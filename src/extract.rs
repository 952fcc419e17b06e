use axum::extract::FromRequestParts;

use crate::error::AppError;

/// `axum::extract::Path` that rejects with the JSON [`AppError`] body, so a
/// malformed id (`/course/detail/abc/`) answers like every other 400.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);
