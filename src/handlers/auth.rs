use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::AppResult,
    middleware::AuthUser,
    models::{Credentials, Profile, Registration, Session},
};

/// `POST /api/register`: creates an account and signs it in.
pub async fn register(
    State(state): State<AppState>,
    Json(registration): Json<Registration>,
) -> AppResult<(StatusCode, Json<Session>)> {
    let session = state.auth_service.register(registration).await?;

    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Json<Session>> {
    Ok(Json(state.auth_service.login(credentials).await?))
}

pub async fn current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Profile>> {
    Ok(Json(state.auth_service.profile(user_id).await?))
}
