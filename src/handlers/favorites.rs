use axum::{Form, Json, extract::State};

use crate::{
    AppState,
    error::FavoriteError,
    middleware::OptionalAuthUser,
    models::{AjaxResponse, FavoriteForm, MSG_FAVORITED, MSG_UNFAVORITED},
};

/// `POST /org/add_fav/`: toggles a favorite on a course, organization or
/// teacher. Always answers 200 with the status envelope.
pub async fn add_fav(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Form(form): Form<FavoriteForm>,
) -> Result<Json<AjaxResponse>, FavoriteError> {
    let toggle = state.favorite_service.toggle(user_id, &form).await?;

    let msg = if toggle.favorited {
        MSG_FAVORITED
    } else {
        MSG_UNFAVORITED
    };

    Ok(Json(AjaxResponse::success(msg)))
}
