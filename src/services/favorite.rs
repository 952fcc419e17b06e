use tracing::instrument;

use crate::{
    error::FavoriteError,
    models::{FavoriteForm, FavoriteKind, FavoriteTarget, FavoriteToggle},
    repository::FavoriteRepository,
    telemetry::{FAVORITES_ADDED, FAVORITES_REMOVED},
};

#[derive(Clone)]
pub struct FavoriteService {
    favorite_repo: FavoriteRepository,
}

impl FavoriteService {
    pub fn new(favorite_repo: FavoriteRepository) -> Self {
        Self { favorite_repo }
    }

    /// Favorites the target if the user has no mark on it yet, otherwise
    /// removes every mark the user has on it.
    #[instrument(name = "favorite.toggle", skip(self, form))]
    pub async fn toggle(
        &self,
        user_id: Option<i32>,
        form: &FavoriteForm,
    ) -> Result<FavoriteToggle, FavoriteError> {
        let user_id = user_id.ok_or(FavoriteError::Unauthenticated)?;
        let target = parse_target(form)?;

        let toggle = self
            .favorite_repo
            .toggle(user_id, target.kind, target.id)
            .await?
            .ok_or(FavoriteError::TargetNotFound {
                kind: target.kind,
                id: target.id,
            })?;

        if toggle.favorited {
            FAVORITES_ADDED.add(1, &[]);
        } else {
            FAVORITES_REMOVED.add(1, &[]);
        }

        tracing::info!(
            user_id,
            kind = %target.kind,
            target_id = target.id,
            favorited = toggle.favorited,
            fav_nums = toggle.fav_nums,
            "Favorite toggled"
        );

        Ok(toggle)
    }

    /// Whether `user_id` has a mark on the target. Anonymous callers never do.
    #[instrument(name = "favorite.is_favorited", skip(self))]
    pub async fn is_favorited(
        &self,
        user_id: Option<i32>,
        kind: FavoriteKind,
        target_id: i32,
    ) -> Result<bool, sqlx::Error> {
        match user_id {
            Some(uid) => self.favorite_repo.exists(uid, kind, target_id).await,
            None => Ok(false),
        }
    }
}

/// Validates the raw form: `fav_type` must name one of the three kinds and
/// `fav_id` must be a positive integer. Missing fields count as zero.
pub fn parse_target(form: &FavoriteForm) -> Result<FavoriteTarget, FavoriteError> {
    let fav_id = parse_field("fav_id", form.fav_id.as_deref())?;
    let fav_type = parse_field("fav_type", form.fav_type.as_deref())?;

    if fav_id <= 0 || fav_type <= 0 {
        return Err(FavoriteError::InvalidArgument(format!(
            "fav_id and fav_type must be positive, got fav_id={} fav_type={}",
            fav_id, fav_type
        )));
    }

    let kind = FavoriteKind::try_from(fav_type).map_err(|other| {
        FavoriteError::InvalidArgument(format!("unknown fav_type {}", other))
    })?;

    Ok(FavoriteTarget { kind, id: fav_id })
}

fn parse_field(name: &str, raw: Option<&str>) -> Result<i32, FavoriteError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => value
            .parse::<i32>()
            .map_err(|_| FavoriteError::InvalidArgument(format!("{} is not an integer", name))),
    }
}
