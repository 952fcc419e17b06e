use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::models::{FavoriteKind, FavoriteToggle};

#[derive(Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flips the (user, kind, target) mark and moves the target's `fav_nums`
    /// by one in the same transaction. Returns `None` when the target row
    /// does not exist, in which case nothing is written.
    #[instrument(name = "db.favorite.toggle", skip(self))]
    pub async fn toggle(
        &self,
        user_id: i32,
        kind: FavoriteKind,
        target_id: i32,
    ) -> Result<Option<FavoriteToggle>, sqlx::Error> {
        let table = kind.target_table();
        let mut tx = self.pool.begin().await?;

        // Row lock serializes toggles on the same target.
        let target = sqlx::query(&format!("SELECT id FROM {table} WHERE id = $1 FOR UPDATE"))
            .bind(target_id)
            .fetch_optional(&mut *tx)
            .await?;

        if target.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let removed = sqlx::query(
            "DELETE FROM user_favorites WHERE user_id = $1 AND fav_type = $2 AND fav_id = $3",
        )
        .bind(user_id)
        .bind(kind.as_i32())
        .bind(target_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let (favorited, delta) = if removed > 0 {
            (false, -1)
        } else {
            let inserted = sqlx::query(
                r#"
                INSERT INTO user_favorites (user_id, fav_type, fav_id)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, fav_type, fav_id) DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(kind.as_i32())
            .bind(target_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            (true, if inserted > 0 { 1 } else { 0 })
        };

        let row = sqlx::query(&format!(
            "UPDATE {table} SET fav_nums = GREATEST(fav_nums + $2, 0) WHERE id = $1 RETURNING fav_nums"
        ))
        .bind(target_id)
        .bind(delta)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(FavoriteToggle {
            favorited,
            fav_nums: row.get::<i32, _>("fav_nums"),
        }))
    }

    #[instrument(name = "db.favorite.exists", skip(self))]
    pub async fn exists(
        &self,
        user_id: i32,
        kind: FavoriteKind,
        target_id: i32,
    ) -> Result<bool, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM user_favorites
                WHERE user_id = $1 AND fav_type = $2 AND fav_id = $3
            ) as exists
            "#,
        )
        .bind(user_id)
        .bind(kind.as_i32())
        .bind(target_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get::<bool, _>("exists"))
    }
}
