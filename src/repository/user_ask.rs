use sqlx::PgPool;
use tracing::instrument;

use crate::models::{NewUserAsk, UserAsk};

#[derive(Clone)]
pub struct UserAskRepository {
    pool: PgPool,
}

impl UserAskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(name = "db.user_ask.create", skip(self, ask), fields(course_name = %ask.course_name))]
    pub async fn create(&self, ask: &NewUserAsk) -> Result<UserAsk, sqlx::Error> {
        sqlx::query_as::<_, UserAsk>(
            r#"
            INSERT INTO user_asks (name, mobile, course_name)
            VALUES ($1, $2, $3)
            RETURNING id, name, mobile, course_name, created_at
            "#,
        )
        .bind(&ask.name)
        .bind(&ask.mobile)
        .bind(&ask.course_name)
        .fetch_one(&self.pool)
        .await
    }
}
