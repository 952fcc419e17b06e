use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::models::User;

const USER_COLUMNS: &str = "id, email, password_hash, name, image, created_at, updated_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new account. Emails are stored lowercased.
    #[instrument(name = "db.user.insert", skip(self, password_hash))]
    pub async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, name) VALUES (LOWER($1), $2, $3) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    #[instrument(name = "db.user.by_email", skip(self))]
    pub async fn by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    #[instrument(name = "db.user.by_id", skip(self))]
    pub async fn by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    #[instrument(name = "db.user.email_taken", skip(self))]
    pub async fn email_taken(&self, email: &str) -> Result<bool, sqlx::Error> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = LOWER($1)) AS taken",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get::<bool, _>("taken"))
    }
}
