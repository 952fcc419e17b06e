use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::models::{Teacher, TeacherSort};

const TEACHER_COLUMNS: &str = "id, org_id, name, work_years, work_company, work_position, \
                               points, click_nums, fav_nums, image, created_at";

#[derive(Clone)]
pub struct TeacherRepository {
    pool: PgPool,
}

impl TeacherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(name = "db.teacher.list", skip(self))]
    pub async fn list(
        &self,
        sort: TeacherSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Teacher>, sqlx::Error> {
        sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers ORDER BY {} LIMIT $1 OFFSET $2",
            sort.order_by()
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.teacher.count", skip(self))]
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM teachers")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get::<i64, _>("count"))
    }

    #[instrument(name = "db.teacher.hottest", skip(self))]
    pub async fn hottest(&self, limit: i64) -> Result<Vec<Teacher>, sqlx::Error> {
        self.list(TeacherSort::Hot, limit, 0).await
    }

    /// Teachers of one organization; `limit = None` returns all of them.
    #[instrument(name = "db.teacher.list_by_org", skip(self))]
    pub async fn list_by_org(
        &self,
        org_id: i32,
        limit: Option<i64>,
    ) -> Result<Vec<Teacher>, sqlx::Error> {
        sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE org_id = $1 ORDER BY id LIMIT $2"
        ))
        .bind(org_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.teacher.record_click", skip(self))]
    pub async fn record_click(&self, id: i32) -> Result<Option<Teacher>, sqlx::Error> {
        sqlx::query_as::<_, Teacher>(&format!(
            "UPDATE teachers SET click_nums = click_nums + 1 WHERE id = $1 RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
