use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::models::{City, OrgFilter, OrgSort, Organization};

const ORG_COLUMNS: &str = "id, name, description, category, click_nums, fav_nums, image, \
                           address, city_id, students, course_nums, created_at";

#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(name = "db.organization.find_by_id", skip(self))]
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Organization>, sqlx::Error> {
        sqlx::query_as::<_, Organization>(&format!(
            "SELECT {ORG_COLUMNS} FROM course_orgs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    #[instrument(name = "db.organization.list", skip(self))]
    pub async fn list(
        &self,
        filter: &OrgFilter,
        sort: OrgSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Organization>, sqlx::Error> {
        sqlx::query_as::<_, Organization>(&format!(
            r#"
            SELECT {ORG_COLUMNS}
            FROM course_orgs
            WHERE ($1::INTEGER IS NULL OR city_id = $1)
              AND ($2::VARCHAR IS NULL OR category = $2)
            ORDER BY {}
            LIMIT $3 OFFSET $4
            "#,
            sort.order_by()
        ))
        .bind(filter.city_id)
        .bind(filter.category.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.organization.count", skip(self))]
    pub async fn count(&self, filter: &OrgFilter) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) as count
            FROM course_orgs
            WHERE ($1::INTEGER IS NULL OR city_id = $1)
              AND ($2::VARCHAR IS NULL OR category = $2)
            "#,
        )
        .bind(filter.city_id)
        .bind(filter.category.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get::<i64, _>("count"))
    }

    #[instrument(name = "db.organization.hottest", skip(self))]
    pub async fn hottest(&self, limit: i64) -> Result<Vec<Organization>, sqlx::Error> {
        sqlx::query_as::<_, Organization>(&format!(
            "SELECT {ORG_COLUMNS} FROM course_orgs ORDER BY click_nums DESC, id ASC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Bumps `click_nums` and returns the updated row.
    #[instrument(name = "db.organization.record_click", skip(self))]
    pub async fn record_click(&self, id: i32) -> Result<Option<Organization>, sqlx::Error> {
        sqlx::query_as::<_, Organization>(&format!(
            "UPDATE course_orgs SET click_nums = click_nums + 1 WHERE id = $1 RETURNING {ORG_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    #[instrument(name = "db.city.list", skip(self))]
    pub async fn cities(&self) -> Result<Vec<City>, sqlx::Error> {
        sqlx::query_as::<_, City>("SELECT id, name, description FROM cities ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }
}
