use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::models::{Course, CourseResource, CourseSort, Lesson, Video, VideoWithCourse};

const COURSE_COLUMNS: &str = "id, org_id, teacher_id, name, description, detail, is_banner, \
                              degree, learn_times, students, fav_nums, image, click_nums, \
                              category, tag, youneed_know, teacher_tell, created_at";

#[derive(Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(name = "db.course.find_by_id", skip(self))]
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    #[instrument(name = "db.course.exists", skip(self))]
    pub async fn exists(&self, id: i32) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1) as exists")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get::<bool, _>("exists"))
    }

    #[instrument(name = "db.course.list", skip(self))]
    pub async fn list(
        &self,
        sort: CourseSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY {} LIMIT $1 OFFSET $2",
            sort.order_by()
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.course.count", skip(self))]
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM courses")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get::<i64, _>("count"))
    }

    #[instrument(name = "db.course.hottest", skip(self))]
    pub async fn hottest(&self, limit: i64) -> Result<Vec<Course>, sqlx::Error> {
        self.list(CourseSort::Hot, limit, 0).await
    }

    #[instrument(name = "db.course.record_click", skip(self))]
    pub async fn record_click(&self, id: i32) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET click_nums = click_nums + 1 WHERE id = $1 RETURNING {COURSE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Courses of one organization; `limit = None` returns all of them.
    #[instrument(name = "db.course.list_by_org", skip(self))]
    pub async fn list_by_org(
        &self,
        org_id: i32,
        limit: Option<i64>,
    ) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE org_id = $1 ORDER BY id LIMIT $2"
        ))
        .bind(org_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.course.list_by_teacher", skip(self))]
    pub async fn list_by_teacher(&self, teacher_id: i32) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE teacher_id = $1 ORDER BY id"
        ))
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Other courses carrying the same tag.
    #[instrument(name = "db.course.related_by_tag", skip(self))]
    pub async fn related_by_tag(
        &self,
        course_id: i32,
        tag: &str,
        limit: i64,
    ) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            r#"
            SELECT {COURSE_COLUMNS}
            FROM courses
            WHERE tag = $1 AND id <> $2
            ORDER BY id
            LIMIT $3
            "#
        ))
        .bind(tag)
        .bind(course_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Courses taken by students who also took `course_id`, hottest first.
    #[instrument(name = "db.course.related_by_students", skip(self))]
    pub async fn related_by_students(
        &self,
        course_id: i32,
        limit: i64,
    ) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(&format!(
            r#"
            SELECT {COURSE_COLUMNS}
            FROM courses
            WHERE id <> $1
              AND id IN (
                  SELECT uc.course_id
                  FROM user_courses uc
                  WHERE uc.user_id IN (
                      SELECT user_id FROM user_courses WHERE course_id = $1
                  )
              )
            ORDER BY click_nums DESC, id ASC
            LIMIT $2
            "#
        ))
        .bind(course_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.course.lessons", skip(self))]
    pub async fn lessons(&self, course_id: i32) -> Result<Vec<Lesson>, sqlx::Error> {
        sqlx::query_as::<_, Lesson>(
            "SELECT id, course_id, name, created_at FROM lessons WHERE course_id = $1 ORDER BY id",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.course.videos", skip(self))]
    pub async fn videos(&self, course_id: i32) -> Result<Vec<Video>, sqlx::Error> {
        sqlx::query_as::<_, Video>(
            r#"
            SELECT v.id, v.lesson_id, v.name, v.url, v.learn_times, v.created_at
            FROM videos v
            JOIN lessons l ON v.lesson_id = l.id
            WHERE l.course_id = $1
            ORDER BY v.id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.course.resources", skip(self))]
    pub async fn resources(&self, course_id: i32) -> Result<Vec<CourseResource>, sqlx::Error> {
        sqlx::query_as::<_, CourseResource>(
            r#"
            SELECT id, course_id, name, download, created_at
            FROM course_resources
            WHERE course_id = $1
            ORDER BY id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
    }

    #[instrument(name = "db.video.find_by_id", skip(self))]
    pub async fn find_video(&self, video_id: i32) -> Result<Option<VideoWithCourse>, sqlx::Error> {
        sqlx::query_as::<_, VideoWithCourse>(
            r#"
            SELECT v.id, v.lesson_id, v.name, v.url, v.learn_times, v.created_at, l.course_id
            FROM videos v
            JOIN lessons l ON v.lesson_id = l.id
            WHERE v.id = $1
            "#,
        )
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await
    }
}
