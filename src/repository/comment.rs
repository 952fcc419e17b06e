use sqlx::PgPool;
use tracing::instrument;

use crate::models::{Comment, CommentWithUser};

#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(name = "db.comment.create", skip(self, comments))]
    pub async fn create(
        &self,
        user_id: i32,
        course_id: i32,
        comments: &str,
    ) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO course_comments (user_id, course_id, comments)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, course_id, comments, created_at
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(comments)
        .fetch_one(&self.pool)
        .await
    }

    #[instrument(name = "db.comment.list_for_course", skip(self))]
    pub async fn list_for_course(&self, course_id: i32) -> Result<Vec<CommentWithUser>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithUser>(
            r#"
            SELECT
                c.id, c.user_id, c.course_id, c.comments, c.created_at,
                u.name as user_name, u.image as user_image
            FROM course_comments c
            JOIN users u ON c.user_id = u.id
            WHERE c.course_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
    }
}
