use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub comments: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithUser {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub comments: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user_name: String,
    pub user_image: String,
}

/// Raw `POST /course/add_comment/` form.
#[derive(Debug, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub course_id: i32,
    pub comments: String,
}

impl CommentForm {
    /// Returns `None` unless the course id is a positive integer and the
    /// comment text is non-blank.
    pub fn validate(&self) -> Option<NewComment> {
        let course_id = self
            .course_id
            .as_deref()
            .and_then(|id| id.trim().parse::<i32>().ok())
            .filter(|id| *id > 0)?;
        let comments = self
            .comments
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())?;

        Some(NewComment {
            course_id,
            comments: comments.to_string(),
        })
    }
}
