use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use super::CommentWithUser;
use crate::pagination::Page;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: i32,
    pub org_id: Option<i32>,
    pub teacher_id: Option<i32>,
    pub name: String,
    pub description: String,
    pub detail: String,
    pub is_banner: bool,
    pub degree: String,
    pub learn_times: i32,
    pub students: i32,
    pub fav_nums: i32,
    pub image: String,
    pub click_nums: i32,
    pub category: String,
    pub tag: String,
    pub youneed_know: String,
    pub teacher_tell: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lesson {
    pub id: i32,
    pub course_id: i32,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: i32,
    pub lesson_id: i32,
    pub name: String,
    pub url: String,
    pub learn_times: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A video together with the course its lesson belongs to.
#[derive(Debug, Clone, FromRow)]
pub struct VideoWithCourse {
    #[sqlx(flatten)]
    pub video: Video,
    pub course_id: i32,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseResource {
    pub id: i32,
    pub course_id: i32,
    pub name: String,
    pub download: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct LessonWithVideos {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub videos: Vec<Video>,
}

impl LessonWithVideos {
    /// Groups videos under their lessons, keeping the order of `lessons`.
    pub fn group(lessons: Vec<Lesson>, videos: Vec<Video>) -> Vec<Self> {
        let mut grouped: Vec<Self> = lessons
            .into_iter()
            .map(|lesson| Self {
                lesson,
                videos: Vec::new(),
            })
            .collect();

        for video in videos {
            if let Some(entry) = grouped.iter_mut().find(|l| l.lesson.id == video.lesson_id) {
                entry.videos.push(video);
            }
        }

        grouped
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListCoursesQuery {
    pub sort: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CourseSort {
    #[default]
    Newest,
    Hot,
    Students,
}

impl CourseSort {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("hot") => CourseSort::Hot,
            Some("students") => CourseSort::Students,
            _ => CourseSort::Newest,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            CourseSort::Newest => "",
            CourseSort::Hot => "hot",
            CourseSort::Students => "students",
        }
    }

    pub fn order_by(self) -> &'static str {
        match self {
            CourseSort::Newest => "created_at DESC, id DESC",
            CourseSort::Hot => "click_nums DESC, id DESC",
            CourseSort::Students => "students DESC, id DESC",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub all_courses: Page<Course>,
    pub sort: &'static str,
    pub hot_courses: Vec<Course>,
}

#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    pub course: Course,
    pub relate_course: Vec<Course>,
    pub has_fav_course: bool,
    pub has_fav_org: bool,
}

#[derive(Debug, Serialize)]
pub struct CourseInfoResponse {
    pub course: Course,
    pub lessons: Vec<LessonWithVideos>,
    pub relate_courses: Vec<Course>,
    pub course_resources: Vec<CourseResource>,
}

#[derive(Debug, Serialize)]
pub struct CourseCommentsResponse {
    pub course: Course,
    pub relate_courses: Vec<Course>,
    pub course_resources: Vec<CourseResource>,
    pub all_comments: Vec<CommentWithUser>,
}

#[derive(Debug, Serialize)]
pub struct VideoPlayResponse {
    pub course: Course,
    pub video: Video,
    pub relate_courses: Vec<Course>,
    pub course_resources: Vec<CourseResource>,
}
