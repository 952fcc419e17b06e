use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use super::Course;
use crate::pagination::Page;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub work_years: i32,
    pub work_company: String,
    pub work_position: String,
    pub points: String,
    pub click_nums: i32,
    pub fav_nums: i32,
    pub image: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListTeachersQuery {
    pub sort: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeacherSort {
    #[default]
    Default,
    Hot,
}

impl TeacherSort {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("hot") => TeacherSort::Hot,
            _ => TeacherSort::Default,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            TeacherSort::Default => "",
            TeacherSort::Hot => "hot",
        }
    }

    pub fn order_by(self) -> &'static str {
        match self {
            TeacherSort::Default => "id ASC",
            TeacherSort::Hot => "click_nums DESC, id ASC",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeacherListResponse {
    pub all_teachers: Page<Teacher>,
    pub teacher_nums: i64,
    pub hot_teachers: Vec<Teacher>,
    pub sort: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TeacherDetailResponse {
    pub teacher: Teacher,
    pub has_teacher_faved: bool,
    pub has_org_faved: bool,
    pub hot_teachers: Vec<Teacher>,
    pub all_courses: Vec<Course>,
}
