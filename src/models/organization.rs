use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use super::{Course, Teacher};
use crate::pagination::Page;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub click_nums: i32,
    pub fav_nums: i32,
    pub image: String,
    pub address: String,
    pub city_id: i32,
    pub students: i32,
    pub course_nums: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListOrgsQuery {
    pub city: Option<String>,
    pub ct: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
}

/// Equality filters applied to the organization list. Blank or malformed
/// query values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgFilter {
    pub city_id: Option<i32>,
    pub category: Option<String>,
}

impl OrgFilter {
    pub fn from_query(query: &ListOrgsQuery) -> Self {
        let city_id = query
            .city
            .as_deref()
            .and_then(|city| city.trim().parse::<i32>().ok());
        let category = query
            .ct
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .map(str::to_string);

        Self { city_id, category }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrgSort {
    #[default]
    Default,
    Students,
    Courses,
}

impl OrgSort {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("students") => OrgSort::Students,
            Some("courses") => OrgSort::Courses,
            _ => OrgSort::Default,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            OrgSort::Default => "",
            OrgSort::Students => "students",
            OrgSort::Courses => "courses",
        }
    }

    pub fn order_by(self) -> &'static str {
        match self {
            OrgSort::Default => "id ASC",
            OrgSort::Students => "students DESC, id ASC",
            OrgSort::Courses => "course_nums DESC, id ASC",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrgListResponse {
    pub all_orgs: Page<Organization>,
    pub all_citys: Vec<City>,
    pub org_nums: i64,
    pub city_id: Option<i32>,
    pub category: Option<String>,
    pub hot_orgs: Vec<Organization>,
    pub sort: &'static str,
}

/// Which tab of the organization detail page is being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgTab {
    Home,
    Course,
    Desc,
    Teacher,
}

#[derive(Debug, Serialize)]
pub struct OrgPageResponse {
    pub course_org: Organization,
    pub current_page: OrgTab,
    pub has_fav: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_courses: Option<Vec<Course>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_teachers: Option<Vec<Teacher>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(city: Option<&str>, ct: Option<&str>) -> ListOrgsQuery {
        ListOrgsQuery {
            city: city.map(str::to_string),
            ct: ct.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_from_query() {
        let filter = OrgFilter::from_query(&query(Some("2"), Some("pxjg")));
        assert_eq!(filter.city_id, Some(2));
        assert_eq!(filter.category.as_deref(), Some("pxjg"));
    }

    #[test]
    fn test_filter_ignores_blank_and_malformed_values() {
        assert_eq!(OrgFilter::from_query(&query(Some(""), Some(""))), OrgFilter::default());
        assert_eq!(OrgFilter::from_query(&query(Some("beijing"), None)), OrgFilter::default());
    }

    #[test]
    fn test_sort_whitelist() {
        assert_eq!(OrgSort::parse(Some("students")), OrgSort::Students);
        assert_eq!(OrgSort::parse(Some("courses")), OrgSort::Courses);
        assert_eq!(OrgSort::parse(Some("id; DROP TABLE users")), OrgSort::Default);
        assert_eq!(OrgSort::parse(None), OrgSort::Default);
    }

    #[test]
    fn test_sort_order_by_is_descending_for_explicit_keys() {
        assert!(OrgSort::Students.order_by().starts_with("students DESC"));
        assert!(OrgSort::Courses.order_by().starts_with("course_nums DESC"));
    }

    #[test]
    fn test_tab_serialization() {
        let json = serde_json::to_string(&OrgTab::Teacher).expect("serialization should succeed");
        assert_eq!(json, "\"teacher\"");
    }
}
