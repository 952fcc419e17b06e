use std::fmt;

use serde::Deserialize;

/// What a favorite mark points at. The discriminants are the `fav_type`
/// values stored in `user_favorites` and posted by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteKind {
    Course = 1,
    Organization = 2,
    Teacher = 3,
}

impl FavoriteKind {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Table holding the `fav_nums` counter for this kind of target.
    pub fn target_table(self) -> &'static str {
        match self {
            FavoriteKind::Course => "courses",
            FavoriteKind::Organization => "course_orgs",
            FavoriteKind::Teacher => "teachers",
        }
    }
}

impl TryFrom<i32> for FavoriteKind {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FavoriteKind::Course),
            2 => Ok(FavoriteKind::Organization),
            3 => Ok(FavoriteKind::Teacher),
            other => Err(other),
        }
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FavoriteKind::Course => "course",
            FavoriteKind::Organization => "organization",
            FavoriteKind::Teacher => "teacher",
        };
        f.write_str(name)
    }
}

/// Raw `POST /org/add_fav/` form. Fields stay strings so that missing or
/// malformed values surface as a failure envelope instead of a 422.
#[derive(Debug, Default, Deserialize)]
pub struct FavoriteForm {
    #[serde(default)]
    pub fav_id: Option<String>,
    #[serde(default)]
    pub fav_type: Option<String>,
}

/// A validated toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteTarget {
    pub kind: FavoriteKind,
    pub id: i32,
}

/// Result of one toggle: the new state and the target's counter after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteToggle {
    pub favorited: bool,
    pub fav_nums: i32,
}
