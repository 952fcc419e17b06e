use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

const MAX_NAME_CHARS: usize = 20;
const MAX_COURSE_NAME_CHARS: usize = 50;

/// Mainland mobile prefixes accepted by the consultation form.
const MOBILE_PREFIXES: [&str; 5] = ["13", "15", "18", "147", "176"];

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserAsk {
    pub id: i32,
    pub name: String,
    pub mobile: String,
    pub course_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Raw `POST /org/add_ask/` form.
#[derive(Debug, Default, Deserialize)]
pub struct UserAskForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAsk {
    pub name: String,
    pub mobile: String,
    pub course_name: String,
}

impl UserAskForm {
    /// Returns `None` unless every field is present, fits its column and
    /// `mobile` is an 11-digit number with a known prefix.
    pub fn validate(&self) -> Option<NewUserAsk> {
        let name = required(self.name.as_deref(), MAX_NAME_CHARS)?;
        let course_name = required(self.course_name.as_deref(), MAX_COURSE_NAME_CHARS)?;
        let mobile = self
            .mobile
            .as_deref()
            .map(str::trim)
            .filter(|m| is_mobile(m))?;

        Some(NewUserAsk {
            name: name.to_string(),
            mobile: mobile.to_string(),
            course_name: course_name.to_string(),
        })
    }
}

fn required(raw: Option<&str>, max_chars: usize) -> Option<&str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && value.chars().count() <= max_chars)
}

fn is_mobile(value: &str) -> bool {
    value.len() == 11
        && value.bytes().all(|b| b.is_ascii_digit())
        && MOBILE_PREFIXES.iter().any(|prefix| value.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, mobile: &str, course_name: &str) -> UserAskForm {
        UserAskForm {
            name: Some(name.to_string()),
            mobile: Some(mobile.to_string()),
            course_name: Some(course_name.to_string()),
        }
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let ask = form(" 小明 ", "13812345678", " Rust 入门 ")
            .validate()
            .expect("form should validate");

        assert_eq!(
            ask,
            NewUserAsk {
                name: "小明".to_string(),
                mobile: "13812345678".to_string(),
                course_name: "Rust 入门".to_string(),
            }
        );
    }

    #[test]
    fn test_accepts_every_known_prefix() {
        for mobile in ["13000000000", "15900000000", "18800000000", "14700000000", "17600000000"] {
            assert!(form("a", mobile, "b").validate().is_some(), "{}", mobile);
        }
    }

    #[test]
    fn test_rejects_bad_mobiles() {
        for mobile in ["", "1381234567", "138123456789", "12812345678", "1381234567a", "17712345678"] {
            assert!(form("a", mobile, "b").validate().is_none(), "{:?}", mobile);
        }
    }

    #[test]
    fn test_rejects_blank_or_long_fields() {
        assert!(form("  ", "13812345678", "b").validate().is_none());
        assert!(form("a", "13812345678", "").validate().is_none());
        assert!(form(&"名".repeat(21), "13812345678", "b").validate().is_none());
        assert!(form(&"名".repeat(20), "13812345678", "b").validate().is_some());
        assert!(form("a", "13812345678", &"x".repeat(51)).validate().is_none());
    }

    #[test]
    fn test_missing_fields_fail() {
        assert!(UserAskForm::default().validate().is_none());
    }
}
