use serde::Serialize;

pub const MSG_NOT_LOGGED_IN: &str = "用户未登录";
pub const MSG_FAVORITED: &str = "已收藏";
pub const MSG_UNFAVORITED: &str = "收藏";
pub const MSG_FAVORITE_FAILED: &str = "收藏出错";
pub const MSG_COMMENT_ADDED: &str = "添加成功";
pub const MSG_COMMENT_FAILED: &str = "添加失败";
pub const MSG_ASK_FAILED: &str = "添加出错";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AjaxStatus {
    Success,
    Fail,
}

/// `{"status": "success"|"fail", "msg": ...}` envelope returned by the
/// form-post endpoints the pages call over XHR.
#[derive(Debug, Clone, Serialize)]
pub struct AjaxResponse {
    pub status: AjaxStatus,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub msg: String,
}

impl AjaxResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            status: AjaxStatus::Success,
            msg: msg.into(),
        }
    }

    /// Bare `{"status":"success"}`.
    pub fn ok() -> Self {
        Self::success(String::new())
    }

    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            status: AjaxStatus::Fail,
            msg: msg.into(),
        }
    }
}
