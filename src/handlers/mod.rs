mod auth;
mod courses;
mod favorites;
mod health;
mod organizations;

pub use auth::{current_user, login, register};
pub use courses::{
    add_comment, course_comments, course_detail, course_info, list_courses, play_video,
};
pub use favorites::add_fav;
pub use health::health_check;
pub use organizations::{
    add_ask, list_orgs, list_teachers, org_courses, org_desc, org_home, org_teachers, teacher_detail,
};
