mod auth;
mod course;
mod favorite;
mod organization;
mod teacher;

pub use auth::{AuthService, Claims, TokenIssuer};
pub use course::{COURSES_PER_PAGE, CourseService};
pub use favorite::{FavoriteService, parse_target};
pub use organization::{ORGS_PER_PAGE, OrganizationService};
pub use teacher::{TEACHERS_PER_PAGE, TeacherService};
