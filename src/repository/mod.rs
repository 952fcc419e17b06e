mod comment;
mod course;
mod enrollment;
mod favorite;
mod organization;
mod teacher;
mod user;
mod user_ask;

pub use comment::CommentRepository;
pub use course::CourseRepository;
pub use enrollment::EnrollmentRepository;
pub use favorite::FavoriteRepository;
pub use organization::OrganizationRepository;
pub use teacher::TeacherRepository;
pub use user::UserRepository;
pub use user_ask::UserAskRepository;
