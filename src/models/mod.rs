mod ajax;
mod comment;
mod course;
mod favorite;
mod organization;
mod teacher;
mod user;
mod user_ask;

pub use ajax::*;
pub use comment::*;
pub use course::*;
pub use favorite::*;
pub use organization::*;
pub use teacher::*;
pub use user::*;
pub use user_ask::*;
