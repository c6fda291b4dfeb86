pub mod course_comments;
pub mod course_stars;
pub mod courses;
pub mod purchases;
pub mod users;
