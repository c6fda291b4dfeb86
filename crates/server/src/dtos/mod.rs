pub mod course;
pub mod purchase;
pub mod user;
