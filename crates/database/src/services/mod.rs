pub mod course;
pub mod purchase;
pub mod review;
pub mod user;
