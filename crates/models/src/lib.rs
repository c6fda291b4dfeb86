#[cfg(feature = "database")]
#[macro_use]
mod value;

pub mod course_input;
pub mod difficulty;
pub mod rating;
pub mod role;
