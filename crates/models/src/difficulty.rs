use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How demanding a course is for its students
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[cfg(feature = "database")]
impl_text_value!(Difficulty);
