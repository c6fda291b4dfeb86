use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role a registered user acts under
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Buys, creates and reviews courses
    #[default]
    User,
    /// Approves and removes courses
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[cfg(feature = "database")]
impl_text_value!(Role);
