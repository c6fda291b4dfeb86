/// Amount credited to a creator's wallet when their course is reviewed
pub const DEFAULT_APPROVAL_CREDIT: i64 = 50;

/// Business settings of the course catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Wallet credit paid to the creator on an approval decision
    pub approval_credit: i64,
    /// Also pay the credit when the decision leaves the course unapproved
    pub credit_on_rejection: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            approval_credit: DEFAULT_APPROVAL_CREDIT,
            credit_on_rejection: true,
        }
    }
}

impl CatalogConfig {
    /// Whether an approval call with this flag pays the creator
    pub fn credits(&self, approval: bool) -> bool {
        approval || self.credit_on_rejection
    }
}
