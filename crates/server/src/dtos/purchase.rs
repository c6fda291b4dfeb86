use chrono::NaiveDateTime;
use database::entities::purchases;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PurchaseRequest {
    pub course_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub created_at: NaiveDateTime,
}

impl From<purchases::Model> for PurchaseResponse {
    fn from(purchase: purchases::Model) -> Self {
        Self {
            id: purchase.id,
            user_id: purchase.user_id,
            course_id: purchase.course_id,
            created_at: purchase.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseCountResponse {
    pub count: u64,
}
