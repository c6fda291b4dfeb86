use crate::{
    entities::{course_stars, courses, purchases},
    error::{CatalogError, unique_violation_as},
};
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

/// Ledger of which user bought which course
pub struct PurchaseService;

impl PurchaseService {
    /// Records that `user_id` bought `course_id`
    ///
    /// Only approved courses can be bought, and only once per user.
    pub async fn record_purchase<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<purchases::Model, CatalogError> {
        let duplicate = || CatalogError::Conflict("You have already purchased this course.".into());

        courses::Entity::find_by_id(course_id)
            .filter(courses::Column::Approved.eq(true))
            .one(db)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Course {course_id} not found.")))?;

        if Self::has_purchased(db, course_id, user_id).await? {
            return Err(duplicate());
        }

        let purchase = purchases::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            course_id: Set(course_id),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(db)
        .await
        .map_err(|e| unique_violation_as(e, duplicate()))?;

        info!("User {user_id} purchased course {course_id}");
        Ok(purchase)
    }

    pub async fn count_purchases<C: ConnectionTrait>(
        db: &C,
        course_id: Uuid,
    ) -> Result<u64, CatalogError> {
        Ok(purchases::Entity::find()
            .filter(purchases::Column::CourseId.eq(course_id))
            .count(db)
            .await?)
    }

    pub async fn has_purchased<C: ConnectionTrait>(
        db: &C,
        course_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, CatalogError> {
        let count = purchases::Entity::find()
            .filter(purchases::Column::CourseId.eq(course_id))
            .filter(purchases::Column::UserId.eq(user_id))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Whether the user already rated the course
    ///
    /// Derived from the stored star ratings themselves, so it can never
    /// disagree with the stars a course is rated from.
    pub async fn has_reviewed<C: ConnectionTrait>(
        db: &C,
        course_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, CatalogError> {
        let count = course_stars::Entity::find()
            .filter(course_stars::Column::CourseId.eq(course_id))
            .filter(course_stars::Column::UserId.eq(user_id))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Every course the user bought, content included
    pub async fn user_purchased_courses<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
    ) -> Result<Vec<courses::Model>, CatalogError> {
        Ok(courses::Entity::find()
            .inner_join(purchases::Entity)
            .filter(purchases::Column::UserId.eq(user_id))
            .order_by_asc(purchases::Column::CreatedAt)
            .all(db)
            .await?)
    }

    /// A single course the user bought, content included
    pub async fn user_purchased_course<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<courses::Model, CatalogError> {
        courses::Entity::find_by_id(course_id)
            .inner_join(purchases::Entity)
            .filter(purchases::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| {
                CatalogError::NotFound(format!("No purchase of course {course_id} found."))
            })
    }
}
