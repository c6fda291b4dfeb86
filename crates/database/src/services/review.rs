use crate::{
    entities::{course_comments, course_stars, courses},
    error::{CatalogError, unique_violation_as},
    services::{
        course::{CourseDetail, CourseService},
        purchase::PurchaseService,
    },
};
use chrono::Utc;
use log::info;
use models::rating::{MAX_STARS, MIN_STARS, course_price, course_rating, is_valid_star};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

/// Comments and star ratings left by buyers of a course
pub struct ReviewService;

impl ReviewService {
    /// Adds the user's one comment on a course they bought
    pub async fn add_comment(
        db: &DatabaseConnection,
        course_id: Uuid,
        user_id: Uuid,
        comment: &str,
    ) -> Result<CourseDetail, CatalogError> {
        let duplicate =
            || CatalogError::BadRequest("You have already commented on this course.".into());

        let txn = db.begin().await?;

        Self::ensure_course_exists(&txn, course_id).await?;

        if !PurchaseService::has_purchased(&txn, course_id, user_id).await? {
            return Err(CatalogError::Forbidden(
                "You can only comment on courses you have purchased.".into(),
            ));
        }

        if comment.trim().is_empty() {
            return Err(CatalogError::ValidationFailed(
                "A comment cannot be empty.".into(),
            ));
        }

        let existing = course_comments::Entity::find()
            .filter(course_comments::Column::CourseId.eq(course_id))
            .filter(course_comments::Column::UserId.eq(user_id))
            .count(&txn)
            .await?;
        if existing > 0 {
            return Err(duplicate());
        }

        course_comments::ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            value: Set(comment.to_owned()),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| unique_violation_as(e, duplicate()))?;

        txn.commit().await?;
        info!("User {user_id} commented on course {course_id}");

        CourseService::find_course_detail(db, course_id).await
    }

    /// Stores the user's one star rating and reprices the course
    pub async fn rate_course(
        db: &DatabaseConnection,
        course_id: Uuid,
        user_id: Uuid,
        stars: i32,
    ) -> Result<CourseDetail, CatalogError> {
        let duplicate = || CatalogError::BadRequest("You have already rated this course.".into());

        let txn = db.begin().await?;

        Self::ensure_course_exists(&txn, course_id).await?;

        if !PurchaseService::has_purchased(&txn, course_id, user_id).await? {
            return Err(CatalogError::Forbidden(
                "You can only rate courses you have purchased.".into(),
            ));
        }

        if !is_valid_star(stars) {
            return Err(CatalogError::ValidationFailed(format!(
                "A rating must be between {MIN_STARS} and {MAX_STARS} stars."
            )));
        }

        if PurchaseService::has_reviewed(&txn, course_id, user_id).await? {
            return Err(duplicate());
        }

        course_stars::ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            value: Set(stars),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| unique_violation_as(e, duplicate()))?;

        let course = Self::recalculate_rating(&txn, course_id).await?;
        txn.commit().await?;

        info!(
            "User {user_id} rated course {course_id} with {stars} stars, rating now {:?} at price {:?}",
            course.rating, course.price
        );

        CourseService::find_course_detail(db, course_id).await
    }

    /// Recomputes rating and price of a course from all of its stars
    ///
    /// Both fields are written together so they never disagree.
    pub async fn recalculate_rating<C: ConnectionTrait>(
        db: &C,
        course_id: Uuid,
    ) -> Result<courses::Model, CatalogError> {
        let course = courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Course {course_id} not found.")))?;

        let stars = course_stars::Entity::find()
            .select_only()
            .column(course_stars::Column::Value)
            .filter(course_stars::Column::CourseId.eq(course_id))
            .order_by_asc(course_stars::Column::Id)
            .into_tuple::<i32>()
            .all(db)
            .await?;

        let rating = course_rating(&stars);

        let mut active: courses::ActiveModel = course.into();
        active.rating = Set(Some(rating));
        active.price = Set(Some(course_price(rating)));

        Ok(active.update(db).await?)
    }

    async fn ensure_course_exists<C: ConnectionTrait>(
        db: &C,
        course_id: Uuid,
    ) -> Result<(), CatalogError> {
        courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .map(|_| ())
            .ok_or_else(|| CatalogError::NotFound(format!("Course {course_id} not found.")))
    }
}
