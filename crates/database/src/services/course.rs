use crate::{
    config::CatalogConfig,
    entities::{course_comments, course_stars, courses, users},
    error::{CatalogError, unique_violation_as},
    services::{purchase::PurchaseService, user::UserService},
};
use chrono::Utc;
use futures::try_join;
use log::{info, warn};
use models::course_input::{CourseDraft, CoursePatch};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    TransactionTrait, prelude::Expr,
};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Public projection used by listings and search; never carries content
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct CourseSummary {
    pub title: String,
    pub topic: String,
    pub price: Option<i32>,
    pub rating: Option<f64>,
}

/// A comment as shown on a course page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseComment {
    pub user_id: Uuid,
    pub value: String,
}

/// Public projection of a single course; never carries content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseDetail {
    pub id: Uuid,
    pub title: String,
    pub topic: String,
    pub price: Option<i32>,
    pub rating: Option<f64>,
    pub description: String,
    /// Star values in submission order
    pub stars: Vec<i32>,
    /// Comments in submission order
    pub comments: Vec<CourseComment>,
}

/// Result of an approval decision
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalOutcome {
    pub course: courses::Model,
    /// The creator after the wallet credit, when one was paid
    pub credited_creator: Option<users::Model>,
}

pub struct CourseService;

impl CourseService {
    /// Creates an unapproved course owned by `creator_id`
    ///
    /// Description, title and content must each be unused by every other
    /// course; they are checked in that order and the first clash is reported.
    pub async fn create_course(
        db: &DatabaseConnection,
        draft: CourseDraft,
        creator_id: Uuid,
    ) -> Result<courses::Model, CatalogError> {
        let course = draft
            .validate()
            .map_err(|missing| CatalogError::missing_fields(&missing))?;

        Self::ensure_unique(
            db,
            None,
            Some(&course.description),
            Some(&course.title),
            Some(&course.content),
        )
        .await?;

        let now = Utc::now().naive_utc();
        let created = courses::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(course.title),
            description: Set(course.description),
            difficulty: Set(course.difficulty),
            topic: Set(course.topic),
            content: Set(course.content),
            creator_id: Set(creator_id),
            approved: Set(false),
            price: Set(None),
            rating: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .map_err(|e| {
            unique_violation_as(
                e,
                CatalogError::Conflict(
                    "A course with the same title, description or content already exists.".into(),
                ),
            )
        })?;

        info!("User {creator_id} created course {}", created.id);
        Ok(created)
    }

    /// Rejects values already used by another course
    ///
    /// # Arguments
    /// * `exclude` - The course being edited, which may keep its own values
    async fn ensure_unique<C: ConnectionTrait>(
        db: &C,
        exclude: Option<Uuid>,
        description: Option<&str>,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<(), CatalogError> {
        let checks = [
            (courses::Column::Description, description, "description"),
            (courses::Column::Title, title, "title"),
            (courses::Column::Content, content, "content"),
        ];

        for (column, value, name) in checks {
            let Some(value) = value else {
                continue;
            };

            let mut query = courses::Entity::find().filter(column.eq(value));
            if let Some(id) = exclude {
                query = query.filter(courses::Column::Id.ne(id));
            }

            if query.count(db).await? > 0 {
                return Err(CatalogError::Conflict(format!(
                    "A course with the same {name} already exists."
                )));
            }
        }

        Ok(())
    }

    /// Selects the public summary columns of courses
    fn summaries() -> Select<courses::Entity> {
        courses::Entity::find().select_only().columns([
            courses::Column::Title,
            courses::Column::Topic,
            courses::Column::Price,
            courses::Column::Rating,
        ])
    }

    /// All approved courses, best rated first
    pub async fn list_approved<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<CourseSummary>, CatalogError> {
        let courses = Self::summaries()
            .filter(courses::Column::Approved.eq(true))
            // Courses nobody rated yet go last on every backend
            .order_by_asc(Expr::col(courses::Column::Rating).is_null())
            .order_by_desc(courses::Column::Rating)
            .into_model::<CourseSummary>()
            .all(db)
            .await?;

        if courses.is_empty() {
            return Err(CatalogError::NotFound("No approved courses found.".into()));
        }

        Ok(courses)
    }

    /// Public view of a course with its ratings and comments
    ///
    /// Does not look at the approval state.
    pub async fn find_course_detail<C: ConnectionTrait>(
        db: &C,
        course_id: Uuid,
    ) -> Result<CourseDetail, CatalogError> {
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

        let comments = course_comments::Entity::find()
            .filter(course_comments::Column::CourseId.eq(course_id))
            .order_by_asc(course_comments::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(|comment| CourseComment {
                user_id: comment.user_id,
                value: comment.value,
            })
            .collect();

        Ok(CourseDetail {
            id: course.id,
            title: course.title,
            topic: course.topic,
            price: course.price,
            rating: course.rating,
            description: course.description,
            stars,
            comments,
        })
    }

    /// Applies a creator's edit to their course
    ///
    /// # Arguments
    /// * `fields` - The raw JSON object sent by the client
    /// * `user_id` - The user asking for the change
    pub async fn update_course(
        db: &DatabaseConnection,
        course_id: Uuid,
        fields: &Map<String, Value>,
        user_id: Uuid,
    ) -> Result<courses::Model, CatalogError> {
        let course = courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or_else(|| CatalogError::NotFound("Course not found.".into()))?;

        if course.creator_id != user_id {
            return Err(CatalogError::Forbidden(
                "You are not authorized to update this course.".into(),
            ));
        }

        let patch =
            CoursePatch::from_fields(fields).map_err(|e| CatalogError::BadRequest(e.to_string()))?;

        if patch.is_empty() {
            return Ok(course);
        }

        Self::ensure_unique(
            db,
            Some(course_id),
            patch.description.as_deref(),
            patch.title.as_deref(),
            patch.content.as_deref(),
        )
        .await?;

        let mut active: courses::ActiveModel = course.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(topic) = patch.topic {
            active.topic = Set(topic);
        }
        if let Some(content) = patch.content {
            active.content = Set(content);
        }
        if let Some(difficulty) = patch.difficulty {
            active.difficulty = Set(difficulty);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(db).await.map_err(|e| {
            unique_violation_as(
                e,
                CatalogError::Conflict(
                    "A course with the same title, description or content already exists.".into(),
                ),
            )
        })?;

        info!("User {user_id} updated course {course_id}");
        Ok(updated)
    }

    /// Deletes any course nobody has bought yet
    pub async fn remove_course_by_admin(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> Result<bool, CatalogError> {
        courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                CatalogError::NotFound(format!("Course with ID '{course_id}' not found"))
            })?;

        if PurchaseService::count_purchases(db, course_id).await? > 0 {
            return Err(CatalogError::BadRequest(
                "This course has buyers and cannot be deleted.".into(),
            ));
        }

        let result = courses::Entity::delete_by_id(course_id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(CatalogError::Internal("Failed to delete course".into()));
        }

        info!("Administrator removed course {course_id}");
        Ok(true)
    }

    /// Lets a creator delete their own course while nobody has bought it
    pub async fn remove_own_course(
        db: &DatabaseConnection,
        course_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), CatalogError> {
        let (course, purchase_count) = try_join!(
            async {
                courses::Entity::find_by_id(course_id)
                    .one(db)
                    .await
                    .map_err(CatalogError::from)
            },
            PurchaseService::count_purchases(db, course_id),
        )?;

        let course = course.ok_or_else(|| {
            CatalogError::NotFound(format!("Course with ID '{course_id}' not found."))
        })?;

        if purchase_count > 0 || course.creator_id != user_id {
            warn!(
                "User {user_id} may not delete course {course_id} ({purchase_count} purchases)"
            );
            return Err(CatalogError::Forbidden(
                "This course cannot be deleted.".into(),
            ));
        }

        let result = courses::Entity::delete_many()
            .filter(courses::Column::Id.eq(course_id))
            .filter(courses::Column::CreatorId.eq(user_id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::Internal("Failed to delete course".into()));
        }

        info!("User {user_id} removed their course {course_id}");
        Ok(())
    }

    /// Courses waiting for an administrator, content included
    pub async fn list_unapproved<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<courses::Model>, CatalogError> {
        Ok(courses::Entity::find()
            .filter(courses::Column::Approved.eq(false))
            .order_by_asc(courses::Column::CreatedAt)
            .all(db)
            .await?)
    }

    pub async fn find_unapproved<C: ConnectionTrait>(
        db: &C,
        course_id: Uuid,
    ) -> Result<courses::Model, CatalogError> {
        courses::Entity::find_by_id(course_id)
            .filter(courses::Column::Approved.eq(false))
            .one(db)
            .await?
            .ok_or_else(|| {
                CatalogError::NotFound(format!(
                    "Unapproved course with ID '{course_id}' not found."
                ))
            })
    }

    /// Records an administrator's decision on a new course
    ///
    /// A course can be decided while it is unapproved; once approved, any
    /// further call is a conflict. The decision is saved first, then the
    /// creator's wallet is credited, both in one transaction.
    pub async fn update_approval(
        db: &DatabaseConnection,
        config: &CatalogConfig,
        course_id: Uuid,
        approval: bool,
    ) -> Result<ApprovalOutcome, CatalogError> {
        let txn = db.begin().await?;

        let (course, creator) = courses::Entity::find_by_id(course_id)
            .find_also_related(users::Entity)
            .one(&txn)
            .await?
            .ok_or_else(|| CatalogError::NotFound("Course not found.".into()))?;

        if course.approved {
            return Err(CatalogError::Conflict(
                "Course has already been approved.".into(),
            ));
        }

        let creator =
            creator.ok_or_else(|| CatalogError::NotFound("Course creator not found.".into()))?;

        let now = Utc::now().naive_utc();
        Self::record_decision(&txn, course_id, approval, now).await?;
        let course = courses::Model {
            approved: approval,
            updated_at: now,
            ..course
        };

        let credited_creator = if config.credits(approval) {
            Some(UserService::credit_wallet(&txn, creator.id, config.approval_credit).await?)
        } else {
            None
        };

        txn.commit().await?;

        info!(
            "Course {course_id} {} by administrator",
            if approval { "approved" } else { "rejected" }
        );

        Ok(ApprovalOutcome {
            course,
            credited_creator,
        })
    }

    /// Writes the decision only while the course is still unapproved
    ///
    /// The row is re-checked by the update itself, so of two concurrent
    /// approvals only one changes the row; the other gets a conflict.
    async fn record_decision<C: ConnectionTrait>(
        db: &C,
        course_id: Uuid,
        approval: bool,
        now: chrono::NaiveDateTime,
    ) -> Result<(), CatalogError> {
        let result = courses::Entity::update_many()
            .col_expr(courses::Column::Approved, Expr::value(approval))
            .col_expr(courses::Column::UpdatedAt, Expr::value(now))
            .filter(courses::Column::Id.eq(course_id))
            .filter(courses::Column::Approved.eq(false))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::Conflict(
                "Course has already been approved.".into(),
            ));
        }

        Ok(())
    }

    /// Every course created by the user, approved or not
    pub async fn find_user_courses<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
    ) -> Result<Vec<courses::Model>, CatalogError> {
        let courses = courses::Entity::find()
            .filter(courses::Column::CreatorId.eq(user_id))
            .order_by_asc(courses::Column::CreatedAt)
            .all(db)
            .await?;

        if courses.is_empty() {
            return Err(CatalogError::NotFound(
                "No courses found for the user.".into(),
            ));
        }

        Ok(courses)
    }

    /// Approved courses whose content contains `keyword`
    ///
    /// Case sensitivity follows the collation of the database.
    pub async fn search_by_keyword<C: ConnectionTrait>(
        db: &C,
        keyword: &str,
    ) -> Result<Vec<CourseSummary>, CatalogError> {
        let courses = Self::summaries()
            .filter(courses::Column::Approved.eq(true))
            .filter(courses::Column::Content.contains(keyword))
            .into_model::<CourseSummary>()
            .all(db)
            .await?;

        if courses.is_empty() {
            return Err(CatalogError::NotFound("No courses found.".into()));
        }

        Ok(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use models::{difficulty::Difficulty, role::Role};
    use sea_orm::{ConnectOptions, Database};

    async fn setup() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_decision_is_not_written_over_an_approval() {
        let db = setup().await;
        let creator = UserService::register(&db, "creator@example.com", "Creator", Role::User)
            .await
            .unwrap();
        let draft = CourseDraft {
            title: Some("Rust".to_string()),
            description: Some("Systems programming".to_string()),
            difficulty: Some(Difficulty::Beginner),
            topic: Some("programming".to_string()),
            content: Some("Ownership".to_string()),
        };
        let course = CourseService::create_course(&db, draft, creator.id)
            .await
            .unwrap();

        CourseService::update_approval(&db, &CatalogConfig::default(), course.id, true)
            .await
            .unwrap();

        // A second request that read the course before the approval committed
        let now = Utc::now().naive_utc();
        for approval in [true, false] {
            let err = CourseService::record_decision(&db, course.id, approval, now)
                .await
                .unwrap_err();
            assert!(matches!(err, CatalogError::Conflict(_)));
        }

        let stored = courses::Entity::find_by_id(course.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.approved);
        let creator = UserService::get_by_id(&db, creator.id).await.unwrap();
        assert_eq!(creator.wallet, CatalogConfig::default().approval_credit);
    }
}
