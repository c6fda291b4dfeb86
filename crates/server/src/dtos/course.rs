use crate::dtos::user::UserResponse;
use chrono::NaiveDateTime;
use database::{
    entities::courses,
    services::course::{ApprovalOutcome, CourseComment, CourseDetail, CourseSummary},
};
use models::{course_input::CourseDraft, difficulty::Difficulty};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Every field is required; missing ones are reported together
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "beginner")]
    pub difficulty: Option<Difficulty>,
    pub topic: Option<String>,
    pub content: Option<String>,
}

impl From<CreateCourseRequest> for CourseDraft {
    fn from(request: CreateCourseRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            difficulty: request.difficulty,
            topic: request.topic,
            content: request.content,
        }
    }
}

/// Full course record, including content
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub topic: String,
    pub content: String,
    pub creator_id: Uuid,
    pub approved: bool,
    pub price: Option<i32>,
    pub rating: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<courses::Model> for CourseResponse {
    fn from(course: courses::Model) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            difficulty: course.difficulty.to_string(),
            topic: course.topic,
            content: course.content,
            creator_id: course.creator_id,
            approved: course.approved,
            price: course.price,
            rating: course.rating,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseSummaryResponse {
    pub title: String,
    pub topic: String,
    pub price: Option<i32>,
    pub rating: Option<f64>,
}

impl From<CourseSummary> for CourseSummaryResponse {
    fn from(summary: CourseSummary) -> Self {
        Self {
            title: summary.title,
            topic: summary.topic,
            price: summary.price,
            rating: summary.rating,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub user_id: Uuid,
    pub value: String,
}

impl From<CourseComment> for CommentResponse {
    fn from(comment: CourseComment) -> Self {
        Self {
            user_id: comment.user_id,
            value: comment.value,
        }
    }
}

/// Public view of a course; content is only visible to buyers
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub topic: String,
    pub price: Option<i32>,
    pub rating: Option<f64>,
    pub description: String,
    pub stars: Vec<i32>,
    pub comments: Vec<CommentResponse>,
}

impl From<CourseDetail> for CourseDetailResponse {
    fn from(detail: CourseDetail) -> Self {
        Self {
            id: detail.id,
            title: detail.title,
            topic: detail.topic,
            price: detail.price,
            rating: detail.rating,
            description: detail.description,
            stars: detail.stars,
            comments: detail.comments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StarRequest {
    /// Between 1 and 5
    pub stars: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApprovalRequest {
    pub approval: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApprovalResponse {
    pub course: CourseResponse,
    /// Creator after the wallet credit, when one was made
    pub credited_creator: Option<UserResponse>,
}

impl From<ApprovalOutcome> for ApprovalResponse {
    fn from(outcome: ApprovalOutcome) -> Self {
        Self {
            course: outcome.course.into(),
            credited_creator: outcome.credited_creator.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Substring matched against course content
    pub keyword: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_becomes_draft() {
        let request: CreateCourseRequest = serde_json::from_str(
            r#"{"title": "Rust", "difficulty": "advanced", "content": "ownership"}"#,
        )
        .unwrap();

        let draft = CourseDraft::from(request);
        assert_eq!(draft.title.as_deref(), Some("Rust"));
        assert_eq!(draft.difficulty, Some(Difficulty::Advanced));
        assert_eq!(draft.description, None);
        assert_eq!(
            draft.validate().unwrap_err(),
            vec!["description", "topic"]
        );
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let result =
            serde_json::from_str::<CreateCourseRequest>(r#"{"difficulty": "impossible"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_comment_is_blank() {
        let request: CommentRequest = serde_json::from_str("{}").unwrap();
        assert!(request.comment.is_empty());
    }
}
