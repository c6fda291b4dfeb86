use crate::{
    auth::Admin,
    dtos::course::{ApprovalRequest, ApprovalResponse, CourseResponse, DeletedResponse},
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use database::services::course::CourseService;
use log::info;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

/// Courses waiting for a decision, with content
#[utoipa::path(
    get,
    path = "/admin/courses/unapproved",
    responses(
        (status = 200, description = "Unapproved courses", body = Vec<CourseResponse>),
        (status = 403, description = "Caller is not an administrator")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Administration"
)]
pub async fn list_unapproved(
    State(state): State<AppState>,
    _admin: Admin,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = CourseService::list_unapproved(&state.db).await?;

    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/admin/courses/unapproved/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Unapproved course", body = CourseResponse),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "Course not found or already approved")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Administration"
)]
pub async fn get_unapproved(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course = CourseService::find_unapproved(&state.db, id).await?;

    Ok(Json(course.into()))
}

/// Approve or reject a course; the creator's wallet is credited
#[utoipa::path(
    patch,
    path = "/admin/courses/{id}/approval",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = ApprovalRequest,
    responses(
        (status = 200, description = "Decision recorded", body = ApprovalResponse),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Course already approved")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Administration"
)]
pub async fn update_approval(
    State(state): State<AppState>,
    Admin(admin): Admin,
    Path(id): Path<Uuid>,
    Json(request): Json<ApprovalRequest>,
) -> Result<Json<ApprovalResponse>, ApiError> {
    let outcome =
        CourseService::update_approval(&state.db, &state.catalog, id, request.approval).await?;
    info!(
        "Administrator {} set approval of course {id} to {}",
        admin.user_id, request.approval
    );

    Ok(Json(outcome.into()))
}

/// Delete any course nobody bought
#[utoipa::path(
    delete,
    path = "/admin/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted", body = DeletedResponse),
        (status = 400, description = "Course was bought"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "Course not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Administration"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    _admin: Admin,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = CourseService::remove_course_by_admin(&state.db, id).await?;

    Ok(Json(DeletedResponse { deleted }))
}

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_unapproved))
        .routes(routes!(get_unapproved))
        .routes(routes!(update_approval))
        .routes(routes!(delete_course))
}
