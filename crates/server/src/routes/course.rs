use crate::{
    auth::Caller,
    dtos::course::{
        CommentRequest, CourseDetailResponse, CourseResponse, CourseSummaryResponse,
        CreateCourseRequest, SearchParams, StarRequest,
    },
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::{course::CourseService, review::ReviewService};
use serde_json::{Map, Value};
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

/// Approved courses, best rated first
#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "Approved courses", body = Vec<CourseSummaryResponse>),
        (status = 404, description = "No approved course yet")
    ),
    tag = "Courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseSummaryResponse>>, ApiError> {
    let courses = CourseService::list_approved(&state.db).await?;

    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Approved courses whose content contains the keyword
#[utoipa::path(
    get,
    path = "/courses/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching courses", body = Vec<CourseSummaryResponse>),
        (status = 404, description = "Nothing matched")
    ),
    tag = "Courses"
)]
pub async fn search_courses(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CourseSummaryResponse>>, ApiError> {
    let courses = CourseService::search_by_keyword(&state.db, &params.keyword).await?;

    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Public view of a course with its stars and comments
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDetailResponse>, ApiError> {
    let detail = CourseService::find_course_detail(&state.db, id).await?;

    Ok(Json(detail.into()))
}

/// Submit a course for approval
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created, awaiting approval", body = CourseResponse),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Title, description or content already used")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let course = CourseService::create_course(&state.db, request.into(), caller.user_id).await?;

    Ok((StatusCode::CREATED, Json(course.into())))
}

/// Courses created by the caller, approved or not
#[utoipa::path(
    get,
    path = "/courses/mine",
    responses(
        (status = 200, description = "Caller's courses", body = Vec<CourseResponse>),
        (status = 404, description = "Caller has not created any course")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn my_courses(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = CourseService::find_user_courses(&state.db, caller.user_id).await?;

    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Change some fields of the caller's course
///
/// Only `title`, `description`, `topic`, `content` and `difficulty` may be sent.
#[utoipa::path(
    patch,
    path = "/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body(content = Object, description = "Fields to change"),
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Field not allowed or of the wrong type"),
        (status = 403, description = "Caller is not the creator"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Title already used")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course = CourseService::update_course(&state.db, id, &fields, caller.user_id).await?;

    Ok(Json(course.into()))
}

/// Delete the caller's course if nobody bought it
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 403, description = "Caller is not the creator or the course was bought"),
        (status = 404, description = "Course not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    CourseService::remove_own_course(&state.db, id, caller.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Comment on a bought course, once
#[utoipa::path(
    post,
    path = "/courses/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment added", body = CourseDetailResponse),
        (status = 400, description = "Blank or repeated comment"),
        (status = 403, description = "Course not bought by the caller"),
        (status = 404, description = "Course not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reviews"
)]
pub async fn add_comment(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CourseDetailResponse>), ApiError> {
    let detail = ReviewService::add_comment(&state.db, id, caller.user_id, &request.comment).await?;

    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// Rate a bought course, once; rating and price are recomputed
#[utoipa::path(
    post,
    path = "/courses/{id}/stars",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = StarRequest,
    responses(
        (status = 201, description = "Rating added", body = CourseDetailResponse),
        (status = 400, description = "Stars out of range or course already rated"),
        (status = 403, description = "Course not bought by the caller"),
        (status = 404, description = "Course not found")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reviews"
)]
pub async fn rate_course(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(request): Json<StarRequest>,
) -> Result<(StatusCode, Json<CourseDetailResponse>), ApiError> {
    let detail = ReviewService::rate_course(&state.db, id, caller.user_id, request.stars).await?;

    Ok((StatusCode::CREATED, Json(detail.into())))
}

pub fn public_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_courses))
        .routes(routes!(search_courses))
        .routes(routes!(get_course))
}

pub fn protected_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_course))
        .routes(routes!(my_courses))
        .routes(routes!(update_course, delete_course))
        .routes(routes!(add_comment))
        .routes(routes!(rate_course))
}
