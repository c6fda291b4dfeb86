use crate::{
    auth::Caller,
    dtos::{
        course::CourseResponse,
        purchase::{PurchaseCountResponse, PurchaseRequest, PurchaseResponse},
    },
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::purchase::PurchaseService;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

/// Buy an approved course
#[utoipa::path(
    post,
    path = "/purchases",
    request_body = PurchaseRequest,
    responses(
        (status = 201, description = "Purchase recorded", body = PurchaseResponse),
        (status = 404, description = "Course not found or not approved"),
        (status = 409, description = "Course already purchased")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Purchases"
)]
pub async fn create_purchase(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<PurchaseResponse>), ApiError> {
    let purchase =
        PurchaseService::record_purchase(&state.db, caller.user_id, request.course_id).await?;

    Ok((StatusCode::CREATED, Json(purchase.into())))
}

/// Number of times a course was bought
#[utoipa::path(
    get,
    path = "/purchases/{course_id}/count",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Purchase count", body = PurchaseCountResponse)
    ),
    tag = "Purchases"
)]
pub async fn count_purchases(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<PurchaseCountResponse>, ApiError> {
    let count = PurchaseService::count_purchases(&state.db, course_id).await?;

    Ok(Json(PurchaseCountResponse { count }))
}

/// Every course the caller bought, with content
#[utoipa::path(
    get,
    path = "/purchases/courses",
    responses(
        (status = 200, description = "Purchased courses", body = Vec<CourseResponse>)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Purchases"
)]
pub async fn purchased_courses(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = PurchaseService::user_purchased_courses(&state.db, caller.user_id).await?;

    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// One course the caller bought, with content
#[utoipa::path(
    get,
    path = "/purchases/courses/{course_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Purchased course", body = CourseResponse),
        (status = 404, description = "Course not purchased by the caller")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Purchases"
)]
pub async fn purchased_course(
    State(state): State<AppState>,
    caller: Caller,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course =
        PurchaseService::user_purchased_course(&state.db, caller.user_id, course_id).await?;

    Ok(Json(course.into()))
}

pub fn public_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(count_purchases))
}

pub fn protected_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_purchase))
        .routes(routes!(purchased_courses))
        .routes(routes!(purchased_course))
}
