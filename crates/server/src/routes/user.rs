use crate::{
    auth::{Caller, Subject},
    dtos::user::{RegisterRequest, UserResponse},
    error::ApiError,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::{error::CatalogError, services::user::UserService};
use models::role::Role;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Register the token subject as a user
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Blank name"),
        (status = 401, description = "Missing or invalid JWT"),
        (status = 409, description = "Email already registered")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<AppState>,
    Subject(email): Subject,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(CatalogError::missing_fields(&["name"]).into());
    }

    let user = UserService::register(&state.db, &email, name, Role::User).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Profile and wallet balance of the caller
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Caller profile", body = UserResponse),
        (status = 401, description = "Not a registered user")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Users"
)]
pub async fn me(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserService::get_by_id(&state.db, caller.user_id).await?;

    Ok(Json(user.into()))
}

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(me))
}
