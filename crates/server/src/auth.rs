use crate::{error::ApiError, state::AppState};
use axum::{extract::FromRequestParts, http::request::Parts};
use database::services::user::UserService;
use log::debug;
use models::role::Role;
use tower_oauth2_resource_server::claims::DefaultClaims;
use uuid::Uuid;

/// Subject of a verified bearer token; the subject is the user's email
#[derive(Debug, Clone)]
pub struct Subject(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Subject {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DefaultClaims>()
            .and_then(|claims| claims.sub.clone())
            .map(Subject)
            .ok_or(ApiError::Unauthorized)
    }
}

/// Registered user making the request
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: Role,
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Subject(email) = Subject::from_request_parts(parts, state).await?;

        let user = UserService::find_by_email(&state.db, &email)
            .await?
            .ok_or_else(|| {
                debug!("Token subject {email} is not a registered user");
                ApiError::Unauthorized
            })?;

        Ok(Self {
            user_id: user.id,
            role: user.role,
        })
    }
}

/// Caller holding the administrator role
#[derive(Debug, Clone, Copy)]
pub struct Admin(pub Caller);

impl FromRequestParts<AppState> for Admin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = Caller::from_request_parts(parts, state).await?;

        if caller.role.is_admin() {
            Ok(Self(caller))
        } else {
            Err(ApiError::AdminOnly)
        }
    }
}
