use crate::state::AppState;
use utoipa_axum::router::OpenApiRouter;

pub mod admin;
pub mod course;
pub mod health;
pub mod purchase;
pub mod root;
pub mod user;

/// Routes reachable without a bearer token
pub fn public_router() -> OpenApiRouter<AppState> {
    root::router()
        .merge(health::router())
        .merge(course::public_router())
        .merge(purchase::public_router())
}

/// Routes that need a verified token; wrap them in the OAuth2 layer
pub fn protected_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(user::router())
        .merge(course::protected_router())
        .merge(purchase::protected_router())
        .merge(admin::router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::ApiDoc;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use database::{
        config::CatalogConfig,
        services::{course::CourseService, user::UserService},
    };
    use migration::{Migrator, MigratorTrait};
    use models::{course_input::CourseDraft, difficulty::Difficulty, role::Role};
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;
    use utoipa::OpenApi;

    async fn setup() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    fn app(db: DatabaseConnection) -> Router {
        let (router, _) = public_router().merge(protected_router()).split_for_parts();
        router.with_state(AppState {
            db,
            catalog: Arc::new(CatalogConfig::default()),
        })
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(app(setup().await), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn test_empty_catalog_is_not_found() {
        let (status, body) = get(app(setup().await), "/courses").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_protected_routes_need_claims() {
        let (status, body) = get(app(setup().await), "/users/me").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Authentication required.");
    }

    #[tokio::test]
    async fn test_public_course_detail_hides_content() {
        let db = setup().await;
        let creator = UserService::register(&db, "creator@example.com", "Creator", Role::User)
            .await
            .unwrap();
        let draft = CourseDraft {
            title: Some("Rust".to_string()),
            description: Some("Systems programming".to_string()),
            difficulty: Some(Difficulty::Intermediate),
            topic: Some("programming".to_string()),
            content: Some("Ownership and borrowing".to_string()),
        };
        let course = CourseService::create_course(&db, draft, creator.id)
            .await
            .unwrap();

        let (status, body) = get(app(db.clone()), &format!("/courses/{}", course.id)).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["title"], "Rust");
        assert!(body.get("content").is_none());
        assert_eq!(body["stars"], serde_json::json!([]));

        let (status, body) = get(app(db), &format!("/purchases/{}/count", course.id)).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["count"], 0);
    }

    #[test]
    fn test_openapi_document_lists_every_route() {
        let (_, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .merge(public_router())
            .merge(protected_router())
            .split_for_parts();

        let course = &api.paths.paths["/courses/{id}"];
        assert!(course.get.is_some());
        assert!(course.patch.is_some());
        assert!(course.delete.is_some());

        for path in [
            "/",
            "/health",
            "/courses",
            "/courses/search",
            "/courses/mine",
            "/courses/{id}/comments",
            "/courses/{id}/stars",
            "/users",
            "/users/me",
            "/purchases",
            "/purchases/{course_id}/count",
            "/purchases/courses",
            "/purchases/courses/{course_id}",
            "/admin/courses/unapproved",
            "/admin/courses/unapproved/{id}",
            "/admin/courses/{id}/approval",
            "/admin/courses/{id}",
        ] {
            assert!(api.paths.paths.contains_key(path), "missing {path}");
        }

        let components = api.components.unwrap();
        assert!(components.security_schemes.contains_key("jwt"));
    }
}
