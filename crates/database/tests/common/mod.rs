#![allow(dead_code)]

use database::{
    config::CatalogConfig,
    entities::{courses, users},
    services::{course::CourseService, purchase::PurchaseService, user::UserService},
};
use migration::{Migrator, MigratorTrait};
use models::{course_input::CourseDraft, difficulty::Difficulty, role::Role};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory database with the full schema
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // Every pooled connection would otherwise get its own empty database
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn register(db: &DatabaseConnection, email: &str) -> users::Model {
    UserService::register(db, email, email, Role::User)
        .await
        .unwrap()
}

pub fn draft(title: &str, description: &str, content: &str) -> CourseDraft {
    CourseDraft {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        difficulty: Some(Difficulty::Beginner),
        topic: Some("programming".to_string()),
        content: Some(content.to_string()),
    }
}

pub async fn create_course(
    db: &DatabaseConnection,
    creator: &users::Model,
    name: &str,
) -> courses::Model {
    let draft = draft(
        name,
        &format!("{name} description"),
        &format!("{name} content"),
    );
    CourseService::create_course(db, draft, creator.id)
        .await
        .unwrap()
}

pub async fn approve(db: &DatabaseConnection, course: &courses::Model) -> courses::Model {
    CourseService::update_approval(db, &CatalogConfig::default(), course.id, true)
        .await
        .unwrap()
        .course
}

/// An approved course with its creator
pub async fn approved_course(
    db: &DatabaseConnection,
    name: &str,
) -> (courses::Model, users::Model) {
    let creator = register(db, &format!("creator-of-{name}@example.com")).await;
    let course = create_course(db, &creator, name).await;
    (approve(db, &course).await, creator)
}

/// Registers a user who bought the course
pub async fn buyer(
    db: &DatabaseConnection,
    course: &courses::Model,
    email: &str,
) -> users::Model {
    let user = register(db, email).await;
    PurchaseService::record_purchase(db, user.id, course.id)
        .await
        .unwrap();
    user
}
