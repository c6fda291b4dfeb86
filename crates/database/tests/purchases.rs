mod common;

use common::{approved_course, buyer, create_course, register, setup};
use database::{
    error::CatalogError,
    services::{purchase::PurchaseService, user::UserService},
};
use models::role::Role;
use uuid::Uuid;

#[tokio::test]
async fn test_only_approved_courses_can_be_bought() {
    let db = setup().await;
    let creator = register(&db, "creator@example.com").await;
    let user = register(&db, "u@example.com").await;
    let pending = create_course(&db, &creator, "Pending").await;

    let err = PurchaseService::record_purchase(&db, user.id, pending.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));

    let err = PurchaseService::record_purchase(&db, user.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn test_course_is_bought_once_per_user() {
    let db = setup().await;
    let (course, _) = approved_course(&db, "A").await;
    let user = buyer(&db, &course, "u@example.com").await;

    let err = PurchaseService::record_purchase(&db, user.id, course.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Conflict(_)));

    buyer(&db, &course, "other@example.com").await;
    assert_eq!(
        PurchaseService::count_purchases(&db, course.id)
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn test_ledger_queries() {
    let db = setup().await;
    let (bought, _) = approved_course(&db, "Bought").await;
    let (other, _) = approved_course(&db, "Other").await;
    let user = buyer(&db, &bought, "u@example.com").await;

    assert!(
        PurchaseService::has_purchased(&db, bought.id, user.id)
            .await
            .unwrap()
    );
    assert!(
        !PurchaseService::has_purchased(&db, other.id, user.id)
            .await
            .unwrap()
    );
    assert!(
        !PurchaseService::has_reviewed(&db, bought.id, user.id)
            .await
            .unwrap()
    );

    let courses = PurchaseService::user_purchased_courses(&db, user.id)
        .await
        .unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].content, bought.content);

    let course = PurchaseService::user_purchased_course(&db, user.id, bought.id)
        .await
        .unwrap();
    assert_eq!(course.id, bought.id);

    let err = PurchaseService::user_purchased_course(&db, user.id, other.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn test_user_directory() {
    let db = setup().await;
    let admin = UserService::register(&db, "admin@example.com", "Admin", Role::Admin)
        .await
        .unwrap();
    assert_eq!(admin.wallet, 0);
    assert!(admin.role.is_admin());

    let err = UserService::register(&db, "admin@example.com", "Again", Role::User)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Conflict(_)));

    let found = UserService::find_by_email(&db, "admin@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, admin.id);
    assert!(
        UserService::find_by_id(&db, Uuid::new_v4())
            .await
            .unwrap()
            .is_none()
    );

    let credited = UserService::credit_wallet(&db, admin.id, 50).await.unwrap();
    let credited = UserService::credit_wallet(&db, credited.id, 25).await.unwrap();
    assert_eq!(credited.wallet, 75);

    let err = UserService::credit_wallet(&db, Uuid::new_v4(), 50)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}
