mod common;

use common::{approved_course, buyer, register, setup};
use database::{
    error::CatalogError,
    services::{
        course::{CourseComment, CourseService},
        purchase::PurchaseService,
        review::ReviewService,
    },
};
use uuid::Uuid;

#[tokio::test]
async fn test_purchase_comment_and_first_rating() {
    let db = setup().await;
    let (course, _) = approved_course(&db, "A").await;
    let user = buyer(&db, &course, "u@example.com").await;

    let detail = ReviewService::add_comment(&db, course.id, user.id, "nice")
        .await
        .unwrap();
    assert_eq!(
        detail.comments,
        vec![CourseComment {
            user_id: user.id,
            value: "nice".to_string(),
        }]
    );

    let err = ReviewService::add_comment(&db, course.id, user.id, "nice again")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::BadRequest(_)));

    let detail = ReviewService::rate_course(&db, course.id, user.id, 5)
        .await
        .unwrap();
    assert_eq!(detail.stars, vec![5]);
    assert_eq!(detail.rating, Some(4.8));
    assert_eq!(detail.price, Some(200));
    assert!(
        PurchaseService::has_reviewed(&db, course.id, user.id)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_second_rating_is_rejected() {
    let db = setup().await;
    let (course, _) = approved_course(&db, "A").await;
    let user = buyer(&db, &course, "u@example.com").await;

    ReviewService::rate_course(&db, course.id, user.id, 3)
        .await
        .unwrap();
    let err = ReviewService::rate_course(&db, course.id, user.id, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::BadRequest(_)));

    let detail = CourseService::find_course_detail(&db, course.id)
        .await
        .unwrap();
    assert_eq!(detail.stars, vec![3]);
}

#[tokio::test]
async fn test_reviews_require_own_purchase() {
    let db = setup().await;
    let (course, _) = approved_course(&db, "A").await;
    // Someone else bought it; that must not let a stranger in
    buyer(&db, &course, "buyer@example.com").await;
    let stranger = register(&db, "stranger@example.com").await;

    let err = ReviewService::add_comment(&db, course.id, stranger.id, "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Forbidden(_)));

    let err = ReviewService::rate_course(&db, course.id, stranger.id, 5)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Forbidden(_)));

    let detail = CourseService::find_course_detail(&db, course.id)
        .await
        .unwrap();
    assert!(detail.comments.is_empty());
    assert!(detail.stars.is_empty());
    assert_eq!(detail.rating, None);
}

#[tokio::test]
async fn test_reviews_of_missing_course() {
    let db = setup().await;
    let user = register(&db, "u@example.com").await;

    let err = ReviewService::add_comment(&db, Uuid::new_v4(), user.id, "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));

    let err = ReviewService::rate_course(&db, Uuid::new_v4(), user.id, 4)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn test_invalid_review_input() {
    let db = setup().await;
    let (course, _) = approved_course(&db, "A").await;
    let user = buyer(&db, &course, "u@example.com").await;

    for stars in [0, 6, -1] {
        let err = ReviewService::rate_course(&db, course.id, user.id, stars)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ValidationFailed(_)));
    }

    let err = ReviewService::add_comment(&db, course.id, user.id, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ValidationFailed(_)));

    // Rejected input does not use up the user's one rating
    ReviewService::rate_course(&db, course.id, user.id, 4)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_fifth_rating_moves_the_score() {
    let db = setup().await;
    let (course, _) = approved_course(&db, "A").await;

    for (idx, stars) in [5, 5, 5, 5].into_iter().enumerate() {
        let user = buyer(&db, &course, &format!("early{idx}@example.com")).await;
        let detail = ReviewService::rate_course(&db, course.id, user.id, stars)
            .await
            .unwrap();
        assert_eq!(detail.rating, Some(4.8));
        assert_eq!(detail.price, Some(200));
    }

    let late = buyer(&db, &course, "late@example.com").await;
    let detail = ReviewService::rate_course(&db, course.id, late.id, 1)
        .await
        .unwrap();
    assert_eq!(detail.stars, vec![5, 5, 5, 5, 1]);
    assert_eq!(detail.rating, Some(4.0));
    assert_eq!(detail.price, Some(200));
}

#[tokio::test]
async fn test_low_ratings_drop_the_price() {
    let db = setup().await;
    let (course, _) = approved_course(&db, "A").await;

    let mut detail = None;
    for idx in 0..8 {
        let user = buyer(&db, &course, &format!("critic{idx}@example.com")).await;
        detail = Some(
            ReviewService::rate_course(&db, course.id, user.id, 1)
                .await
                .unwrap(),
        );
    }

    let detail = detail.unwrap();
    assert_eq!(detail.stars.len(), 8);
    assert_eq!(detail.rating, Some(2.9));
    assert_eq!(detail.price, Some(100));

    let listing = CourseService::list_approved(&db).await.unwrap();
    assert_eq!(listing[0].price, Some(100));
}

#[tokio::test]
async fn test_recalculation_is_consistent_with_stored_stars() {
    let db = setup().await;
    let (course, _) = approved_course(&db, "A").await;

    let recalculated = ReviewService::recalculate_rating(&db, course.id)
        .await
        .unwrap();
    assert_eq!(recalculated.rating, Some(0.0));
    assert_eq!(recalculated.price, Some(100));

    let user = buyer(&db, &course, "u@example.com").await;
    ReviewService::rate_course(&db, course.id, user.id, 2)
        .await
        .unwrap();

    let recalculated = ReviewService::recalculate_rating(&db, course.id)
        .await
        .unwrap();
    assert_eq!(recalculated.rating, Some(4.8));
    assert_eq!(recalculated.price, Some(200));
}

#[tokio::test]
async fn test_comments_keep_submission_order() {
    let db = setup().await;
    let (course, _) = approved_course(&db, "A").await;
    let first = buyer(&db, &course, "first@example.com").await;
    let second = buyer(&db, &course, "second@example.com").await;

    ReviewService::add_comment(&db, course.id, first.id, "one")
        .await
        .unwrap();
    let detail = ReviewService::add_comment(&db, course.id, second.id, "two")
        .await
        .unwrap();

    let values: Vec<_> = detail.comments.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, vec!["one", "two"]);
}
