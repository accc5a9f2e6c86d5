//! Integration tests for the resource catalog.
//!
//! Covers:
//! - Region search (substring, case, ordering, attached reviews)
//! - Resource submission and validation
//! - Recommendation counting under concurrency

mod common;

use common::{fixtures, TestHarness};
use directory_core::domains::resources::{
    create_resource, recommend_resource, search_resources, CreateResourceInput,
};
use directory_core::domains::reviews::{create_review, CreateReviewInput};
use test_context::test_context;

fn names(results: &[directory_core::domains::resources::ResourceData]) -> Vec<&str> {
    results.iter().map(|r| r.resource.name.as_str()).collect()
}

fn submission() -> CreateResourceInput {
    CreateResourceInput::builder()
        .name("Kisumu   Dental Care")
        .category("Dentist")
        .country("Kenya")
        .description("Check-ups, fillings and\n\nextractions")
        .region("Kisumu")
        .lat(-0.0917)
        .lon(34.768)
        .build()
}

// ============================================================================
// Search
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn search_orders_by_recommendations_then_name(ctx: &mut TestHarness) {
    fixtures::create_resource(&ctx.db_pool, "Zuri Clinic", "Nairobi", 5).await.unwrap();
    fixtures::create_resource(&ctx.db_pool, "Baraka Pharmacy", "Nairobi", 10).await.unwrap();
    fixtures::create_resource(&ctx.db_pool, "Amani Health", "Nairobi", 5).await.unwrap();

    let results = search_resources(None, &ctx.anonymous(), &ctx.deps).await.unwrap();

    assert_eq!(
        names(&results),
        vec!["Baraka Pharmacy", "Amani Health", "Zuri Clinic"]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn search_region_is_case_insensitive_substring(ctx: &mut TestHarness) {
    fixtures::create_resource(&ctx.db_pool, "Coast General", "Mombasa County", 0).await.unwrap();
    fixtures::create_resource(&ctx.db_pool, "Lakeside", "Kisumu", 0).await.unwrap();
    fixtures::create_resource(&ctx.db_pool, "Old Town Pharmacy", "mombasa", 0).await.unwrap();

    let results = search_resources(Some("MOMBA".to_string()), &ctx.anonymous(), &ctx.deps)
        .await
        .unwrap();

    let mut found = names(&results);
    found.sort();
    assert_eq!(found, vec!["Coast General", "Old Town Pharmacy"]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn search_without_region_returns_everything(ctx: &mut TestHarness) {
    fixtures::create_resource(&ctx.db_pool, "One", "Nakuru", 0).await.unwrap();
    fixtures::create_resource(&ctx.db_pool, "Two", "Eldoret", 0).await.unwrap();

    let all = search_resources(None, &ctx.anonymous(), &ctx.deps).await.unwrap();
    let empty = search_resources(Some(String::new()), &ctx.anonymous(), &ctx.deps)
        .await
        .unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(empty.len(), 2);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn search_region_of_spaces_is_a_substring_match(ctx: &mut TestHarness) {
    fixtures::create_resource(&ctx.db_pool, "Coast General", "Mombasa County", 0).await.unwrap();
    fixtures::create_resource(&ctx.db_pool, "Lakeside", "Kisumu", 0).await.unwrap();

    let results = search_resources(Some(" ".to_string()), &ctx.anonymous(), &ctx.deps)
        .await
        .unwrap();

    assert_eq!(names(&results), vec!["Coast General"]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn search_with_no_matches_is_empty(ctx: &mut TestHarness) {
    fixtures::create_resource(&ctx.db_pool, "One", "Nakuru", 0).await.unwrap();

    let results = search_resources(Some("Lagos".to_string()), &ctx.anonymous(), &ctx.deps)
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn search_attaches_reviews_newest_first(ctx: &mut TestHarness) {
    let with_reviews = fixtures::create_resource(&ctx.db_pool, "Reviewed", "Nairobi", 1)
        .await
        .unwrap();
    fixtures::create_resource(&ctx.db_pool, "Quiet", "Nairobi", 0).await.unwrap();
    let amara = fixtures::create_user(&ctx.db_pool, "amara").await.unwrap();
    let joao = fixtures::create_user(&ctx.db_pool, "joao").await.unwrap();

    fixtures::insert_review_at(&ctx.db_pool, with_reviews, &amara, "older", "2026-01-01T10:00:00Z")
        .await
        .unwrap();
    fixtures::insert_review_at(&ctx.db_pool, with_reviews, &joao, "newer", "2026-02-01T10:00:00Z")
        .await
        .unwrap();

    let results = search_resources(None, &ctx.anonymous(), &ctx.deps).await.unwrap();

    let reviewed = &results[0];
    assert_eq!(reviewed.resource.name, "Reviewed");
    assert_eq!(reviewed.review_count, 2);
    let bodies: Vec<&str> = reviewed.reviews.iter().map(|r| r.review.as_str()).collect();
    assert_eq!(bodies, vec!["newer", "older"]);
    assert_eq!(reviewed.reviews[0].username.as_deref(), Some("joao"));

    let quiet = &results[1];
    assert_eq!(quiet.review_count, 0);
    assert!(quiet.reviews.is_empty());
}

// ============================================================================
// Create
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn create_resource_normalizes_and_starts_at_zero(ctx: &mut TestHarness) {
    let user = fixtures::create_user(&ctx.db_pool, "amara").await.unwrap();

    let created = create_resource(submission(), &ctx.as_user(&user), &ctx.deps)
        .await
        .unwrap();

    assert_eq!(created.resource.name, "Kisumu Dental Care");
    assert_eq!(created.resource.description, "Check-ups, fillings and extractions");
    assert_eq!(created.resource.recommendation_count, 0);
    assert_eq!(created.review_count, 0);
    assert!(created.reviews.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn create_resource_with_lat_91_inserts_nothing(ctx: &mut TestHarness) {
    let user = fixtures::create_user(&ctx.db_pool, "amara").await.unwrap();
    let mut input = submission();
    input.lat = Some(91.0);

    let err = create_resource(input, &ctx.as_user(&user), &ctx.deps)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "invalid_input");
    assert_eq!(fixtures::resource_count(&ctx.db_pool).await.unwrap(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn create_resource_requires_identity(ctx: &mut TestHarness) {
    let err = create_resource(submission(), &ctx.anonymous(), &ctx.deps)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "unauthorized");
    assert_eq!(fixtures::resource_count(&ctx.db_pool).await.unwrap(), 0);
}

// ============================================================================
// Recommend
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn recommend_increments_by_one(ctx: &mut TestHarness) {
    let user = fixtures::create_user(&ctx.db_pool, "amara").await.unwrap();
    let id = fixtures::create_resource(&ctx.db_pool, "Amani", "Nairobi", 3).await.unwrap();

    let updated = recommend_resource(&id.to_string(), &ctx.as_user(&user), &ctx.deps)
        .await
        .unwrap();

    assert_eq!(updated.resource.id, id);
    assert_eq!(updated.resource.recommendation_count, 4);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn recommend_rejects_malformed_ids(ctx: &mut TestHarness) {
    let user = fixtures::create_user(&ctx.db_pool, "amara").await.unwrap();
    let state = ctx.as_user(&user);

    for raw in ["abc", "0", "-3", "1.5", ""] {
        let err = recommend_resource(raw, &state, &ctx.deps).await.unwrap_err();
        assert_eq!(err.kind(), "invalid_input", "{:?} should be invalid", raw);
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn recommend_unknown_id_is_not_found_and_creates_nothing(ctx: &mut TestHarness) {
    let user = fixtures::create_user(&ctx.db_pool, "amara").await.unwrap();

    let err = recommend_resource("999", &ctx.as_user(&user), &ctx.deps)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "not_found");
    assert_eq!(fixtures::resource_count(&ctx.db_pool).await.unwrap(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn recommend_requires_identity(ctx: &mut TestHarness) {
    let id = fixtures::create_resource(&ctx.db_pool, "Amani", "Nairobi", 0).await.unwrap();

    let err = recommend_resource(&id.to_string(), &ctx.anonymous(), &ctx.deps)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "unauthorized");
    assert_eq!(fixtures::stored_recommendations(&ctx.db_pool, id).await.unwrap(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_recommends_are_all_counted(ctx: &mut TestHarness) {
    const CALLS: usize = 20;

    let user = fixtures::create_user(&ctx.db_pool, "amara").await.unwrap();
    let id = fixtures::create_resource(&ctx.db_pool, "Amani", "Nairobi", 0).await.unwrap();

    let handles: Vec<_> = (0..CALLS)
        .map(|_| {
            let deps = ctx.deps.clone();
            let state = ctx.as_user(&user);
            let raw_id = id.to_string();
            tokio::spawn(async move { recommend_resource(&raw_id, &state, &deps).await })
        })
        .collect();

    for result in futures::future::join_all(handles).await {
        result.unwrap().unwrap();
    }

    assert_eq!(
        fixtures::stored_recommendations(&ctx.db_pool, id).await.unwrap(),
        CALLS as i64
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reviews_do_not_change_the_counter(ctx: &mut TestHarness) {
    let user = fixtures::create_user(&ctx.db_pool, "amara").await.unwrap();
    let id = fixtures::create_resource(&ctx.db_pool, "Amani", "Nairobi", 2).await.unwrap();

    create_review(
        CreateReviewInput::new(id.get(), "Helpful nurses"),
        &ctx.as_user(&user),
        &ctx.deps,
    )
    .await
    .unwrap();

    assert_eq!(fixtures::stored_recommendations(&ctx.db_pool, id).await.unwrap(), 2);
}
