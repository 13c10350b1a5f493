//! Handler tests for the rentals domain
//!
//! These verify request deserialization, response serialization, status
//! codes and error envelopes for the booking and review routers, using the
//! in-memory store (no containers needed).

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use domain_catalog::{InMemoryCatalog, ProductSummary, UserContact};
use domain_notifications::LogNotifier;
use domain_rentals::*;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
}

async fn seeded_catalog(user_id: Uuid, product_id: Uuid) -> InMemoryCatalog {
    let catalog = InMemoryCatalog::new();
    catalog
        .add_user(UserContact {
            id: user_id,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
        .await;
    catalog
        .add_product(ProductSummary {
            id: product_id,
            name: "Compact SUV".to_string(),
            rentable: true,
            total_units: 1,
        })
        .await;
    catalog
}

fn booking_app(store: InMemoryRentalStore, catalog: InMemoryCatalog) -> axum::Router {
    let service = BookingService::new(store, Arc::new(catalog), Arc::new(LogNotifier::new()));
    handlers::booking_router(service)
}

fn review_app(store: InMemoryRentalStore, catalog: InMemoryCatalog) -> axum::Router {
    let service = ReviewService::new(store.clone(), store, Arc::new(catalog));
    handlers::review_router(service)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_create_booking_returns_201() {
    let user_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let app = booking_app(
        InMemoryRentalStore::new(),
        seeded_catalog(user_id, product_id).await,
    );

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "user_id": user_id,
                "product_id": product_id,
                "start_date": "2025-10-05",
                "end_date": "2025-10-10"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let booking: Booking = json_body(response.into_body()).await;
    assert_eq!(booking.state, BookingState::Pending);
    assert_eq!(booking.start_date, date(5));
}

#[tokio::test]
async fn test_create_booking_reversed_dates_returns_400() {
    let user_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let app = booking_app(
        InMemoryRentalStore::new(),
        seeded_catalog(user_id, product_id).await,
    );

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "user_id": user_id,
                "product_id": product_id,
                "start_date": "2025-10-10",
                "end_date": "2025-10-05"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_booking_unknown_product_returns_404() {
    let user_id = Uuid::new_v4();
    let app = booking_app(
        InMemoryRentalStore::new(),
        seeded_catalog(user_id, Uuid::new_v4()).await,
    );

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "user_id": user_id,
                "product_id": Uuid::new_v4(),
                "start_date": "2025-10-05",
                "end_date": "2025-10-10"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overlapping_booking_returns_409() {
    let user_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let store = InMemoryRentalStore::new();
    let catalog = seeded_catalog(user_id, product_id).await;

    let payload = json!({
        "user_id": user_id,
        "product_id": product_id,
        "start_date": "2025-10-05",
        "end_date": "2025-10-10"
    });

    let app = booking_app(store.clone(), catalog.clone());
    let first = app.oneshot(post_json("/", payload.clone())).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let app = booking_app(store, catalog);
    let second = app.oneshot(post_json("/", payload)).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_availability_endpoint() {
    let user_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let store = InMemoryRentalStore::new();
    let catalog = seeded_catalog(user_id, product_id).await;

    let app = booking_app(store.clone(), catalog.clone());
    let free = app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/availability?product_id={}&start_date=2025-10-05&end_date=2025-10-10",
                    product_id
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(free.status(), StatusCode::OK);
    let body: serde_json::Value = json_body(free.into_body()).await;
    assert_eq!(body["available"], json!(true));

    let app = booking_app(store.clone(), catalog.clone());
    app.oneshot(post_json(
        "/",
        json!({
            "user_id": user_id,
            "product_id": product_id,
            "start_date": "2025-10-05",
            "end_date": "2025-10-10"
        }),
    ))
    .await
    .unwrap();

    let app = booking_app(store, catalog);
    let taken = app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/availability?product_id={}&start_date=2025-10-08&end_date=2025-10-12",
                    product_id
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body: serde_json::Value = json_body(taken.into_body()).await;
    assert_eq!(body["available"], json!(false));
}

#[tokio::test]
async fn test_get_missing_booking_returns_404() {
    let app = booking_app(
        InMemoryRentalStore::new(),
        InMemoryCatalog::new(),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_uuid_path_returns_400() {
    let app = booking_app(InMemoryRentalStore::new(), InMemoryCatalog::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_booking_returns_204() {
    let user_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let store = InMemoryRentalStore::new();
    let catalog = seeded_catalog(user_id, product_id).await;

    let app = booking_app(store.clone(), catalog.clone());
    let created = app
        .oneshot(post_json(
            "/",
            json!({
                "user_id": user_id,
                "product_id": product_id,
                "start_date": "2025-10-05",
                "end_date": "2025-10-10"
            }),
        ))
        .await
        .unwrap();
    let booking: Booking = json_body(created.into_body()).await;

    let app = booking_app(store, catalog);
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", booking.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_guarded_transition_rejects_jump() {
    let user_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let store = InMemoryRentalStore::new();
    let catalog = seeded_catalog(user_id, product_id).await;

    let app = booking_app(store.clone(), catalog.clone());
    let created = app
        .oneshot(post_json(
            "/",
            json!({
                "user_id": user_id,
                "product_id": product_id,
                "start_date": "2025-10-05",
                "end_date": "2025-10-10"
            }),
        ))
        .await
        .unwrap();
    let booking: Booking = json_body(created.into_body()).await;

    // Pending -> Completed is not a legal guarded transition
    let app = booking_app(store, catalog);
    let response = app
        .oneshot(post_json(
            &format!("/{}/transition", booking.id),
            json!({"state": "completed"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_review_without_completed_rental_returns_400() {
    let user_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let store = InMemoryRentalStore::new();
    let catalog = seeded_catalog(user_id, product_id).await;

    let app = review_app(store, catalog);
    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "user_id": user_id,
                "product_id": product_id,
                "booking_id": Uuid::new_v4(),
                "score": 5,
                "comment": "great"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_happy_path_returns_201() {
    let user_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let store = InMemoryRentalStore::new();
    let catalog = seeded_catalog(user_id, product_id).await;

    // Book and complete through the repositories directly
    let booking = BookingRepository::create(
        &store,
        CreateBooking {
            user_id,
            product_id,
            start_date: date(5),
            end_date: date(10),
        },
    )
    .await
    .unwrap();
    BookingRepository::update(
        &store,
        booking.id,
        UpdateBooking {
            state: Some(BookingState::Completed),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let app = review_app(store, catalog);
    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "user_id": user_id,
                "product_id": product_id,
                "booking_id": booking.id,
                "score": 5,
                "comment": "great"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let review: Review = json_body(response.into_body()).await;
    assert_eq!(review.score, 5);
    assert_eq!(review.booking_id, Some(booking.id));
}
