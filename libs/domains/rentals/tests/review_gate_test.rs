//! End-to-end tests for the review eligibility gate over real PostgreSQL.
//!
//! Drives the booking and review services together through the canonical
//! scenario: book, conflict, complete, review, duplicate review.

use chrono::NaiveDate;
use domain_catalog::PgCatalog;
use domain_notifications::LogNotifier;
use domain_rentals::*;
use std::sync::Arc;
use test_utils::{TestDatabase, TestDataBuilder};
use uuid::Uuid;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
}

struct Harness {
    db: TestDatabase,
    bookings: BookingService<PgBookingRepository>,
    reviews: ReviewService<PgReviewRepository, PgBookingRepository>,
}

async fn harness() -> Harness {
    let db = TestDatabase::new().await;
    let catalog: Arc<dyn domain_catalog::CatalogLookup> =
        Arc::new(PgCatalog::new(db.connection()));
    let notifier = Arc::new(LogNotifier::new());

    let bookings = BookingService::new(
        PgBookingRepository::new(db.connection()),
        catalog.clone(),
        notifier,
    );
    let reviews = ReviewService::new(
        PgReviewRepository::new(db.connection()),
        PgBookingRepository::new(db.connection()),
        catalog,
    );

    Harness {
        db,
        bookings,
        reviews,
    }
}

async fn seed_pair(h: &Harness, builder: &TestDataBuilder) -> (Uuid, Uuid) {
    let user_id = h.db.create_test_user(builder.user_id()).await;
    let product_id = h.db.create_test_product(builder.product_id()).await;
    (user_id, product_id)
}

/// Book, complete, review: the full happy path plus its two canonical
/// failure branches (overlapping second booking, duplicate review).
#[tokio::test]
async fn test_booking_to_review_scenario() {
    let h = harness().await;
    let builder = TestDataBuilder::from_test_name("booking_to_review");
    let (user_id, product_id) = seed_pair(&h, &builder).await;

    // User books the product for [2025-10-05, 2025-10-10]
    let booking = h
        .bookings
        .create_booking(CreateBooking {
            user_id,
            product_id,
            start_date: date(5),
            end_date: date(10),
        })
        .await
        .unwrap();
    assert_eq!(booking.state, BookingState::Pending);

    // A second request over [2025-10-08, 2025-10-12] conflicts
    let second = h
        .bookings
        .create_booking(CreateBooking {
            user_id,
            product_id,
            start_date: date(8),
            end_date: date(12),
        })
        .await;
    assert!(matches!(second, Err(RentalError::RuleViolation(_))));

    // Reviewing before completion is rejected
    let premature = h
        .reviews
        .create_review(CreateReview {
            user_id,
            product_id,
            booking_id: booking.id,
            score: 5,
            comment: "great".to_string(),
        })
        .await;
    match premature {
        Err(RentalError::Validation(msg)) => {
            assert_eq!(msg, "only completed rentals may be reviewed")
        }
        other => panic!("expected Validation error, got {:?}", other),
    }

    // The rental completes
    h.bookings
        .update_booking(
            booking.id,
            UpdateBooking {
                state: Some(BookingState::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Now the review goes through
    let review = h
        .reviews
        .create_review(CreateReview {
            user_id,
            product_id,
            booking_id: booking.id,
            score: 5,
            comment: "great".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(review.score, 5);
    assert_eq!(review.booking_id, Some(booking.id));

    // A second review for the same pair is rejected
    let duplicate = h
        .reviews
        .create_review(CreateReview {
            user_id,
            product_id,
            booking_id: booking.id,
            score: 4,
            comment: "still great".to_string(),
        })
        .await;
    match duplicate {
        Err(RentalError::Validation(msg)) => {
            assert_eq!(msg, "product already reviewed by this user")
        }
        other => panic!("expected Validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_score_boundaries() {
    let h = harness().await;
    let builder = TestDataBuilder::from_test_name("score_boundaries");

    // Each score gets a fresh (user, product) pair since a pair may only
    // review once
    for (tag, score, ok) in [(1u8, 0, false), (2, 1, true), (3, 5, true), (4, 6, false)] {
        let user_id = h.db.create_test_user(builder.uuid_with_tag(tag)).await;
        let product_id = h
            .db
            .create_test_product(builder.uuid_with_tag(tag + 0x10))
            .await;

        let booking = h
            .bookings
            .create_booking(CreateBooking {
                user_id,
                product_id,
                start_date: date(5),
                end_date: date(10),
            })
            .await
            .unwrap();

        h.bookings
            .update_booking(
                booking.id,
                UpdateBooking {
                    state: Some(BookingState::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let result = h
            .reviews
            .create_review(CreateReview {
                user_id,
                product_id,
                booking_id: booking.id,
                score,
                comment: "boundary".to_string(),
            })
            .await;

        if ok {
            assert!(result.is_ok(), "score {} should be accepted", score);
        } else {
            assert!(
                matches!(result, Err(RentalError::Validation(_))),
                "score {} should be rejected",
                score
            );
        }
    }
}

#[tokio::test]
async fn test_review_against_unknown_booking() {
    let h = harness().await;
    let builder = TestDataBuilder::from_test_name("unknown_booking");
    let (user_id, product_id) = seed_pair(&h, &builder).await;

    let booking = h
        .bookings
        .create_booking(CreateBooking {
            user_id,
            product_id,
            start_date: date(5),
            end_date: date(10),
        })
        .await
        .unwrap();

    h.bookings
        .update_booking(
            booking.id,
            UpdateBooking {
                state: Some(BookingState::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Eligibility holds, but the referenced booking does not exist
    let result = h
        .reviews
        .create_review(CreateReview {
            user_id,
            product_id,
            booking_id: Uuid::new_v4(),
            score: 4,
            comment: "fine".to_string(),
        })
        .await;

    assert!(matches!(result, Err(RentalError::BookingNotFound(_))));
}

#[tokio::test]
async fn test_deleting_reviewed_booking_then_review_cleanup() {
    let h = harness().await;
    let builder = TestDataBuilder::from_test_name("delete_reviewed_booking");
    let (user_id, product_id) = seed_pair(&h, &builder).await;

    let booking = h
        .bookings
        .create_booking(CreateBooking {
            user_id,
            product_id,
            start_date: date(5),
            end_date: date(10),
        })
        .await
        .unwrap();

    h.bookings
        .update_booking(
            booking.id,
            UpdateBooking {
                state: Some(BookingState::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let review = h
        .reviews
        .create_review(CreateReview {
            user_id,
            product_id,
            booking_id: booking.id,
            score: 3,
            comment: "ok".to_string(),
        })
        .await
        .unwrap();

    // Deleting the booking detaches the review rather than orphaning it
    h.bookings.delete_booking(booking.id).await.unwrap();

    let detached = h.reviews.get_review(review.id).await.unwrap();
    assert_eq!(detached.booking_id, None);

    // And the review itself can still be deleted afterwards
    h.reviews.delete_review(review.id).await.unwrap();
    let gone = h.reviews.get_review(review.id).await;
    assert!(matches!(gone, Err(RentalError::ReviewNotFound(_))));
}
