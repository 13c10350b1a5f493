//! Integration tests for the booking lifecycle against real PostgreSQL.
//!
//! Uses testcontainers to verify that the Postgres repositories enforce the
//! availability rule, the date-window queries, and the delete-detach policy
//! with real constraints and transactions in play.

use chrono::NaiveDate;
use domain_rentals::*;
use test_utils::{assertions::*, TestDatabase, TestDataBuilder};
use uuid::Uuid;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
}

async fn seed_user_and_product(db: &TestDatabase, builder: &TestDataBuilder) -> (Uuid, Uuid) {
    let user_id = db.create_test_user(builder.user_id()).await;
    let product_id = db.create_test_product(builder.product_id()).await;
    (user_id, product_id)
}

#[tokio::test]
async fn test_create_and_get_booking() {
    let db = TestDatabase::new().await;
    let repo = PgBookingRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get_booking");
    let (user_id, product_id) = seed_user_and_product(&db, &builder).await;

    let created = repo
        .create(CreateBooking {
            user_id,
            product_id,
            start_date: date(5),
            end_date: date(10),
        })
        .await
        .unwrap();

    assert_eq!(created.state, BookingState::Pending);
    assert_uuid_eq(created.user_id, user_id, "user_id");

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "booking should exist");
    assert_uuid_eq(retrieved.id, created.id, "retrieved booking id");
    assert_eq!(retrieved.start_date, date(5));
}

#[tokio::test]
async fn test_booked_range_is_no_longer_available() {
    let db = TestDatabase::new().await;
    let repo = PgBookingRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("booked_range_unavailable");
    let (user_id, product_id) = seed_user_and_product(&db, &builder).await;

    assert!(!repo
        .exists_overlapping(product_id, date(5), date(10))
        .await
        .unwrap());

    repo.create(CreateBooking {
        user_id,
        product_id,
        start_date: date(5),
        end_date: date(10),
    })
    .await
    .unwrap();

    assert!(repo
        .exists_overlapping(product_id, date(5), date(10))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_overlapping_booking_conflicts() {
    let db = TestDatabase::new().await;
    let repo = PgBookingRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("overlapping_conflict");
    let (user_id, product_id) = seed_user_and_product(&db, &builder).await;

    repo.create(CreateBooking {
        user_id,
        product_id,
        start_date: date(5),
        end_date: date(10),
    })
    .await
    .unwrap();

    // Overlaps on 10-08..10-10
    let result = repo
        .create(CreateBooking {
            user_id,
            product_id,
            start_date: date(8),
            end_date: date(12),
        })
        .await;

    assert!(
        matches!(result, Err(RentalError::RuleViolation(_))),
        "Expected RuleViolation, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_touching_boundary_conflicts() {
    let db = TestDatabase::new().await;
    let repo = PgBookingRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("touching_boundary");
    let (user_id, product_id) = seed_user_and_product(&db, &builder).await;

    repo.create(CreateBooking {
        user_id,
        product_id,
        start_date: date(5),
        end_date: date(10),
    })
    .await
    .unwrap();

    // Starts exactly on the previous end date; closed intervals conflict
    let result = repo
        .create(CreateBooking {
            user_id,
            product_id,
            start_date: date(10),
            end_date: date(14),
        })
        .await;

    assert!(matches!(result, Err(RentalError::RuleViolation(_))));

    // The day after is free
    let result = repo
        .create(CreateBooking {
            user_id,
            product_id,
            start_date: date(11),
            end_date: date(14),
        })
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cancelled_booking_still_blocks() {
    let db = TestDatabase::new().await;
    let repo = PgBookingRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("cancelled_still_blocks");
    let (user_id, product_id) = seed_user_and_product(&db, &builder).await;

    let booking = repo
        .create(CreateBooking {
            user_id,
            product_id,
            start_date: date(5),
            end_date: date(10),
        })
        .await
        .unwrap();

    repo.update(
        booking.id,
        UpdateBooking {
            state: Some(BookingState::Cancelled),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // The conflict set does not exclude terminal states
    let result = repo
        .create(CreateBooking {
            user_id,
            product_id,
            start_date: date(6),
            end_date: date(8),
        })
        .await;

    assert!(matches!(result, Err(RentalError::RuleViolation(_))));
}

#[tokio::test]
async fn test_update_overwrites_dates_and_state() {
    let db = TestDatabase::new().await;
    let repo = PgBookingRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_overwrites");
    let (user_id, product_id) = seed_user_and_product(&db, &builder).await;

    let booking = repo
        .create(CreateBooking {
            user_id,
            product_id,
            start_date: date(5),
            end_date: date(10),
        })
        .await
        .unwrap();

    let input = UpdateBooking {
        start_date: Some(date(6)),
        end_date: Some(date(12)),
        state: Some(BookingState::Confirmed),
    };

    let updated = repo.update(booking.id, input.clone()).await.unwrap();
    assert_eq!(updated.start_date, date(6));
    assert_eq!(updated.end_date, date(12));
    assert_eq!(updated.state, BookingState::Confirmed);
    assert_eq!(updated.created_at, booking.created_at);

    // Same input twice yields the same final state
    let again = repo.update(booking.id, input).await.unwrap();
    assert_eq!(again.start_date, updated.start_date);
    assert_eq!(again.end_date, updated.end_date);
    assert_eq!(again.state, updated.state);
}

#[tokio::test]
async fn test_update_missing_booking_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgBookingRepository::new(db.connection());

    let result = repo
        .update(
            Uuid::new_v4(),
            UpdateBooking {
                state: Some(BookingState::Confirmed),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(RentalError::BookingNotFound(_))));
}

#[tokio::test]
async fn test_delete_booking_detaches_review() {
    let db = TestDatabase::new().await;
    let bookings = PgBookingRepository::new(db.connection());
    let reviews = PgReviewRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete_detaches_review");
    let (user_id, product_id) = seed_user_and_product(&db, &builder).await;

    let booking = bookings
        .create(CreateBooking {
            user_id,
            product_id,
            start_date: date(5),
            end_date: date(10),
        })
        .await
        .unwrap();

    bookings
        .update(
            booking.id,
            UpdateBooking {
                state: Some(BookingState::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let review = reviews
        .create(CreateReview {
            user_id,
            product_id,
            booking_id: booking.id,
            score: 5,
            comment: "great".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(review.booking_id, Some(booking.id));

    let linked = reviews.find_by_booking(booking.id).await.unwrap();
    assert!(linked.is_some());

    let deleted = bookings.delete(booking.id).await.unwrap();
    assert!(deleted);

    let unlinked = reviews.find_by_booking(booking.id).await.unwrap();
    assert!(unlinked.is_none());

    // No orphaned reference: the review survives with the link nulled
    let detached = reviews.get_by_id(review.id).await.unwrap();
    let detached = assert_some(detached, "review should survive booking deletion");
    assert_eq!(detached.booking_id, None);
}

#[tokio::test]
async fn test_delete_missing_booking_returns_false() {
    let db = TestDatabase::new().await;
    let repo = PgBookingRepository::new(db.connection());

    let deleted = repo.delete(Uuid::new_v4()).await.unwrap();
    assert!(!deleted);
}

#[tokio::test]
async fn test_list_filters() {
    let db = TestDatabase::new().await;
    let repo = PgBookingRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_filters");
    let (user_id, product_id) = seed_user_and_product(&db, &builder).await;
    let other_user = db.create_test_user(builder.uuid_with_tag(0x03)).await;

    let first = repo
        .create(CreateBooking {
            user_id,
            product_id,
            start_date: date(1),
            end_date: date(3),
        })
        .await
        .unwrap();

    repo.create(CreateBooking {
        user_id: other_user,
        product_id,
        start_date: date(20),
        end_date: date(22),
    })
    .await
    .unwrap();

    repo.update(
        first.id,
        UpdateBooking {
            state: Some(BookingState::Completed),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // By user
    let mine = repo
        .list(BookingFilter {
            user_id: Some(user_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_uuid_eq(mine[0].id, first.id, "user filter");

    // By (user, state)
    let completed = repo
        .list(BookingFilter {
            user_id: Some(user_id),
            state: Some(BookingState::Completed),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);

    // By window overlap: [10-02 .. 10-05] only touches the first booking
    let windowed = repo
        .list(BookingFilter {
            from: Some(date(2)),
            to: Some(date(5)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(windowed.len(), 1);
    assert_uuid_eq(windowed[0].id, first.id, "window filter");

    // By (product, state)
    let pending = repo
        .list(BookingFilter {
            product_id: Some(product_id),
            state: Some(BookingState::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
}

#[tokio::test]
async fn test_exists_completed_tracks_state() {
    let db = TestDatabase::new().await;
    let repo = PgBookingRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("exists_completed");
    let (user_id, product_id) = seed_user_and_product(&db, &builder).await;

    let booking = repo
        .create(CreateBooking {
            user_id,
            product_id,
            start_date: date(5),
            end_date: date(10),
        })
        .await
        .unwrap();

    assert!(!repo.exists_completed(user_id, product_id).await.unwrap());

    repo.update(
        booking.id,
        UpdateBooking {
            state: Some(BookingState::Completed),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(repo.exists_completed(user_id, product_id).await.unwrap());
}
