use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::availability::ranges_overlap;
use crate::error::{RentalError, RentalResult};
use crate::models::{
    Booking, BookingFilter, BookingState, CreateBooking, CreateReview, Review, ReviewFilter,
    UpdateBooking, UpdateReview,
};

/// Repository trait for Booking persistence
///
/// `create` owns the conflict check: the overlap test and the insert happen
/// atomically inside the implementation, so two concurrent requests for
/// overlapping ranges cannot both commit.
#[automock]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Create a new booking; fails with `RuleViolation` when an existing
    /// booking for the product overlaps the requested range
    async fn create(&self, input: CreateBooking) -> RentalResult<Booking>;

    /// Get a booking by ID
    async fn get_by_id(&self, id: Uuid) -> RentalResult<Option<Booking>>;

    /// List bookings with optional filters
    async fn list(&self, filter: BookingFilter) -> RentalResult<Vec<Booking>>;

    /// Overwrite dates and state of an existing booking
    async fn update(&self, id: Uuid, input: UpdateBooking) -> RentalResult<Booking>;

    /// Delete a booking by ID, detaching a linked review first
    async fn delete(&self, id: Uuid) -> RentalResult<bool>;

    /// Whether any booking for the product overlaps the closed range,
    /// regardless of the booking's lifecycle state
    async fn exists_overlapping(
        &self,
        product_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RentalResult<bool>;

    /// Whether the user has a completed booking for the product
    async fn exists_completed(&self, user_id: Uuid, product_id: Uuid) -> RentalResult<bool>;
}

/// Repository trait for Review persistence
///
/// Eligibility rules live in the review service; implementations only
/// persist.
#[automock]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a new review
    async fn create(&self, input: CreateReview) -> RentalResult<Review>;

    /// Get a review by ID
    async fn get_by_id(&self, id: Uuid) -> RentalResult<Option<Review>>;

    /// List reviews with optional filters
    async fn list(&self, filter: ReviewFilter) -> RentalResult<Vec<Review>>;

    /// Rewrite score, comment and user/product association
    async fn update(&self, id: Uuid, input: UpdateReview) -> RentalResult<Review>;

    /// Delete a review by ID
    async fn delete(&self, id: Uuid) -> RentalResult<bool>;

    /// Whether the user has already reviewed the product
    async fn exists_for_user_product(&self, user_id: Uuid, product_id: Uuid)
        -> RentalResult<bool>;

    /// The review linked to a booking, if any
    async fn find_by_booking(&self, booking_id: Uuid) -> RentalResult<Option<Review>>;
}

#[derive(Debug, Default)]
struct StoreInner {
    bookings: HashMap<Uuid, Booking>,
    reviews: HashMap<Uuid, Review>,
}

/// In-memory implementation of both repositories (for development/testing)
///
/// Bookings and reviews share one store behind a single lock so the
/// delete-detach sequence is atomic, matching the transactional Postgres
/// implementation.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRentalStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryRentalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryRentalStore {
    async fn create(&self, input: CreateBooking) -> RentalResult<Booking> {
        let mut inner = self.inner.write().await;

        // Conflict set is every booking for the product, whatever its state
        let conflict = inner.bookings.values().any(|b| {
            b.product_id == input.product_id
                && ranges_overlap(b.start_date, b.end_date, input.start_date, input.end_date)
        });

        if conflict {
            return Err(RentalError::RuleViolation(
                "product already booked for the requested range".to_string(),
            ));
        }

        let booking = Booking::new(input);
        inner.bookings.insert(booking.id, booking.clone());

        tracing::info!(booking_id = %booking.id, "Created booking");
        Ok(booking)
    }

    async fn get_by_id(&self, id: Uuid) -> RentalResult<Option<Booking>> {
        let inner = self.inner.read().await;
        Ok(inner.bookings.get(&id).cloned())
    }

    async fn list(&self, filter: BookingFilter) -> RentalResult<Vec<Booking>> {
        let inner = self.inner.read().await;

        let mut result: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| {
                if let Some(user_id) = filter.user_id {
                    if b.user_id != user_id {
                        return false;
                    }
                }
                if let Some(product_id) = filter.product_id {
                    if b.product_id != product_id {
                        return false;
                    }
                }
                if let Some(state) = filter.state {
                    if b.state != state {
                        return false;
                    }
                }
                match (filter.from, filter.to) {
                    (Some(from), Some(to)) => {
                        if !ranges_overlap(b.start_date, b.end_date, from, to) {
                            return false;
                        }
                    }
                    (Some(from), None) => {
                        if b.end_date < from {
                            return false;
                        }
                    }
                    (None, Some(to)) => {
                        if b.start_date > to {
                            return false;
                        }
                    }
                    (None, None) => {}
                }
                true
            })
            .cloned()
            .collect();

        // Sort by created_at descending (newest first)
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let result: Vec<Booking> = result
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateBooking) -> RentalResult<Booking> {
        let mut inner = self.inner.write().await;

        let booking = inner
            .bookings
            .get_mut(&id)
            .ok_or(RentalError::BookingNotFound(id))?;
        booking.apply_update(input);
        let updated = booking.clone();

        tracing::info!(booking_id = %id, state = %updated.state, "Updated booking");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> RentalResult<bool> {
        let mut inner = self.inner.write().await;

        if !inner.bookings.contains_key(&id) {
            return Ok(false);
        }

        // Null-then-delete: detach the review link before the row goes away
        for review in inner.reviews.values_mut() {
            if review.booking_id == Some(id) {
                review.booking_id = None;
            }
        }

        inner.bookings.remove(&id);

        tracing::info!(booking_id = %id, "Deleted booking");
        Ok(true)
    }

    async fn exists_overlapping(
        &self,
        product_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RentalResult<bool> {
        let inner = self.inner.read().await;
        let exists = inner.bookings.values().any(|b| {
            b.product_id == product_id
                && ranges_overlap(b.start_date, b.end_date, start_date, end_date)
        });
        Ok(exists)
    }

    async fn exists_completed(&self, user_id: Uuid, product_id: Uuid) -> RentalResult<bool> {
        let inner = self.inner.read().await;
        let exists = inner.bookings.values().any(|b| {
            b.user_id == user_id
                && b.product_id == product_id
                && b.state == BookingState::Completed
        });
        Ok(exists)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryRentalStore {
    async fn create(&self, input: CreateReview) -> RentalResult<Review> {
        let mut inner = self.inner.write().await;

        let review = Review::new(input);
        inner.reviews.insert(review.id, review.clone());

        tracing::info!(review_id = %review.id, "Created review");
        Ok(review)
    }

    async fn get_by_id(&self, id: Uuid) -> RentalResult<Option<Review>> {
        let inner = self.inner.read().await;
        Ok(inner.reviews.get(&id).cloned())
    }

    async fn list(&self, filter: ReviewFilter) -> RentalResult<Vec<Review>> {
        let inner = self.inner.read().await;

        let mut result: Vec<Review> = inner
            .reviews
            .values()
            .filter(|r| {
                if let Some(user_id) = filter.user_id {
                    if r.user_id != user_id {
                        return false;
                    }
                }
                if let Some(product_id) = filter.product_id {
                    if r.product_id != product_id {
                        return false;
                    }
                }
                if let Some(score) = filter.score {
                    if r.score != score {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateReview) -> RentalResult<Review> {
        let mut inner = self.inner.write().await;

        let review = inner
            .reviews
            .get_mut(&id)
            .ok_or(RentalError::ReviewNotFound(id))?;

        review.score = input.score;
        review.comment = input.comment;
        review.user_id = input.user_id;
        review.product_id = input.product_id;
        let updated = review.clone();

        tracing::info!(review_id = %id, "Updated review");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> RentalResult<bool> {
        let mut inner = self.inner.write().await;

        if inner.reviews.remove(&id).is_some() {
            tracing::info!(review_id = %id, "Deleted review");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_for_user_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> RentalResult<bool> {
        let inner = self.inner.read().await;
        let exists = inner
            .reviews
            .values()
            .any(|r| r.user_id == user_id && r.product_id == product_id);
        Ok(exists)
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> RentalResult<Option<Review>> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .values()
            .find(|r| r.booking_id == Some(booking_id))
            .cloned())
    }
}
