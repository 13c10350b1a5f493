//! Date-range availability checking.
//!
//! A product is unavailable for a requested range when any existing booking
//! for it overlaps that range. Intervals are closed on both ends, so two
//! bookings that merely touch on a boundary day conflict. The conflict set
//! is every booking for the product regardless of lifecycle state;
//! cancelled and rejected bookings still block.

use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::RentalResult;
use crate::repository::BookingRepository;

/// Closed-interval overlap test: `[a_start, a_end]` and `[b_start, b_end]`
/// overlap iff `a_start <= b_end && b_start <= a_end`.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// Pure read-side availability queries over the booking store.
///
/// Callers are expected to have validated that the product exists; the
/// checker does not re-validate referential integrity.
pub struct AvailabilityChecker<R: BookingRepository> {
    repository: Arc<R>,
}

impl<R: BookingRepository> AvailabilityChecker<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Whether `[start_date, end_date]` is free of conflicting bookings for
    /// the product. No side effects.
    pub async fn is_available(
        &self,
        product_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RentalResult<bool> {
        let conflict = self
            .repository
            .exists_overlapping(product_id, start_date, end_date)
            .await?;
        Ok(!conflict)
    }
}
