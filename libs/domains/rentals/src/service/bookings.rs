use chrono::NaiveDate;
use domain_catalog::CatalogLookup;
use domain_notifications::{BookingConfirmation, NotificationSink};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::availability::AvailabilityChecker;
use crate::error::{RentalError, RentalResult};
use crate::models::{
    Booking, BookingFilter, BookingState, CreateBooking, UpdateBooking,
};
use crate::repository::BookingRepository;

/// The reservation lifecycle manager.
///
/// Owns creation, state transitions and deletion of bookings. Creation runs
/// the availability check and fires a best-effort confirmation through the
/// notification sink; sink failures are logged and never surfaced.
pub struct BookingService<R: BookingRepository> {
    repository: Arc<R>,
    catalog: Arc<dyn CatalogLookup>,
    notifier: Arc<dyn NotificationSink>,
}

impl<R: BookingRepository> Clone for BookingService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            catalog: self.catalog.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

fn validate_dates(start_date: NaiveDate, end_date: NaiveDate) -> RentalResult<()> {
    if end_date < start_date {
        return Err(RentalError::Validation(
            "end date must be on or after start date".to_string(),
        ));
    }
    Ok(())
}

impl<R: BookingRepository + 'static> BookingService<R> {
    pub fn new(
        repository: R,
        catalog: Arc<dyn CatalogLookup>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            catalog,
            notifier,
        }
    }

    /// Create a new booking in the `Pending` state.
    ///
    /// Fails with `Validation` on a reversed date range, `NotFound` when the
    /// product or user does not resolve, and `RuleViolation` when an
    /// existing booking for the product overlaps the requested range.
    pub async fn create_booking(&self, input: CreateBooking) -> RentalResult<Booking> {
        validate_dates(input.start_date, input.end_date)?;

        if !self.catalog.product_exists(input.product_id).await? {
            return Err(RentalError::ProductNotFound(input.product_id));
        }

        if !self.catalog.user_exists(input.user_id).await? {
            return Err(RentalError::UserNotFound(input.user_id));
        }

        // The repository runs the overlap check and the insert atomically
        let booking = self.repository.create(input).await?;

        // Best-effort confirmation; the booking stays committed regardless
        self.dispatch_confirmation(&booking).await;

        Ok(booking)
    }

    /// Whether `[start_date, end_date]` is free for the product. Pure read.
    pub async fn check_availability(
        &self,
        product_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RentalResult<bool> {
        validate_dates(start_date, end_date)?;

        AvailabilityChecker::new(self.repository.clone())
            .is_available(product_id, start_date, end_date)
            .await
    }

    /// Get a booking by ID
    pub async fn get_booking(&self, id: Uuid) -> RentalResult<Booking> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(RentalError::BookingNotFound(id))
    }

    /// List bookings with filters
    pub async fn list_bookings(&self, filter: BookingFilter) -> RentalResult<Vec<Booking>> {
        self.repository.list(filter).await
    }

    /// All bookings of a user
    pub async fn list_by_user(&self, user_id: Uuid) -> RentalResult<Vec<Booking>> {
        self.repository
            .list(BookingFilter {
                user_id: Some(user_id),
                ..Default::default()
            })
            .await
    }

    /// All bookings of a product
    pub async fn list_by_product(&self, product_id: Uuid) -> RentalResult<Vec<Booking>> {
        self.repository
            .list(BookingFilter {
                product_id: Some(product_id),
                ..Default::default()
            })
            .await
    }

    /// All bookings in a given state
    pub async fn list_by_state(&self, state: BookingState) -> RentalResult<Vec<Booking>> {
        self.repository
            .list(BookingFilter {
                state: Some(state),
                ..Default::default()
            })
            .await
    }

    /// Bookings of a user in a given state
    pub async fn list_by_user_and_state(
        &self,
        user_id: Uuid,
        state: BookingState,
    ) -> RentalResult<Vec<Booking>> {
        self.repository
            .list(BookingFilter {
                user_id: Some(user_id),
                state: Some(state),
                ..Default::default()
            })
            .await
    }

    /// Bookings of a product in a given state
    pub async fn list_by_product_and_state(
        &self,
        product_id: Uuid,
        state: BookingState,
    ) -> RentalResult<Vec<Booking>> {
        self.repository
            .list(BookingFilter {
                product_id: Some(product_id),
                state: Some(state),
                ..Default::default()
            })
            .await
    }

    /// Bookings whose date range overlaps the closed window `[from, to]`
    pub async fn list_overlapping_window(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RentalResult<Vec<Booking>> {
        validate_dates(from, to)?;

        self.repository
            .list(BookingFilter {
                from: Some(from),
                to: Some(to),
                ..Default::default()
            })
            .await
    }

    /// Overwrite dates and state of a booking.
    ///
    /// The date invariant is re-checked against the effective values; there
    /// is no availability re-check and no restriction on the new state.
    pub async fn update_booking(&self, id: Uuid, input: UpdateBooking) -> RentalResult<Booking> {
        let existing = self.get_booking(id).await?;

        let start_date = input.start_date.unwrap_or(existing.start_date);
        let end_date = input.end_date.unwrap_or(existing.end_date);
        validate_dates(start_date, end_date)?;

        self.repository.update(id, input).await
    }

    /// Guarded state change: rejects transitions that are not part of the
    /// strict lifecycle graph. Opt-in alternative to `update_booking`.
    pub async fn transition_booking(
        &self,
        id: Uuid,
        target: BookingState,
    ) -> RentalResult<Booking> {
        let existing = self.get_booking(id).await?;

        if !existing.state.can_transition_to(target) {
            return Err(RentalError::RuleViolation(format!(
                "illegal state transition: {} -> {}",
                existing.state, target
            )));
        }

        self.repository
            .update(
                id,
                UpdateBooking {
                    state: Some(target),
                    ..Default::default()
                },
            )
            .await
    }

    /// Delete a booking, detaching a linked review first
    pub async fn delete_booking(&self, id: Uuid) -> RentalResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(RentalError::BookingNotFound(id));
        }

        Ok(())
    }

    /// Resolve contact data and fire the confirmation without blocking the
    /// caller. Every failure path is logged and swallowed.
    async fn dispatch_confirmation(&self, booking: &Booking) {
        let contact = match self.catalog.user_contact(booking.user_id).await {
            Ok(Some(contact)) => contact,
            Ok(None) => {
                warn!(user_id = %booking.user_id, "No contact data for booking confirmation");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Failed to resolve user contact for booking confirmation");
                return;
            }
        };

        let product = match self.catalog.product_summary(booking.product_id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                warn!(product_id = %booking.product_id, "No product data for booking confirmation");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Failed to resolve product for booking confirmation");
                return;
            }
        };

        let confirmation = BookingConfirmation {
            to_email: contact.email,
            to_name: contact.name,
            product_name: product.name,
            start_date: booking.start_date,
            end_date: booking.end_date,
        };

        let notifier = self.notifier.clone();
        let booking_id = booking.id;
        tokio::spawn(async move {
            if let Err(e) = notifier.notify_booking_created(confirmation).await {
                warn!(booking_id = %booking_id, error = %e, "Failed to send booking confirmation");
            }
        });
    }
}
