//! Rentals Domain
//!
//! The reservation lifecycle and availability engine: decides whether a
//! requested date range may be booked against a rentable product, tracks a
//! booking through its lifecycle states, and gates post-rental reviews on a
//! completed booking.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Services   │  ← Booking lifecycle, review eligibility
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! Collaborators: `domain_catalog` resolves user/product references,
//! `domain_notifications` delivers the booking confirmation (best-effort).
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_catalog::InMemoryCatalog;
//! use domain_notifications::LogNotifier;
//! use domain_rentals::{
//!     handlers,
//!     repository::InMemoryRentalStore,
//!     service::{BookingService, ReviewService},
//! };
//!
//! let store = InMemoryRentalStore::new();
//! let catalog = Arc::new(InMemoryCatalog::new());
//! let notifier = Arc::new(LogNotifier::new());
//!
//! let bookings = BookingService::new(store.clone(), catalog.clone(), notifier);
//! let reviews = ReviewService::new(store.clone(), store, catalog);
//!
//! let booking_router = handlers::booking_router(bookings);
//! let review_router = handlers::review_router(reviews);
//! ```

pub mod availability;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use availability::{ranges_overlap, AvailabilityChecker};
pub use error::{RentalError, RentalResult};
pub use models::{
    Booking, BookingFilter, BookingState, CreateBooking, CreateReview, Review, ReviewFilter,
    TransitionBooking, UpdateBooking, UpdateReview,
};
pub use postgres::{PgBookingRepository, PgReviewRepository};
pub use repository::{BookingRepository, InMemoryRentalStore, ReviewRepository};
pub use service::{BookingService, ReviewService};
