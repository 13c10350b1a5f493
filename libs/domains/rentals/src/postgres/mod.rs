//! Postgres-backed repositories.

mod bookings;
mod reviews;

pub use bookings::PgBookingRepository;
pub use reviews::PgReviewRepository;
