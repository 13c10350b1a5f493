//! HTTP endpoints for the rentals engine.
//!
//! Authorization happens upstream of these routers; handlers assume the
//! caller is already permitted.

mod bookings;
mod reviews;

pub use bookings::{booking_router, BookingApiDoc};
pub use reviews::{review_router, ReviewApiDoc};
