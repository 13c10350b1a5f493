//! SeaORM entities for the rentals tables.

pub mod booking;
pub mod review;
