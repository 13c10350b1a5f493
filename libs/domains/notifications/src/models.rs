//! Data models for the notifications domain.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payload for the booking confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// Recipient email address.
    pub to_email: String,
    /// Recipient name (for personalization).
    pub to_name: String,
    /// Name of the booked product.
    pub product_name: String,
    /// First day of the rental.
    pub start_date: NaiveDate,
    /// Last day of the rental.
    pub end_date: NaiveDate,
}
