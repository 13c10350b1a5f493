//! Notifications Domain
//!
//! Outbound notification delivery for the rentals engine. The engine calls
//! [`NotificationSink::notify_booking_created`] fire-and-forget: delivery
//! failures are logged by the caller and never affect the booking.
//!
//! # Implementations
//!
//! - [`SmtpNotifier`]: real delivery over SMTP (lettre), HTML body rendered
//!   with Handlebars
//! - [`LogNotifier`]: development implementation that logs the message
//!   instead of sending it

pub mod error;
pub mod models;
pub mod sink;
pub mod smtp;
pub mod templates;

pub use error::{NotificationError, NotificationResult};
pub use models::BookingConfirmation;
pub use sink::{LogNotifier, MockNotificationSink, NotificationSink};
pub use smtp::{SmtpConfig, SmtpNotifier};
pub use templates::TemplateEngine;
