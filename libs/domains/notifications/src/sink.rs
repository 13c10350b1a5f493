//! The notification sink contract and the development implementation.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::error::NotificationResult;
use crate::models::BookingConfirmation;

/// Outbound notification delivery.
///
/// Callers treat every method as best-effort: a failed send is logged and
/// swallowed on their side, never surfaced to the end user.
#[automock]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a booking confirmation to the booking owner.
    async fn notify_booking_created(
        &self,
        confirmation: BookingConfirmation,
    ) -> NotificationResult<()>;
}

/// Logs notifications instead of sending them.
///
/// Used in development and tests where no SMTP server is available.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for LogNotifier {
    async fn notify_booking_created(
        &self,
        confirmation: BookingConfirmation,
    ) -> NotificationResult<()> {
        info!(
            to = %confirmation.to_email,
            user = %confirmation.to_name,
            product = %confirmation.product_name,
            start = %confirmation.start_date,
            end = %confirmation.end_date,
            "[DEV EMAIL] booking confirmation"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        let notifier = LogNotifier::new();
        let result = notifier
            .notify_booking_created(BookingConfirmation {
                to_email: "user@example.com".to_string(),
                to_name: "User".to_string(),
                product_name: "Compact SUV".to_string(),
                start_date: NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 10, 10).unwrap(),
            })
            .await;
        assert!(result.is_ok());
    }
}
