//! Email template rendering engine.
//!
//! Handlebars-based rendering for outbound emails.

use handlebars::Handlebars;
use std::sync::Arc;

use crate::error::{NotificationError, NotificationResult};
use crate::models::BookingConfirmation;

/// Rendered email content.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    /// HTML body content.
    pub html: String,
    /// Plain text body content.
    pub text: String,
    /// Email subject line.
    pub subject: String,
}

/// Template engine for rendering email templates.
pub struct TemplateEngine {
    handlebars: Arc<Handlebars<'static>>,
}

impl TemplateEngine {
    /// Create a new template engine with all templates registered.
    pub fn new() -> NotificationResult<Self> {
        let mut handlebars = Handlebars::new();

        handlebars
            .register_template_string("booking_confirmation_html", BOOKING_CONFIRMATION_HTML)
            .map_err(|e| {
                NotificationError::TemplateError(format!(
                    "Failed to register booking_confirmation_html: {}",
                    e
                ))
            })?;
        handlebars
            .register_template_string("booking_confirmation_text", BOOKING_CONFIRMATION_TEXT)
            .map_err(|e| {
                NotificationError::TemplateError(format!(
                    "Failed to register booking_confirmation_text: {}",
                    e
                ))
            })?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    /// Render the booking confirmation email.
    pub fn render_booking_confirmation(
        &self,
        data: &BookingConfirmation,
    ) -> NotificationResult<RenderedEmail> {
        let html = self.handlebars.render("booking_confirmation_html", data)?;
        let text = self.handlebars.render("booking_confirmation_text", data)?;

        Ok(RenderedEmail {
            html,
            text,
            subject: format!("Your booking for {} is confirmed", data.product_name),
        })
    }
}

const BOOKING_CONFIRMATION_HTML: &str = r#"<!DOCTYPE html>
<html>
  <body style="font-family: sans-serif; color: #222;">
    <h2>Booking received</h2>
    <p>Hi {{to_name}},</p>
    <p>
      We have registered your booking for <strong>{{product_name}}</strong>
      from <strong>{{start_date}}</strong> to <strong>{{end_date}}</strong>.
    </p>
    <p>You will receive another message once the booking is confirmed.</p>
    <p>Thanks for renting with us!</p>
  </body>
</html>
"#;

const BOOKING_CONFIRMATION_TEXT: &str = r#"Hi {{to_name}},

We have registered your booking for {{product_name}} from {{start_date}} to {{end_date}}.

You will receive another message once the booking is confirmed.

Thanks for renting with us!
"#;
