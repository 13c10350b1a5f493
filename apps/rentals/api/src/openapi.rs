use domain_rentals::handlers::{BookingApiDoc, ReviewApiDoc};
use utoipa::OpenApi;

/// Combined OpenAPI documentation for the rentals API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rentals API",
        description = "Booking lifecycle, availability and review endpoints for rentable items"
    ),
    nest(
        (path = "/api/v1/bookings", api = BookingApiDoc),
        (path = "/api/v1/reviews", api = ReviewApiDoc)
    )
)]
pub struct ApiDoc;
