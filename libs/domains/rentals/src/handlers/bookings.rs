use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    UuidPath, ValidatedJson,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

use crate::error::RentalResult;
use crate::models::{
    Booking, BookingFilter, CreateBooking, TransitionBooking, UpdateBooking,
};
use crate::repository::BookingRepository;
use crate::service::BookingService;

const TAG: &str = "bookings";

/// OpenAPI documentation for the bookings API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_bookings,
        create_booking,
        check_availability,
        get_booking,
        update_booking,
        delete_booking,
        transition_booking,
    ),
    components(
        schemas(
            Booking,
            CreateBooking,
            UpdateBooking,
            TransitionBooking,
            BookingFilter,
            AvailabilityResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Booking lifecycle endpoints")
    )
)]
pub struct BookingApiDoc;

/// Create the booking router with all HTTP endpoints
pub fn booking_router<R: BookingRepository + 'static>(service: BookingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/availability", get(check_availability))
        .route(
            "/{id}",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/{id}/transition", post(transition_booking))
        .with_state(shared_service)
}

/// List bookings with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(BookingFilter),
    responses(
        (status = 200, description = "List of bookings", body = Vec<Booking>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_bookings<R: BookingRepository + 'static>(
    State(service): State<Arc<BookingService<R>>>,
    Query(filter): Query<BookingFilter>,
) -> RentalResult<Json<Vec<Booking>>> {
    let bookings = service.list_bookings(filter).await?;
    Ok(Json(bookings))
}

/// Create a new booking
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created successfully", body = Booking),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_booking<R: BookingRepository + 'static>(
    State(service): State<Arc<BookingService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> RentalResult<impl IntoResponse> {
    let booking = service.create_booking(input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    pub product_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// Check whether a product is free for a date range
#[utoipa::path(
    get,
    path = "/availability",
    tag = TAG,
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability for the range", body = AvailabilityResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn check_availability<R: BookingRepository + 'static>(
    State(service): State<Arc<BookingService<R>>>,
    Query(query): Query<AvailabilityQuery>,
) -> RentalResult<Json<AvailabilityResponse>> {
    let available = service
        .check_availability(query.product_id, query.start_date, query.end_date)
        .await?;
    Ok(Json(AvailabilityResponse { available }))
}

/// Get a booking by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking found", body = Booking),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_booking<R: BookingRepository + 'static>(
    State(service): State<Arc<BookingService<R>>>,
    UuidPath(id): UuidPath,
) -> RentalResult<Json<Booking>> {
    let booking = service.get_booking(id).await?;
    Ok(Json(booking))
}

/// Update a booking
///
/// Overwrites dates and state; the new state is not checked against the
/// lifecycle graph. Use the transition endpoint for guarded changes.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = UpdateBooking,
    responses(
        (status = 200, description = "Booking updated successfully", body = Booking),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_booking<R: BookingRepository + 'static>(
    State(service): State<Arc<BookingService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateBooking>,
) -> RentalResult<Json<Booking>> {
    let booking = service.update_booking(id, input).await?;
    Ok(Json(booking))
}

/// Delete a booking
///
/// A linked review is detached (its booking reference nulled) before the
/// booking row is removed.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 204, description = "Booking deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_booking<R: BookingRepository + 'static>(
    State(service): State<Arc<BookingService<R>>>,
    UuidPath(id): UuidPath,
) -> RentalResult<impl IntoResponse> {
    service.delete_booking(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change a booking's state through the guarded lifecycle
#[utoipa::path(
    post,
    path = "/{id}/transition",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = TransitionBooking,
    responses(
        (status = 200, description = "Booking transitioned successfully", body = Booking),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn transition_booking<R: BookingRepository + 'static>(
    State(service): State<Arc<BookingService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<TransitionBooking>,
) -> RentalResult<Json<Booking>> {
    let booking = service.transition_booking(id, input.state).await?;
    Ok(Json(booking))
}
