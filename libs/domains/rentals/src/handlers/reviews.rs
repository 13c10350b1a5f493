use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::RentalResult;
use crate::models::{CreateReview, Review, ReviewFilter, UpdateReview};
use crate::repository::{BookingRepository, ReviewRepository};
use crate::service::ReviewService;

const TAG: &str = "reviews";

/// OpenAPI documentation for the reviews API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_reviews,
        create_review,
        get_review,
        update_review,
        delete_review,
    ),
    components(
        schemas(Review, CreateReview, UpdateReview, ReviewFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Post-rental review endpoints")
    )
)]
pub struct ReviewApiDoc;

/// Create the review router with all HTTP endpoints
pub fn review_router<R, B>(service: ReviewService<R, B>) -> Router
where
    R: ReviewRepository + 'static,
    B: BookingRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
        .with_state(shared_service)
}

/// List reviews with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ReviewFilter),
    responses(
        (status = 200, description = "List of reviews", body = Vec<Review>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_reviews<R, B>(
    State(service): State<Arc<ReviewService<R, B>>>,
    Query(filter): Query<ReviewFilter>,
) -> RentalResult<Json<Vec<Review>>>
where
    R: ReviewRepository + 'static,
    B: BookingRepository + 'static,
{
    let reviews = service.list_reviews(filter).await?;
    Ok(Json(reviews))
}

/// Create a new review
///
/// Requires a completed booking for the (user, product) pair and at most
/// one review per pair.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created successfully", body = Review),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_review<R, B>(
    State(service): State<Arc<ReviewService<R, B>>>,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> RentalResult<impl IntoResponse>
where
    R: ReviewRepository + 'static,
    B: BookingRepository + 'static,
{
    let review = service.create_review(input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Get a review by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review found", body = Review),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_review<R, B>(
    State(service): State<Arc<ReviewService<R, B>>>,
    UuidPath(id): UuidPath,
) -> RentalResult<Json<Review>>
where
    R: ReviewRepository + 'static,
    B: BookingRepository + 'static,
{
    let review = service.get_review(id).await?;
    Ok(Json(review))
}

/// Update a review
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    request_body = UpdateReview,
    responses(
        (status = 200, description = "Review updated successfully", body = Review),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_review<R, B>(
    State(service): State<Arc<ReviewService<R, B>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateReview>,
) -> RentalResult<Json<Review>>
where
    R: ReviewRepository + 'static,
    B: BookingRepository + 'static,
{
    let review = service.update_review(id, input).await?;
    Ok(Json(review))
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_review<R, B>(
    State(service): State<Arc<ReviewService<R, B>>>,
    UuidPath(id): UuidPath,
) -> RentalResult<impl IntoResponse>
where
    R: ReviewRepository + 'static,
    B: BookingRepository + 'static,
{
    service.delete_review(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
