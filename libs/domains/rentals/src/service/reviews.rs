use domain_catalog::CatalogLookup;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{RentalError, RentalResult};
use crate::models::{CreateReview, Review, ReviewFilter, UpdateReview};
use crate::repository::{BookingRepository, ReviewRepository};

/// Maximum stored comment length, matching the reviews.comment column.
const MAX_COMMENT_CHARS: usize = 1000;

/// The review eligibility gate.
///
/// A review may only be created once a completed booking exists for the
/// (user, product) pair, and each pair may review at most once. The
/// precondition order is part of the contract: the first failing check
/// determines the error.
pub struct ReviewService<R: ReviewRepository, B: BookingRepository> {
    reviews: Arc<R>,
    bookings: Arc<B>,
    catalog: Arc<dyn CatalogLookup>,
}

impl<R: ReviewRepository, B: BookingRepository> Clone for ReviewService<R, B> {
    fn clone(&self) -> Self {
        Self {
            reviews: self.reviews.clone(),
            bookings: self.bookings.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

fn validate_score(score: i32) -> RentalResult<()> {
    if !(1..=5).contains(&score) {
        return Err(RentalError::Validation(
            "score must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

fn validate_comment(comment: &str) -> RentalResult<()> {
    if comment.trim().is_empty() {
        return Err(RentalError::Validation(
            "comment must not be empty".to_string(),
        ));
    }
    if comment.chars().count() > MAX_COMMENT_CHARS {
        return Err(RentalError::Validation(format!(
            "comment must be at most {} characters",
            MAX_COMMENT_CHARS
        )));
    }
    Ok(())
}

impl<R: ReviewRepository, B: BookingRepository> ReviewService<R, B> {
    pub fn new(reviews: R, bookings: B, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self {
            reviews: Arc::new(reviews),
            bookings: Arc::new(bookings),
            catalog,
        }
    }

    /// Create a review, checking eligibility in contract order:
    ///
    /// 1. score in [1, 5]
    /// 2. comment non-empty
    /// 3. a completed booking exists for the (user, product) pair
    /// 4. the pair has not reviewed yet
    /// 5. user, product and booking all resolve
    ///
    /// The completed-booking check accepts any completed booking for the
    /// pair, not specifically the supplied `booking_id`.
    pub async fn create_review(&self, input: CreateReview) -> RentalResult<Review> {
        validate_score(input.score)?;
        validate_comment(&input.comment)?;

        let completed = self
            .bookings
            .exists_completed(input.user_id, input.product_id)
            .await?;
        if !completed {
            return Err(RentalError::Validation(
                "only completed rentals may be reviewed".to_string(),
            ));
        }

        let already_reviewed = self
            .reviews
            .exists_for_user_product(input.user_id, input.product_id)
            .await?;
        if already_reviewed {
            return Err(RentalError::Validation(
                "product already reviewed by this user".to_string(),
            ));
        }

        if !self.catalog.user_exists(input.user_id).await? {
            return Err(RentalError::UserNotFound(input.user_id));
        }

        if !self.catalog.product_exists(input.product_id).await? {
            return Err(RentalError::ProductNotFound(input.product_id));
        }

        if self.bookings.get_by_id(input.booking_id).await?.is_none() {
            return Err(RentalError::BookingNotFound(input.booking_id));
        }

        self.reviews.create(input).await
    }

    /// Get a review by ID
    pub async fn get_review(&self, id: Uuid) -> RentalResult<Review> {
        self.reviews
            .get_by_id(id)
            .await?
            .ok_or(RentalError::ReviewNotFound(id))
    }

    /// List reviews with filters
    pub async fn list_reviews(&self, filter: ReviewFilter) -> RentalResult<Vec<Review>> {
        self.reviews.list(filter).await
    }

    /// All reviews of a product
    pub async fn list_by_product(&self, product_id: Uuid) -> RentalResult<Vec<Review>> {
        self.reviews
            .list(ReviewFilter {
                product_id: Some(product_id),
                ..Default::default()
            })
            .await
    }

    /// All reviews of a user
    pub async fn list_by_user(&self, user_id: Uuid) -> RentalResult<Vec<Review>> {
        self.reviews
            .list(ReviewFilter {
                user_id: Some(user_id),
                ..Default::default()
            })
            .await
    }

    /// Reviews of a product with a given score
    pub async fn list_by_product_and_score(
        &self,
        product_id: Uuid,
        score: i32,
    ) -> RentalResult<Vec<Review>> {
        self.reviews
            .list(ReviewFilter {
                product_id: Some(product_id),
                score: Some(score),
                ..Default::default()
            })
            .await
    }

    /// Rewrite score, comment and user/product association of a review.
    ///
    /// Score and comment are re-validated; eligibility is not re-checked.
    pub async fn update_review(&self, id: Uuid, input: UpdateReview) -> RentalResult<Review> {
        validate_score(input.score)?;
        validate_comment(&input.comment)?;

        // Resolve the review first, then its new associations
        self.get_review(id).await?;

        if !self.catalog.user_exists(input.user_id).await? {
            return Err(RentalError::UserNotFound(input.user_id));
        }

        if !self.catalog.product_exists(input.product_id).await? {
            return Err(RentalError::ProductNotFound(input.product_id));
        }

        self.reviews.update(id, input).await
    }

    /// Delete a review.
    ///
    /// The unique booking back-reference lives on the review row itself, so
    /// removing the row detaches the link in the same step.
    pub async fn delete_review(&self, id: Uuid) -> RentalResult<()> {
        let deleted = self.reviews.delete(id).await?;

        if !deleted {
            return Err(RentalError::ReviewNotFound(id));
        }

        Ok(())
    }
}
