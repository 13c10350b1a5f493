use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{RentalError, RentalResult},
    models::{CreateReview, Review, ReviewFilter, UpdateReview},
    repository::ReviewRepository,
};

pub struct PgReviewRepository {
    base: BaseRepository<entity::review::Entity>,
}

impl PgReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn internal(e: impl std::fmt::Display) -> RentalError {
    RentalError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(&self, input: CreateReview) -> RentalResult<Review> {
        let review = Review::new(input);
        let active_model: entity::review::ActiveModel = review.into();

        let model = self.base.insert(active_model).await.map_err(internal)?;

        tracing::info!(review_id = %model.id, "Created review");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> RentalResult<Option<Review>> {
        let model = self.base.find_by_id(id).await.map_err(internal)?;
        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: ReviewFilter) -> RentalResult<Vec<Review>> {
        let mut query = entity::review::Entity::find();

        if let Some(user_id) = filter.user_id {
            query = query.filter(entity::review::Column::UserId.eq(user_id));
        }

        if let Some(product_id) = filter.product_id {
            query = query.filter(entity::review::Column::ProductId.eq(product_id));
        }

        if let Some(score) = filter.score {
            query = query.filter(entity::review::Column::Score.eq(score));
        }

        let models = query
            .order_by_desc(entity::review::Column::CreatedAt)
            .all(self.base.db())
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateReview) -> RentalResult<Review> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or(RentalError::ReviewNotFound(id))?;

        let mut review: Review = model.into();
        review.score = input.score;
        review.comment = input.comment;
        review.user_id = input.user_id;
        review.product_id = input.product_id;

        let active_model: entity::review::ActiveModel = review.into();
        let updated_model = self.base.update(active_model).await.map_err(internal)?;

        tracing::info!(review_id = %id, "Updated review");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: Uuid) -> RentalResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await.map_err(internal)?;

        if rows_affected > 0 {
            tracing::info!(review_id = %id, "Deleted review");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_for_user_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> RentalResult<bool> {
        let exists = entity::review::Entity::find()
            .filter(entity::review::Column::UserId.eq(user_id))
            .filter(entity::review::Column::ProductId.eq(product_id))
            .one(self.base.db())
            .await
            .map_err(internal)?
            .is_some();

        Ok(exists)
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> RentalResult<Option<Review>> {
        let model = entity::review::Entity::find()
            .filter(entity::review::Column::BookingId.eq(booking_id))
            .one(self.base.db())
            .await
            .map_err(internal)?;

        Ok(model.map(|m| m.into()))
    }
}
