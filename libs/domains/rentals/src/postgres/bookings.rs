use async_trait::async_trait;
use chrono::NaiveDate;
use database::BaseRepository;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{RentalError, RentalResult},
    models::{Booking, BookingFilter, CreateBooking, UpdateBooking},
    repository::BookingRepository,
};

pub struct PgBookingRepository {
    base: BaseRepository<entity::booking::Entity>,
}

impl PgBookingRepository {
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
impl BookingRepository for PgBookingRepository {
    async fn create(&self, input: CreateBooking) -> RentalResult<Booking> {
        // Overlap check and insert in one transaction, so two concurrent
        // requests for the same range cannot both commit
        let txn = self.base.db().begin().await.map_err(internal)?;

        let conflict = entity::booking::Entity::find()
            .filter(entity::booking::Column::ProductId.eq(input.product_id))
            .filter(entity::booking::Column::StartDate.lte(input.end_date))
            .filter(entity::booking::Column::EndDate.gte(input.start_date))
            .one(&txn)
            .await
            .map_err(internal)?;

        if conflict.is_some() {
            txn.rollback().await.map_err(internal)?;
            return Err(RentalError::RuleViolation(
                "product already booked for the requested range".to_string(),
            ));
        }

        let booking = Booking::new(input);
        let active_model: entity::booking::ActiveModel = booking.into();
        let model = active_model.insert(&txn).await.map_err(internal)?;

        txn.commit().await.map_err(internal)?;

        tracing::info!(booking_id = %model.id, "Created booking");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> RentalResult<Option<Booking>> {
        let model = self.base.find_by_id(id).await.map_err(internal)?;
        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: BookingFilter) -> RentalResult<Vec<Booking>> {
        let mut query = entity::booking::Entity::find();

        if let Some(user_id) = filter.user_id {
            query = query.filter(entity::booking::Column::UserId.eq(user_id));
        }

        if let Some(product_id) = filter.product_id {
            query = query.filter(entity::booking::Column::ProductId.eq(product_id));
        }

        if let Some(state) = filter.state {
            query = query.filter(entity::booking::Column::State.eq(state));
        }

        // Window overlap: booking.start <= to AND booking.end >= from
        if let Some(from) = filter.from {
            query = query.filter(entity::booking::Column::EndDate.gte(from));
        }

        if let Some(to) = filter.to {
            query = query.filter(entity::booking::Column::StartDate.lte(to));
        }

        query = query
            .order_by_desc(entity::booking::Column::CreatedAt)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64);

        let models = query.all(self.base.db()).await.map_err(internal)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateBooking) -> RentalResult<Booking> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or(RentalError::BookingNotFound(id))?;

        let mut booking: Booking = model.into();
        booking.apply_update(input);

        let active_model: entity::booking::ActiveModel = booking.into();
        let updated_model = self.base.update(active_model).await.map_err(internal)?;

        tracing::info!(booking_id = %id, state = %updated_model.state, "Updated booking");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: Uuid) -> RentalResult<bool> {
        let txn = self.base.db().begin().await.map_err(internal)?;

        // Null-then-delete: detach a linked review before removing the row
        entity::review::Entity::update_many()
            .col_expr(
                entity::review::Column::BookingId,
                sea_orm::sea_query::Expr::value(Option::<Uuid>::None),
            )
            .filter(entity::review::Column::BookingId.eq(id))
            .exec(&txn)
            .await
            .map_err(internal)?;

        let result = entity::booking::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(internal)?;

        txn.commit().await.map_err(internal)?;

        if result.rows_affected > 0 {
            tracing::info!(booking_id = %id, "Deleted booking");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_overlapping(
        &self,
        product_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RentalResult<bool> {
        let exists = entity::booking::Entity::find()
            .filter(entity::booking::Column::ProductId.eq(product_id))
            .filter(entity::booking::Column::StartDate.lte(end_date))
            .filter(entity::booking::Column::EndDate.gte(start_date))
            .one(self.base.db())
            .await
            .map_err(internal)?
            .is_some();

        Ok(exists)
    }

    async fn exists_completed(&self, user_id: Uuid, product_id: Uuid) -> RentalResult<bool> {
        let exists = entity::booking::Entity::find()
            .filter(entity::booking::Column::UserId.eq(user_id))
            .filter(entity::booking::Column::ProductId.eq(product_id))
            .filter(entity::booking::Column::State.eq(crate::models::BookingState::Completed))
            .one(self.base.db())
            .await
            .map_err(internal)?
            .is_some();

        Ok(exists)
    }
}
