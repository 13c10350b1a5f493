use crate::models::BookingState;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// SeaORM Entity for the bookings table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: DateTimeWithTimeZone,
    pub state: BookingState,
    pub user_id: Uuid,
    pub product_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from SeaORM Model to the domain Booking
impl From<Model> for crate::models::Booking {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at.into(),
            state: model.state,
            user_id: model.user_id,
            product_id: model.product_id,
        }
    }
}

// Conversion from the domain Booking to an ActiveModel (all fields set)
impl From<crate::models::Booking> for ActiveModel {
    fn from(booking: crate::models::Booking) -> Self {
        ActiveModel {
            id: Set(booking.id),
            start_date: Set(booking.start_date),
            end_date: Set(booking.end_date),
            created_at: Set(booking.created_at.into()),
            state: Set(booking.state),
            user_id: Set(booking.user_id),
            product_id: Set(booking.product_id),
        }
    }
}
