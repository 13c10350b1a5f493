use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// SeaORM Entity for the reviews table
///
/// `booking_id` carries a unique index: at most one review per booking. It
/// is nullable so a deleted booking can detach its review instead of
/// cascading into it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub score: i32,
    pub comment: String,
    pub created_at: DateTimeWithTimeZone,
    pub user_id: Uuid,
    pub product_id: Uuid,
    #[sea_orm(unique)]
    pub booking_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from SeaORM Model to the domain Review
impl From<Model> for crate::models::Review {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            score: model.score,
            comment: model.comment,
            created_at: model.created_at.into(),
            user_id: model.user_id,
            product_id: model.product_id,
            booking_id: model.booking_id,
        }
    }
}

// Conversion from the domain Review to an ActiveModel (all fields set)
impl From<crate::models::Review> for ActiveModel {
    fn from(review: crate::models::Review) -> Self {
        ActiveModel {
            id: Set(review.id),
            score: Set(review.score),
            comment: Set(review.comment),
            created_at: Set(review.created_at.into()),
            user_id: Set(review.user_id),
            product_id: Set(review.product_id),
            booking_id: Set(review.booking_id),
        }
    }
}
