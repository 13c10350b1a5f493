use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The product attributes the rentals engine needs.
///
/// `total_units` is declared stock; availability treats every product as a
/// single unit and never consults it (single-unit contract).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    /// Coarse "can this be rented at all" flag
    pub rentable: bool,
    pub total_units: i32,
}

/// Contact data for outbound notifications.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserContact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
