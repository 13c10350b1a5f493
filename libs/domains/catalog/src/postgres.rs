use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::entity;
use crate::error::{CatalogError, CatalogResult};
use crate::lookup::CatalogLookup;
use crate::models::{ProductSummary, UserContact};

/// Postgres-backed catalog lookups.
pub struct PgCatalog {
    db: DatabaseConnection,
}

impl PgCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogLookup for PgCatalog {
    async fn product_exists(&self, id: Uuid) -> CatalogResult<bool> {
        let found = entity::product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        Ok(found.is_some())
    }

    async fn user_exists(&self, id: Uuid) -> CatalogResult<bool> {
        let found = entity::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        Ok(found.is_some())
    }

    async fn product_summary(&self, id: Uuid) -> CatalogResult<Option<ProductSummary>> {
        let model = entity::product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn user_contact(&self, id: Uuid) -> CatalogResult<Option<UserContact>> {
        let model = entity::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }
}
