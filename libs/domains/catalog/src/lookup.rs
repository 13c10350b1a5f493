use async_trait::async_trait;
use mockall::automock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{ProductSummary, UserContact};

/// Read-only lookups into the catalog.
///
/// Callers that only need referential integrity use the `*_exists` pair;
/// the summary/contact accessors exist for notification payloads.
#[automock]
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn product_exists(&self, id: Uuid) -> CatalogResult<bool>;

    async fn user_exists(&self, id: Uuid) -> CatalogResult<bool>;

    async fn product_summary(&self, id: Uuid) -> CatalogResult<Option<ProductSummary>>;

    async fn user_contact(&self, id: Uuid) -> CatalogResult<Option<UserContact>>;
}

/// In-memory implementation of CatalogLookup (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<Uuid, ProductSummary>>>,
    users: Arc<RwLock<HashMap<Uuid, UserContact>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_product(&self, product: ProductSummary) {
        self.products.write().await.insert(product.id, product);
    }

    pub async fn add_user(&self, user: UserContact) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn product_exists(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.products.read().await.contains_key(&id))
    }

    async fn user_exists(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.users.read().await.contains_key(&id))
    }

    async fn product_summary(&self, id: Uuid) -> CatalogResult<Option<ProductSummary>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn user_contact(&self, id: Uuid) -> CatalogResult<Option<UserContact>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product(id: Uuid) -> ProductSummary {
        ProductSummary {
            id,
            name: "test-car".to_string(),
            rentable: true,
            total_units: 1,
        }
    }

    #[tokio::test]
    async fn test_product_exists_after_add() {
        let catalog = InMemoryCatalog::new();
        let id = Uuid::new_v4();

        assert!(!catalog.product_exists(id).await.unwrap());

        catalog.add_product(sample_product(id)).await;
        assert!(catalog.product_exists(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_user_contact_roundtrip() {
        let catalog = InMemoryCatalog::new();
        let id = Uuid::new_v4();

        catalog
            .add_user(UserContact {
                id,
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            })
            .await;

        let contact = catalog.user_contact(id).await.unwrap().unwrap();
        assert_eq!(contact.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_unknown_ids_resolve_to_none() {
        let catalog = InMemoryCatalog::new();
        assert!(catalog.product_summary(Uuid::new_v4()).await.unwrap().is_none());
        assert!(catalog.user_contact(Uuid::new_v4()).await.unwrap().is_none());
    }
}
