//! Integration tests for the Postgres catalog lookups.

use domain_catalog::{CatalogLookup, PgCatalog};
use test_utils::{TestDatabase, TestDataBuilder};
use uuid::Uuid;

#[tokio::test]
async fn test_seeded_rows_resolve() {
    let db = TestDatabase::new().await;
    let catalog = PgCatalog::new(db.connection());
    let builder = TestDataBuilder::from_test_name("seeded_rows_resolve");

    let user_id = db.create_test_user(builder.user_id()).await;
    let product_id = db.create_test_product(builder.product_id()).await;

    assert!(catalog.user_exists(user_id).await.unwrap());
    assert!(catalog.product_exists(product_id).await.unwrap());

    let contact = catalog.user_contact(user_id).await.unwrap().unwrap();
    assert!(contact.email.contains("@example.com"));

    let summary = catalog.product_summary(product_id).await.unwrap().unwrap();
    assert!(summary.rentable);
    assert_eq!(summary.total_units, 1);
}

#[tokio::test]
async fn test_unknown_ids_do_not_resolve() {
    let db = TestDatabase::new().await;
    let catalog = PgCatalog::new(db.connection());

    assert!(!catalog.user_exists(Uuid::new_v4()).await.unwrap());
    assert!(!catalog.product_exists(Uuid::new_v4()).await.unwrap());
    assert!(catalog
        .product_summary(Uuid::new_v4())
        .await
        .unwrap()
        .is_none());
}
