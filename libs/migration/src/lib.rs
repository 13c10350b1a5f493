pub use sea_orm_migration::prelude::*;

mod m20250712_000000_create_users_products;
mod m20250712_000001_create_bookings;
mod m20250712_000002_create_reviews;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250712_000000_create_users_products::Migration),
            Box::new(m20250712_000001_create_bookings::Migration),
            Box::new(m20250712_000002_create_reviews::Migration),
        ]
    }
}
