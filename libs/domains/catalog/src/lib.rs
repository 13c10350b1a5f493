//! Catalog Domain
//!
//! Read-side collaborator for the rentals engine: resolves user and product
//! references and exposes the few attributes other domains need (contact
//! data for notifications, stock flags for listings). Catalog CRUD itself
//! lives elsewhere; this crate is lookups only.

pub mod entity;
pub mod error;
pub mod lookup;
pub mod models;
pub mod postgres;

pub use error::{CatalogError, CatalogResult};
pub use lookup::{CatalogLookup, InMemoryCatalog, MockCatalogLookup};
pub use models::{ProductSummary, UserContact};
pub use postgres::PgCatalog;
