use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
