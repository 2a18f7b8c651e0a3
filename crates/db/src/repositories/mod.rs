use async_trait::async_trait;
use thiserror::Error;

use storefront_core::domain::product::{Product, ProductId};
use storefront_core::errors::{ApplicationError, DomainError};

pub mod memory;
pub mod product;

pub use memory::InMemoryProductRepository;
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("no record with id {0}")]
    NotFound(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound(id) => Self::NotFound(format!("no record with id {id}")),
            RepositoryError::Domain(error) => Self::Domain(error),
            RepositoryError::Decode(message) => Self::Integrity(message),
            RepositoryError::Database(error) => Self::Persistence(error.to_string()),
        }
    }
}

/// Generic by-identity storage contract.
///
/// `save` inserts when the entity carries no identifier and returns it with a
/// freshly issued one; otherwise it updates the stored record with that
/// identifier. `delete_by_id` is idempotent.
#[async_trait]
pub trait CrudRepository<E, Id>: Send + Sync
where
    E: Send + 'static,
    Id: Send + Sync + 'static,
{
    async fn save(&self, entity: E) -> Result<E, RepositoryError>;
    async fn find_by_id(&self, id: &Id) -> Result<Option<E>, RepositoryError>;
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError>;
    async fn delete_by_id(&self, id: &Id) -> Result<(), RepositoryError>;
}

pub trait ProductRepository: CrudRepository<Product, ProductId> {}

impl<T> ProductRepository for T where T: CrudRepository<Product, ProductId> {}
