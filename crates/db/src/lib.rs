pub mod connection;
pub mod fixtures;
pub mod migrations;
pub mod repositories;

pub use connection::{connect_with_settings, ping, DbPool};
pub use fixtures::{CatalogSeed, SeedResult, VerificationResult};
pub use repositories::{
    CrudRepository, InMemoryProductRepository, ProductRepository, RepositoryError,
    SqlProductRepository,
};
