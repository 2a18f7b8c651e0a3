pub mod config;
pub mod domain;
pub mod errors;

pub use domain::greeting::{resolve_name, DEFAULT_NAME, GREETING_VIEW, NAME_KEY};
pub use domain::product::{Product, ProductId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
