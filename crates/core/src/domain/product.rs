use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sellable catalog item.
///
/// The identifier is owned by the storage layer: it is unset until the first
/// save and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Product {
    id: Option<ProductId>,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
}

impl Product {
    pub fn new(description: impl Into<String>, price: Decimal, image_url: impl Into<String>) -> Self {
        Self { id: None, description: description.into(), price, image_url: image_url.into() }
    }

    /// Rebuilds a product that already lives in a backing store.
    pub fn persisted(
        id: ProductId,
        description: impl Into<String>,
        price: Decimal,
        image_url: impl Into<String>,
    ) -> Self {
        Self { id: Some(id), description: description.into(), price, image_url: image_url.into() }
    }

    pub fn id(&self) -> Option<ProductId> {
        self.id
    }

    pub fn assign_id(&mut self, id: ProductId) -> Result<(), DomainError> {
        match self.id {
            None => {
                self.id = Some(id);
                Ok(())
            }
            Some(current) if current == id => Ok(()),
            Some(current) => Err(DomainError::IdentityReassigned { current, requested: id }),
        }
    }
}
