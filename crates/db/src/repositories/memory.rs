use std::collections::BTreeMap;

use tokio::sync::RwLock;

use storefront_core::domain::product::{Product, ProductId};

use super::{CrudRepository, RepositoryError};

#[derive(Default)]
struct ProductTable {
    rows: BTreeMap<ProductId, Product>,
    last_id: i64,
}

/// Process-local product store. Identifiers are issued from a counter and are
/// never handed out twice, even after the row is deleted.
#[derive(Default)]
pub struct InMemoryProductRepository {
    table: RwLock<ProductTable>,
}

#[async_trait::async_trait]
impl CrudRepository<Product, ProductId> for InMemoryProductRepository {
    async fn save(&self, mut product: Product) -> Result<Product, RepositoryError> {
        let mut table = self.table.write().await;

        let id = match product.id() {
            None => {
                table.last_id += 1;
                let id = ProductId(table.last_id);
                product.assign_id(id)?;
                id
            }
            Some(id) if !table.rows.contains_key(&id) => {
                return Err(RepositoryError::NotFound(id.to_string()));
            }
            Some(id) => id,
        };

        table.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;
        table.rows.remove(id);
        Ok(())
    }
}
