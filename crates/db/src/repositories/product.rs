use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::Row;

use storefront_core::domain::product::{Product, ProductId};

use super::{CrudRepository, RepositoryError};
use crate::DbPool;

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, mut product: Product) -> Result<Product, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO product (description, price, image_url)
             VALUES (?, ?, ?)",
        )
        .bind(&product.description)
        .bind(product.price.to_string())
        .bind(&product.image_url)
        .execute(&self.pool)
        .await?;

        product.assign_id(ProductId(result.last_insert_rowid()))?;
        Ok(product)
    }

    async fn update(&self, id: ProductId, product: Product) -> Result<Product, RepositoryError> {
        let result = sqlx::query(
            "UPDATE product
             SET description = ?, price = ?, image_url = ?
             WHERE id = ?",
        )
        .bind(&product.description)
        .bind(product.price.to_string())
        .bind(&product.image_url)
        .bind(id.0)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        Ok(product)
    }
}

fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, RepositoryError> {
    let id: i64 = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let description: String =
        row.try_get("description").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let price_str: String =
        row.try_get("price").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let image_url: String =
        row.try_get("image_url").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let price = Decimal::from_str(&price_str).map_err(|e| {
        RepositoryError::Decode(format!("product {id} has invalid price `{price_str}`: {e}"))
    })?;

    Ok(Product::persisted(ProductId(id), description, price, image_url))
}

#[async_trait::async_trait]
impl CrudRepository<Product, ProductId> for SqlProductRepository {
    async fn save(&self, product: Product) -> Result<Product, RepositoryError> {
        match product.id() {
            None => self.insert(product).await,
            Some(id) => self.update(id, product).await,
        }
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, description, price, image_url
             FROM product WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_product(r)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, description, price, image_url
             FROM product ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_product).collect()
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM product WHERE id = ?").bind(id.0).execute(&self.pool).await?;
        Ok(())
    }
}
