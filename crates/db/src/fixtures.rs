use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::info;

use storefront_core::domain::product::{Product, ProductId};

use crate::connection::DbPool;
use crate::repositories::{CrudRepository, RepositoryError, SqlProductRepository};

/// Canonical demo catalog. Prices are written as decimal literals so the
/// verification step can compare them exactly.
const SEED_PRODUCTS: &[SeedProductContract] = &[
    SeedProductContract {
        description: "Spring Framework Guru Shirt",
        price: "18.95",
        image_url: "https://cdn.example.com/catalog/guru-shirt.jpg",
    },
    SeedProductContract {
        description: "Spring Framework Guru Mug",
        price: "11.95",
        image_url: "https://cdn.example.com/catalog/guru-mug.jpg",
    },
    SeedProductContract {
        description: "Spring Framework Guru Sticker Sheet",
        price: "0.995",
        image_url: "https://cdn.example.com/catalog/guru-stickers.jpg",
    },
];

/// Deterministic product catalog used by `storefront seed` and smoke tests.
pub struct CatalogSeed;

impl CatalogSeed {
    /// Inserts every seed product that is not present yet. Running it twice
    /// leaves the catalog unchanged.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let repository = SqlProductRepository::new(pool.clone());
        let mut products_seeded = Vec::new();
        let mut already_present = 0;

        for contract in SEED_PRODUCTS {
            if Self::find_seeded_id(pool, contract).await?.is_some() {
                already_present += 1;
                continue;
            }

            let saved = repository.save(contract.to_product()?).await?;
            let id = saved
                .id()
                .ok_or_else(|| RepositoryError::Decode("seeded product has no id".to_string()))?;
            products_seeded.push(SeededProduct { id, description: contract.description });
        }

        info!(
            event_name = "system.seed.catalog_loaded",
            correlation_id = "seed",
            inserted = products_seeded.len(),
            already_present,
            "catalog seed applied"
        );

        Ok(SeedResult { products_seeded, already_present })
    }

    /// Verify that every seed product exists with its exact price.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::with_capacity(SEED_PRODUCTS.len());

        for contract in SEED_PRODUCTS {
            let present = Self::find_seeded_id(pool, contract).await?.is_some();
            checks.push((contract.description, present));
        }

        let all_present = checks.iter().all(|(_, present)| *present);
        Ok(VerificationResult { all_present, checks })
    }

    /// Clean up seeded fixtures from a test database.
    pub async fn clean(pool: &DbPool) -> Result<(), RepositoryError> {
        let mut tx = pool.begin().await?;

        for contract in SEED_PRODUCTS {
            sqlx::query("DELETE FROM product WHERE description = ?1 AND image_url = ?2")
                .bind(contract.description)
                .bind(contract.image_url)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_seeded_id(
        pool: &DbPool,
        contract: &SeedProductContract,
    ) -> Result<Option<ProductId>, RepositoryError> {
        let id: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM product
             WHERE description = ?1 AND price = ?2 AND image_url = ?3
             ORDER BY id LIMIT 1",
        )
        .bind(contract.description)
        .bind(contract.price)
        .bind(contract.image_url)
        .fetch_optional(pool)
        .await?;

        Ok(id.map(ProductId))
    }
}

#[derive(Debug, Clone, Copy)]
struct SeedProductContract {
    description: &'static str,
    price: &'static str,
    image_url: &'static str,
}

impl SeedProductContract {
    fn to_product(self) -> Result<Product, RepositoryError> {
        let price = Decimal::from_str(self.price)
            .map_err(|e| RepositoryError::Decode(format!("seed price `{}`: {e}", self.price)))?;
        Ok(Product::new(self.description, price, self.image_url))
    }
}

#[derive(Debug)]
pub struct SeedResult {
    pub products_seeded: Vec<SeededProduct>,
    pub already_present: usize,
}

#[derive(Debug)]
pub struct SeededProduct {
    pub id: ProductId,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
