use crate::commands::{run_with_pool, CommandResult};
use storefront_db::{migrations, CatalogSeed, SeedResult, VerificationResult};

pub fn run() -> CommandResult {
    let result = run_with_pool("seed", |pool| async move {
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let seed_result = CatalogSeed::load(&pool)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;

        let verification = CatalogSeed::verify(&pool)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), 6u8))?;

        if verification.all_present {
            Ok(seed_result)
        } else {
            Err(("seed_verification", verification_failure_message(&verification), 6u8))
        }
    });

    match result {
        Ok(seed_result) => CommandResult::success("seed", success_message(&seed_result)),
        Err(failure) => failure,
    }
}

fn success_message(result: &SeedResult) -> String {
    let mut lines = vec![format!(
        "demo catalog ready: {} inserted, {} already present",
        result.products_seeded.len(),
        result.already_present
    )];
    lines.extend(
        result
            .products_seeded
            .iter()
            .map(|product| format!("  - #{}: {}", product.id, product.description)),
    );
    lines.join("\n")
}

fn verification_failure_message(verification: &VerificationResult) -> String {
    let failed_checks = verification
        .checks
        .iter()
        .filter_map(|(check, passed)| (!passed).then_some(*check))
        .collect::<Vec<_>>();

    if failed_checks.is_empty() {
        "Some seed data failed to load".to_string()
    } else {
        format!("Seed verification failed for: {}", failed_checks.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use storefront_core::domain::product::ProductId;
    use storefront_db::fixtures::SeededProduct;
    use storefront_db::{SeedResult, VerificationResult};

    use super::{success_message, verification_failure_message};

    #[test]
    fn verification_error_message_targets_failed_checks() {
        let verification = VerificationResult {
            all_present: false,
            checks: vec![("Mug", true), ("Shirt", false), ("Stickers", false)],
        };

        assert_eq!(
            verification_failure_message(&verification),
            "Seed verification failed for: Shirt, Stickers"
        );
    }

    #[test]
    fn verification_error_message_falls_back_to_generic_when_no_labels() {
        let verification = VerificationResult { all_present: false, checks: vec![("Mug", true)] };

        assert_eq!(verification_failure_message(&verification), "Some seed data failed to load");
    }

    #[test]
    fn success_message_lists_inserted_products() {
        let result = SeedResult {
            products_seeded: vec![SeededProduct { id: ProductId(4), description: "Mug" }],
            already_present: 2,
        };

        assert_eq!(
            success_message(&result),
            "demo catalog ready: 1 inserted, 2 already present\n  - #4: Mug"
        );
    }
}
