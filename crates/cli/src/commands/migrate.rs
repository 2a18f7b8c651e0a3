use crate::commands::{run_with_pool, CommandResult, StepFailure};
use storefront_db::migrations;

pub fn run() -> CommandResult {
    let applied = run_with_pool("migrate", |pool| async move {
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;
        Ok::<_, StepFailure>(migrations::MIGRATOR.iter().count())
    });

    match applied {
        Ok(count) => CommandResult::success(
            "migrate",
            format!("applied pending migrations ({count} known)"),
        ),
        Err(failure) => failure,
    }
}
