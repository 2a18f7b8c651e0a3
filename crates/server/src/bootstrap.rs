use std::sync::Arc;

use axum::Router;
use storefront_core::config::AppConfig;
use storefront_db::{
    connect_with_settings, migrations, DbPool, ProductRepository, SqlProductRepository,
};
use tera::Tera;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{greeting, health, products};

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub templates: Arc<Tera>,
    pub products: Arc<dyn ProductRepository>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

impl Application {
    /// All HTTP routes served on the configured listener.
    pub fn router(&self) -> Router {
        Router::new()
            .merge(greeting::router(self.templates.clone()))
            .merge(products::router(self.products.clone()))
            .merge(health::router(self.db_pool.clone()))
            .layer(TraceLayer::new_for_http())
    }
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let templates = greeting::init_templates(&config.server.templates_dir);
    let products: Arc<dyn ProductRepository> =
        Arc::new(SqlProductRepository::new(db_pool.clone()));

    Ok(Application { config, db_pool, templates, products })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use storefront_core::config::AppConfig;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::bootstrap::{bootstrap_with_config, BootstrapError};

    fn config_in(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        config.server.templates_dir = dir.path().join("no-templates");
        config
    }

    #[tokio::test]
    async fn bootstrap_reports_unreachable_database() {
        let dir = TempDir::new().expect("temp dir");
        let mut config = config_in(&dir);
        config.database.url =
            format!("sqlite://{}", dir.path().join("missing").join("test.db").display());

        let result = bootstrap_with_config(config).await;

        assert!(matches!(result, Err(BootstrapError::DatabaseConnect(_))));
    }

    #[tokio::test]
    async fn integration_smoke_covers_startup_greeting_and_product_paths() {
        let dir = TempDir::new().expect("temp dir");
        let app = bootstrap_with_config(config_in(&dir)).await.expect("bootstrap should succeed");

        let (table_count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'product'",
        )
        .fetch_one(&app.db_pool)
        .await
        .expect("product table should be available after bootstrap");
        assert_eq!(table_count, 1);

        let greeting = app
            .router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("greeting response");
        assert_eq!(greeting.status(), StatusCode::OK);
        let body = to_bytes(greeting.into_body(), usize::MAX).await.expect("body");
        assert!(String::from_utf8_lossy(&body).contains("App Service"));

        let created = app
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/products")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"description":"Mug","price":"9.99"}"#))
                    .expect("request"),
            )
            .await
            .expect("create response");
        assert_eq!(created.status(), StatusCode::CREATED);

        let health = app
            .router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
            .await
            .expect("health response");
        assert_eq!(health.status(), StatusCode::OK);

        app.db_pool.close().await;
    }
}
