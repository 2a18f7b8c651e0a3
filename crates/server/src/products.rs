//! JSON API over the product repository.
//!
//! - `GET    /api/v1/products`: list every product
//! - `POST   /api/v1/products`: create a product, returns it with its id
//! - `GET    /api/v1/products/{id}`: fetch one product
//! - `PUT    /api/v1/products/{id}`: replace the fields of an existing product
//! - `DELETE /api/v1/products/{id}`: remove a product (idempotent)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_core::domain::product::{Product, ProductId};
use storefront_core::errors::{ApplicationError, InterfaceError};
use storefront_db::{CrudRepository, ProductRepository, RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductApiState {
    repository: Arc<dyn ProductRepository>,
}

/// Client-supplied product fields. The id always comes from the path or the
/// store, never from the body.
#[derive(Debug, Deserialize)]
pub struct ProductDraft {
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub detail: String,
    pub correlation_id: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub fn router(repository: Arc<dyn ProductRepository>) -> Router {
    Router::new()
        .route("/api/v1/products", get(list_products).post(create_product))
        .route(
            "/api/v1/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(ProductApiState { repository })
}

pub async fn list_products(State(state): State<ProductApiState>) -> ApiResult<Json<Vec<Product>>> {
    state.repository.find_all().await.map(Json).map_err(|e| failure("list", e))
}

pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<ProductApiState>,
) -> ApiResult<Json<Product>> {
    let id = ProductId(id);
    match state.repository.find_by_id(&id).await.map_err(|e| failure("get", e))? {
        Some(product) => Ok(Json(product)),
        None => Err(failure("get", RepositoryError::NotFound(id.to_string()))),
    }
}

pub async fn create_product(
    State(state): State<ProductApiState>,
    Json(draft): Json<ProductDraft>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = Product::new(draft.description, draft.price, draft.image_url);
    let saved = state.repository.save(product).await.map_err(|e| failure("create", e))?;

    info!(
        event_name = "product.created",
        product_id = ?saved.id(),
        "product created"
    );
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<ProductApiState>,
    Json(draft): Json<ProductDraft>,
) -> ApiResult<Json<Product>> {
    let product =
        Product::persisted(ProductId(id), draft.description, draft.price, draft.image_url);
    state.repository.save(product).await.map(Json).map_err(|e| failure("update", e))
}

pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<ProductApiState>,
) -> ApiResult<StatusCode> {
    state.repository.delete_by_id(&ProductId(id)).await.map_err(|e| failure("delete", e))?;
    Ok(StatusCode::NO_CONTENT)
}

fn failure(action: &'static str, error: RepositoryError) -> (StatusCode, Json<ApiError>) {
    let interface = ApplicationError::from(error).into_interface(Uuid::new_v4().to_string());

    let status = match &interface {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!(
            event_name = "product.api.failure",
            correlation_id = interface.correlation_id(),
            action,
            error = %interface,
            "product request failed"
        );
    }

    (
        status,
        Json(ApiError {
            error: interface.user_message().to_string(),
            detail: interface.to_string(),
            correlation_id: interface.correlation_id().to_string(),
        }),
    )
}
