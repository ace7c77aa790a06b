//! Product catalogue. Listing and lookup are public; mutations are
//! admin-only.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use dentia_core::models::{Product, ProductInput};
use dentia_core::AppError;

use crate::auth::models::{require_admin, AuthContext};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "All products", body = ProductsResponse)
    )
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProductsResponse>, HttpAppError> {
    let products = state.products.list().await?;
    Ok(Json(ProductsResponse { products }))
}

#[utoipa::path(
    get,
    path = "/products/{product_id}",
    tag = "products",
    params(("product_id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i64>,
) -> Result<Json<Product>, HttpAppError> {
    let product = state
        .products
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    security(("bearer_auth" = [])),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product added", body = MessageResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    )
)]
pub async fn add_product(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    require_admin(&ctx)?;
    state.products.create(&input).await?;
    Ok(Json(MessageResponse::new("Product added")))
}

#[utoipa::path(
    put,
    path = "/products/{product_id}",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("product_id" = i64, Path, description = "Product id")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(product_id): Path<i64>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    require_admin(&ctx)?;
    state.products.update(product_id, &input).await?;
    Ok(Json(MessageResponse::new("Product updated")))
}

#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("product_id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(product_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    require_admin(&ctx)?;
    state.products.delete(product_id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}
