//! Shop orders. Patients create and read their own orders; status changes
//! are admin-only.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use dentia_core::constants::ORDER_STATUSES;
use dentia_core::models::{Order, OrderItemDetail, User};
use dentia_core::AppError;
use dentia_db::NewOrderItem;

use crate::auth::models::{require_admin, AuthContext};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub product_id: i64,
    pub quantity: i32,
    #[schema(value_type = f64)]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderPlacedResponse {
    pub message: String,
    pub order_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailResponse {
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StatusUpdate {
    pub status: String,
}

async fn current_user(state: &AppState, ctx: &AuthContext) -> Result<User, AppError> {
    state
        .users
        .get_by_email(&ctx.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "orders",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = OrderPlacedResponse),
        (status = 400, description = "Order must contain items", body = ErrorResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse)
    )
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(req): ValidatedJson<CreateOrderRequest>,
) -> Result<Json<OrderPlacedResponse>, HttpAppError> {
    let user = current_user(&state, &ctx).await?;

    if req.items.is_empty() {
        return Err(AppError::BadRequest("Order must contain items".to_string()).into());
    }

    let items: Vec<NewOrderItem> = req
        .items
        .iter()
        .map(|item| NewOrderItem {
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
        })
        .collect();

    let order = state.orders.create_order(user.id, &items).await?;

    Ok(Json(OrderPlacedResponse {
        message: "Order placed successfully".to_string(),
        order_id: order.id,
    }))
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's orders", body = OrdersResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse)
    )
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<Json<OrdersResponse>, HttpAppError> {
    let user = current_user(&state, &ctx).await?;
    let orders = state.orders.list_for_user(user.id).await?;
    Ok(Json(OrdersResponse { orders }))
}

#[utoipa::path(
    get,
    path = "/orders/{order_id}",
    tag = "orders",
    security(("bearer_auth" = [])),
    params(("order_id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with its lines", body = OrderDetailResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn get_order_detail(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(order_id): Path<i64>,
) -> Result<Json<OrderDetailResponse>, HttpAppError> {
    let user = current_user(&state, &ctx).await?;

    let order = state
        .orders
        .get_for_user(order_id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    let items = state.orders.items_for_order(order_id).await?;

    Ok(Json(OrderDetailResponse { order, items }))
}

#[utoipa::path(
    put,
    path = "/orders/{order_id}/status",
    tag = "orders",
    security(("bearer_auth" = [])),
    params(("order_id" = i64, Path, description = "Order id")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    )
)]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(order_id): Path<i64>,
    ValidatedJson(update): ValidatedJson<StatusUpdate>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    require_admin(&ctx)?;

    if !ORDER_STATUSES.contains(&update.status.as_str()) {
        return Err(AppError::BadRequest("Invalid status".to_string()).into());
    }

    state.orders.update_status(order_id, &update.status).await?;
    Ok(Json(MessageResponse::new(format!(
        "Order status updated to '{}'",
        update.status
    ))))
}
