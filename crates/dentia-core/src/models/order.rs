use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    #[schema(value_type = f64)]
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Order line joined with its product for order-detail responses.
#[derive(Debug, Clone, Serialize, ToSchema, sqlx::FromRow)]
pub struct OrderItemDetail {
    pub product_id: i64,
    pub product_name: String,
    pub image_url: Option<String>,
    pub quantity: i32,
    #[schema(value_type = f64)]
    pub price: Decimal,
}
