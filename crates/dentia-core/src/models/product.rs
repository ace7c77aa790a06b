use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub category: Option<String>,
}

/// Fields accepted when creating or replacing a product record.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub category: Option<String>,
}
