use dentia_core::models::{Product, ProductInput};
use dentia_core::AppError;
use sqlx::PgPool;

const PRODUCT_COLUMNS: &str = "id, name, description, image_url, price, category";

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id",
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {}", e);
            AppError::Internal("Failed to list products".to_string())
        })?;

        Ok(products)
    }

    pub async fn get(&self, product_id: i64) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1",
        ))
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch product: {}", e);
            AppError::Internal("Failed to fetch product".to_string())
        })?;

        Ok(product)
    }

    pub async fn create(&self, input: &ProductInput) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, description, image_url, price, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PRODUCT_COLUMNS}
            "#,
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.price)
        .bind(&input.category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create product: {}", e);
            AppError::Internal("Failed to create product".to_string())
        })?;

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    pub async fn update(&self, product_id: i64, input: &ProductInput) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE products SET name = $2, description = $3, image_url = $4, price = $5, category = $6
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.price)
        .bind(&input.category)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update product: {}", e);
            AppError::Internal("Failed to update product".to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product not found".to_string()));
        }

        Ok(())
    }

    pub async fn delete(&self, product_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete product: {}", e);
                AppError::Internal("Failed to delete product".to_string())
            })?;

        Ok(())
    }
}
