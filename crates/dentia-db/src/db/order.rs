use dentia_core::models::{Order, OrderItemDetail};
use dentia_core::AppError;
use rust_decimal::Decimal;
use sqlx::PgPool;

const ORDER_COLUMNS: &str = "id, user_id, total_price, status, created_at";

/// One line of a new order, already validated by the handler.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an order and its lines in one transaction. The total is the
    /// sum of quantity × price over the lines.
    pub async fn create_order(
        &self,
        user_id: i64,
        items: &[NewOrderItem],
    ) -> Result<Order, AppError> {
        let total_price: Decimal = items
            .iter()
            .map(|item| Decimal::from(item.quantity) * item.price)
            .sum();

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin order transaction: {}", e);
            AppError::Internal("Failed to create order".to_string())
        })?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (user_id, total_price, status)
            VALUES ($1, $2, 'pending')
            RETURNING {ORDER_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(total_price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert order: {}", e);
            AppError::Internal("Failed to create order".to_string())
        })?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert order item: {}", e);
                AppError::Internal("Failed to create order".to_string())
            })?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit order transaction: {}", e);
            AppError::Internal("Failed to create order".to_string())
        })?;

        tracing::info!(order_id = order.id, user_id, "Placed order");
        Ok(order)
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list orders: {}", e);
            AppError::Internal("Failed to list orders".to_string())
        })?;

        Ok(orders)
    }

    pub async fn get_for_user(
        &self,
        order_id: i64,
        user_id: i64,
    ) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2",
        ))
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch order: {}", e);
            AppError::Internal("Failed to fetch order".to_string())
        })?;

        Ok(order)
    }

    pub async fn items_for_order(&self, order_id: i64) -> Result<Vec<OrderItemDetail>, AppError> {
        let items = sqlx::query_as::<_, OrderItemDetail>(
            r#"
            SELECT oi.product_id, p.name AS product_name, p.image_url, oi.quantity, oi.price
            FROM order_items oi
            JOIN products p ON oi.product_id = p.id
            WHERE oi.order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch order items: {}", e);
            AppError::Internal("Failed to fetch order items".to_string())
        })?;

        Ok(items)
    }

    pub async fn update_status(&self, order_id: i64, status: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
            .bind(order_id)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update order status: {}", e);
                AppError::Internal("Failed to update order status".to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Order not found".to_string()));
        }

        Ok(())
    }
}
