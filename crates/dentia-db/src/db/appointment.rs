use chrono::{DateTime, Utc};
use dentia_core::models::{Appointment, AppointmentWithDoctor};
use dentia_core::AppError;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: i64,
        doctor_id: i64,
        appointment_time: DateTime<Utc>,
    ) -> Result<Appointment, AppError> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (user_id, doctor_id, appointment_time, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING id, user_id, doctor_id, appointment_time, status
            "#,
        )
        .bind(user_id)
        .bind(doctor_id)
        .bind(appointment_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to book appointment: {}", e);
            AppError::Internal("Failed to book appointment".to_string())
        })?;

        tracing::info!(
            appointment_id = appointment.id,
            user_id,
            doctor_id,
            "Booked appointment"
        );
        Ok(appointment)
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<AppointmentWithDoctor>, AppError> {
        let appointments = sqlx::query_as::<_, AppointmentWithDoctor>(
            r#"
            SELECT
                a.id, a.doctor_id, a.appointment_time, a.status,
                d.first_name || ' ' || d.last_name AS doctor_name,
                d.specialty
            FROM appointments a
            JOIN doctors d ON a.doctor_id = d.id
            WHERE a.user_id = $1
            ORDER BY a.appointment_time
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list appointments: {}", e);
            AppError::Internal("Failed to list appointments".to_string())
        })?;

        Ok(appointments)
    }

    pub async fn update_status(&self, appointment_id: i64, status: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE appointments SET status = $2 WHERE id = $1")
            .bind(appointment_id)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update appointment status: {}", e);
                AppError::Internal("Failed to update appointment status".to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Appointment not found".to_string()));
        }

        Ok(())
    }
}
