use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Appointment {
    pub id: i64,
    pub user_id: i64,
    pub doctor_id: i64,
    pub appointment_time: DateTime<Utc>,
    pub status: String,
}

/// Appointment joined with the doctor's display name and specialty.
#[derive(Debug, Clone, Serialize, ToSchema, sqlx::FromRow)]
pub struct AppointmentWithDoctor {
    pub id: i64,
    pub doctor_id: i64,
    pub appointment_time: DateTime<Utc>,
    pub status: String,
    pub doctor_name: String,
    pub specialty: Option<String>,
}
