use dentia_core::models::{Doctor, DoctorInput};
use dentia_core::AppError;
use sqlx::PgPool;

const DOCTOR_COLUMNS: &str =
    "id, first_name, last_name, short_bio, gender, specialty, languages, rating, profile_image, city";

#[derive(Clone)]
pub struct DoctorRepository {
    pool: PgPool,
}

impl DoctorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Doctor>, AppError> {
        let doctors = sqlx::query_as::<_, Doctor>(&format!(
            "SELECT {DOCTOR_COLUMNS} FROM doctors ORDER BY id",
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list doctors: {}", e);
            AppError::Internal("Failed to list doctors".to_string())
        })?;

        Ok(doctors)
    }

    pub async fn get(&self, doctor_id: i64) -> Result<Option<Doctor>, AppError> {
        let doctor = sqlx::query_as::<_, Doctor>(&format!(
            "SELECT {DOCTOR_COLUMNS} FROM doctors WHERE id = $1",
        ))
        .bind(doctor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch doctor: {}", e);
            AppError::Internal("Failed to fetch doctor".to_string())
        })?;

        Ok(doctor)
    }

    pub async fn create(&self, input: &DoctorInput) -> Result<Doctor, AppError> {
        let doctor = sqlx::query_as::<_, Doctor>(&format!(
            r#"
            INSERT INTO doctors (first_name, last_name, short_bio, gender, specialty, languages, rating, profile_image, city)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {DOCTOR_COLUMNS}
            "#,
        ))
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.short_bio)
        .bind(&input.gender)
        .bind(&input.specialty)
        .bind(&input.languages)
        .bind(input.rating)
        .bind(&input.profile_image)
        .bind(&input.city)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create doctor: {}", e);
            AppError::Internal("Failed to create doctor".to_string())
        })?;

        tracing::info!(doctor_id = doctor.id, "Created doctor");
        Ok(doctor)
    }

    pub async fn update(&self, doctor_id: i64, input: &DoctorInput) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE doctors SET first_name = $2, last_name = $3, short_bio = $4, gender = $5,
                specialty = $6, languages = $7, rating = $8, profile_image = $9, city = $10
            WHERE id = $1
            "#,
        )
        .bind(doctor_id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.short_bio)
        .bind(&input.gender)
        .bind(&input.specialty)
        .bind(&input.languages)
        .bind(input.rating)
        .bind(&input.profile_image)
        .bind(&input.city)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update doctor: {}", e);
            AppError::Internal("Failed to update doctor".to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Doctor not found".to_string()));
        }

        Ok(())
    }

    pub async fn delete(&self, doctor_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM doctors WHERE id = $1")
            .bind(doctor_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete doctor: {}", e);
                AppError::Internal("Failed to delete doctor".to_string())
            })?;

        Ok(())
    }
}
