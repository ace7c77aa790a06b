use dentia_core::models::{UpdateUserProfile, User};
use dentia_core::AppError;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, role, gender, \
     date_of_birth, avatar_url, contact_number, address, under_physician_care, \
     chronic_conditions, any_allergies, under_medications, pregnant_or_nursing, symptoms, \
     previous_treatments, diagnosed_gum_disease, brushing_frequency, flossing, tobacco_use, \
     sugary_diet, teeth_grinding, is_subscribed, created_at, updated_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new user. Role defaults to `patient`.
    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create user: {}", e);
            AppError::Internal("Failed to create user".to_string())
        })?;

        tracing::info!(user_id = user.id, "Registered new user");
        Ok(user)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1",
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user by email: {}", e);
            AppError::Internal("Failed to fetch user".to_string())
        })?;

        Ok(user)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to check email existence: {}", e);
                    AppError::Internal("Failed to check email".to_string())
                })?;

        Ok(exists.0)
    }

    /// Apply a partial profile update.
    ///
    /// Columns are a statically declared set; unset fields keep their current
    /// value via COALESCE. List fields are persisted as JSONB.
    pub async fn update_profile(
        &self,
        email: &str,
        update: &UpdateUserProfile,
    ) -> Result<(), AppError> {
        let symptoms = update
            .symptoms
            .as_ref()
            .map(|v| serde_json::to_value(v))
            .transpose()?;
        let previous_treatments = update
            .previous_treatments
            .as_ref()
            .map(|v| serde_json::to_value(v))
            .transpose()?;

        let result = sqlx::query(
            r#"
            UPDATE users SET
                gender = COALESCE($2, gender),
                date_of_birth = COALESCE($3, date_of_birth),
                contact_number = COALESCE($4, contact_number),
                address = COALESCE($5, address),
                under_physician_care = COALESCE($6, under_physician_care),
                chronic_conditions = COALESCE($7, chronic_conditions),
                any_allergies = COALESCE($8, any_allergies),
                under_medications = COALESCE($9, under_medications),
                pregnant_or_nursing = COALESCE($10, pregnant_or_nursing),
                symptoms = COALESCE($11, symptoms),
                previous_treatments = COALESCE($12, previous_treatments),
                diagnosed_gum_disease = COALESCE($13, diagnosed_gum_disease),
                brushing_frequency = COALESCE($14, brushing_frequency),
                flossing = COALESCE($15, flossing),
                tobacco_use = COALESCE($16, tobacco_use),
                sugary_diet = COALESCE($17, sugary_diet),
                teeth_grinding = COALESCE($18, teeth_grinding),
                is_subscribed = COALESCE($19, is_subscribed),
                updated_at = NOW()
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(&update.gender)
        .bind(update.date_of_birth)
        .bind(&update.contact_number)
        .bind(&update.address)
        .bind(update.under_physician_care)
        .bind(update.chronic_conditions)
        .bind(update.any_allergies)
        .bind(update.under_medications)
        .bind(update.pregnant_or_nursing)
        .bind(symptoms)
        .bind(previous_treatments)
        .bind(update.diagnosed_gum_disease)
        .bind(&update.brushing_frequency)
        .bind(update.flossing)
        .bind(update.tobacco_use)
        .bind(update.sugary_diet)
        .bind(update.teeth_grinding)
        .bind(update.is_subscribed)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user profile: {}", e);
            AppError::Internal("Failed to update user profile".to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    pub async fn set_avatar(&self, email: &str, avatar_url: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET avatar_url = $2, updated_at = NOW() WHERE email = $1")
            .bind(email)
            .bind(avatar_url)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update avatar: {}", e);
                AppError::Internal("Failed to update avatar".to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }
}
