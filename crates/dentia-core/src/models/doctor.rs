use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Doctor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub short_bio: Option<String>,
    pub gender: Option<String>,
    pub specialty: Option<String>,
    pub languages: Option<String>,
    pub rating: Option<f64>,
    pub profile_image: Option<String>,
    pub city: Option<String>,
}

/// Fields accepted when creating or replacing a doctor record.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DoctorInput {
    pub first_name: String,
    pub last_name: String,
    pub short_bio: Option<String>,
    pub gender: Option<String>,
    pub specialty: Option<String>,
    pub languages: Option<String>,
    pub rating: Option<f64>,
    pub profile_image: Option<String>,
    pub city: Option<String>,
}
