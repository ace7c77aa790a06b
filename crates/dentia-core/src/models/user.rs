use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User entity as stored in the `users` table.
///
/// `symptoms` and `previous_treatments` are JSONB columns; legacy rows may
/// hold a string-encoded array instead of a genuine one, so they are kept as
/// raw JSON values and decoded leniently at the point of use.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar_url: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub under_physician_care: Option<bool>,
    pub chronic_conditions: Option<bool>,
    pub any_allergies: Option<bool>,
    pub under_medications: Option<bool>,
    pub pregnant_or_nursing: Option<bool>,
    pub symptoms: Option<serde_json::Value>,
    pub previous_treatments: Option<serde_json::Value>,
    pub diagnosed_gum_disease: Option<bool>,
    pub brushing_frequency: Option<String>,
    pub flossing: Option<bool>,
    pub tobacco_use: Option<bool>,
    pub sugary_diet: Option<bool>,
    pub teeth_grinding: Option<bool>,
    pub is_subscribed: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Slim response shape returned for admin accounts.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserAdminResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl From<&User> for UserAdminResponse {
    fn from(user: &User) -> Self {
        UserAdminResponse {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.clone(),
        }
    }
}

/// Full response shape returned for patient accounts, with the JSON-encoded
/// list fields decoded into genuine lists.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserPatientResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar_url: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub under_physician_care: Option<bool>,
    pub chronic_conditions: Option<bool>,
    pub any_allergies: Option<bool>,
    pub under_medications: Option<bool>,
    pub pregnant_or_nursing: Option<bool>,
    pub symptoms: Vec<String>,
    pub previous_treatments: Vec<String>,
    pub diagnosed_gum_disease: Option<bool>,
    pub brushing_frequency: Option<String>,
    pub flossing: Option<bool>,
    pub tobacco_use: Option<bool>,
    pub sugary_diet: Option<bool>,
    pub teeth_grinding: Option<bool>,
    pub is_subscribed: Option<bool>,
}

/// Decode a JSONB list field into a plain list of strings.
///
/// Tolerates three historical encodings: a genuine JSON array, a string
/// holding a JSON-encoded array, and a bare string (treated as a
/// single-element list). Anything else decodes to its display form.
pub fn decode_list_field(value: Option<&serde_json::Value>) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        serde_json::Value::String(s) => match serde_json::from_str::<Vec<String>>(s) {
            Ok(parsed) => parsed,
            Err(_) => vec![s.clone()],
        },
        serde_json::Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

impl From<&User> for UserPatientResponse {
    fn from(user: &User) -> Self {
        UserPatientResponse {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.clone(),
            gender: user.gender.clone(),
            date_of_birth: user.date_of_birth,
            avatar_url: user.avatar_url.clone(),
            contact_number: user.contact_number.clone(),
            address: user.address.clone(),
            under_physician_care: user.under_physician_care,
            chronic_conditions: user.chronic_conditions,
            any_allergies: user.any_allergies,
            under_medications: user.under_medications,
            pregnant_or_nursing: user.pregnant_or_nursing,
            symptoms: decode_list_field(user.symptoms.as_ref()),
            previous_treatments: decode_list_field(user.previous_treatments.as_ref()),
            diagnosed_gum_disease: user.diagnosed_gum_disease,
            brushing_frequency: user.brushing_frequency.clone(),
            flossing: user.flossing,
            tobacco_use: user.tobacco_use,
            sugary_diet: user.sugary_diet,
            teeth_grinding: user.teeth_grinding,
            is_subscribed: user.is_subscribed,
        }
    }
}

/// Partial profile update. Unset fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserProfile {
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub under_physician_care: Option<bool>,
    pub chronic_conditions: Option<bool>,
    pub any_allergies: Option<bool>,
    pub under_medications: Option<bool>,
    pub pregnant_or_nursing: Option<bool>,
    pub symptoms: Option<Vec<String>>,
    pub previous_treatments: Option<Vec<String>>,
    pub diagnosed_gum_disease: Option<bool>,
    pub brushing_frequency: Option<String>,
    pub flossing: Option<bool>,
    pub tobacco_use: Option<bool>,
    pub sugary_diet: Option<bool>,
    pub teeth_grinding: Option<bool>,
    pub is_subscribed: Option<bool>,
}

impl UpdateUserProfile {
    pub fn is_empty(&self) -> bool {
        self.gender.is_none()
            && self.date_of_birth.is_none()
            && self.contact_number.is_none()
            && self.address.is_none()
            && self.under_physician_care.is_none()
            && self.chronic_conditions.is_none()
            && self.any_allergies.is_none()
            && self.under_medications.is_none()
            && self.pregnant_or_nursing.is_none()
            && self.symptoms.is_none()
            && self.previous_treatments.is_none()
            && self.diagnosed_gum_disease.is_none()
            && self.flossing.is_none()
            && self.tobacco_use.is_none()
            && self.sugary_diet.is_none()
            && self.teeth_grinding.is_none()
            && self.is_subscribed.is_none()
            && self.brushing_frequency.is_none()
    }
}

/// Read-only projection of a user consumed by the scan-report pipeline.
/// The pipeline never mutates the underlying record.
#[derive(Debug, Clone)]
pub struct PatientProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub symptoms: Vec<String>,
    pub previous_treatments: Vec<String>,
    pub brushing_frequency: Option<String>,
    pub tobacco_use: Option<bool>,
}

impl From<&User> for PatientProfile {
    fn from(user: &User) -> Self {
        PatientProfile {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            gender: user.gender.clone(),
            date_of_birth: user.date_of_birth,
            contact_number: user.contact_number.clone(),
            address: user.address.clone(),
            symptoms: decode_list_field(user.symptoms.as_ref()),
            previous_treatments: decode_list_field(user.previous_treatments.as_ref()),
            brushing_frequency: user.brushing_frequency.clone(),
            tobacco_use: user.tobacco_use,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_list_field_genuine_array() {
        let value = json!(["Toothache", "Bleeding gums"]);
        assert_eq!(
            decode_list_field(Some(&value)),
            vec!["Toothache".to_string(), "Bleeding gums".to_string()]
        );
    }

    #[test]
    fn test_decode_list_field_string_encoded_array() {
        let value = json!("[\"Filling\",\"Root canal\"]");
        assert_eq!(
            decode_list_field(Some(&value)),
            vec!["Filling".to_string(), "Root canal".to_string()]
        );
    }

    #[test]
    fn test_decode_list_field_bare_string_falls_back_to_single_element() {
        let value = json!("Sensitivity");
        assert_eq!(
            decode_list_field(Some(&value)),
            vec!["Sensitivity".to_string()]
        );
    }

    #[test]
    fn test_decode_list_field_missing_is_empty() {
        assert!(decode_list_field(None).is_empty());
        assert!(decode_list_field(Some(&serde_json::Value::Null)).is_empty());
    }

    #[test]
    fn test_update_profile_is_empty() {
        assert!(UpdateUserProfile::default().is_empty());
        let update = UpdateUserProfile {
            address: Some("12 High Street".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
