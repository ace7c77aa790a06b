pub mod appointments;
pub mod auth;
pub mod doctors;
pub mod orders;
pub mod products;
pub mod profile;
pub mod scans;

use serde::Serialize;
use utoipa::ToSchema;

/// Plain acknowledgement body used by mutation endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
