use crate::models::Prescription;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body for appending or replacing a prescription. The `_id` is required up
/// front so every element in the sequence stays addressable by the
/// `:prescription_id` sub-routes.
#[derive(Debug, Deserialize, Validate)]
pub struct PrescriptionRequest {
    #[serde(rename = "_id")]
    #[validate(required, length(min = 1, message = "prescription _id must not be empty"))]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: Document,
}

impl PrescriptionRequest {
    /// Call after `validate()`; a missing id has been rejected by then.
    pub fn into_prescription(self) -> Prescription {
        Prescription {
            id: self.id.unwrap_or_default(),
            fields: self.fields,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
