use crate::models::{Patient, Prescription};
use mongodb::bson::Document;
use mongodb::results::UpdateResult;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CreatePatientRequest {
    #[serde(flatten)]
    pub fields: Document,
}

impl CreatePatientRequest {
    /// The stored document always starts with a server-assigned `_id` and an
    /// empty prescriptions sequence, whatever the caller sent.
    pub fn into_patient(mut self) -> Patient {
        self.fields.remove("_id");
        self.fields.remove("prescriptions");
        Patient {
            id: None,
            prescriptions: Vec::new(),
            fields: self.fields,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePatientRequest {
    #[serde(flatten)]
    pub fields: Document,
}

impl UpdatePatientRequest {
    pub fn into_set_document(self) -> Result<Document, AppError> {
        if self.fields.contains_key("_id") {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Patient _id cannot be modified"
            )));
        }
        if self.fields.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Update body must contain at least one field"
            )));
        }
        Ok(self.fields)
    }
}

#[derive(Debug, Serialize)]
pub struct PatientResponse {
    pub id: String,
    pub prescriptions: Vec<Prescription>,
    #[serde(flatten)]
    pub fields: Document,
}

impl From<Patient> for PatientResponse {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id.map(|id| id.to_hex()).unwrap_or_default(),
            prescriptions: patient.prescriptions,
            fields: patient.fields,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InsertPatientResponse {
    pub inserted_id: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateResult> for UpdateResponse {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted_count: u64,
}
