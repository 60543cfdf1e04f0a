use super::parse_object_id;
use crate::dtos::{MessageResponse, PrescriptionRequest, UpdateResponse};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use mongodb::bson::{doc, to_bson};
use mongodb::options::FindOneOptions;
use service_core::error::AppError;
use validator::Validate;

pub async fn list_prescriptions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let patient_id = parse_object_id(&id)?;

    let options = FindOneOptions::builder()
        .projection(doc! { "prescriptions": 1 })
        .build();

    let patient = state
        .db
        .patients()
        .find_one(doc! { "_id": patient_id }, options)
        .await
        .map_err(|e| {
            tracing::error!(patient_id = %patient_id, "Failed to fetch prescriptions: {}", e);
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Patient not found")))?;

    Ok(Json(patient.prescriptions))
}

pub async fn add_prescription(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PrescriptionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let patient_id = parse_object_id(&id)?;
    payload.validate()?;
    let prescription = payload.into_prescription();

    let prescription_doc = to_bson(&prescription).map_err(|e| {
        AppError::InternalError(anyhow::anyhow!("Failed to serialize prescription: {}", e))
    })?;

    let result = state
        .db
        .patients()
        .update_one(
            doc! { "_id": patient_id },
            doc! { "$push": { "prescriptions": prescription_doc } },
            None,
        )
        .await
        .map_err(|e| {
            tracing::error!(patient_id = %patient_id, "Failed to add prescription: {}", e);
            AppError::from(e)
        })?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Patient not found")));
    }

    tracing::info!(
        patient_id = %patient_id,
        prescription_id = %prescription.id,
        "Prescription added"
    );

    Ok(Json(UpdateResponse::from(result)))
}

pub async fn update_prescription(
    State(state): State<AppState>,
    Path((id, prescription_id)): Path<(String, String)>,
    Json(payload): Json<PrescriptionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let patient_id = parse_object_id(&id)?;
    payload.validate()?;
    let prescription = payload.into_prescription();

    let prescription_doc = to_bson(&prescription).map_err(|e| {
        AppError::InternalError(anyhow::anyhow!("Failed to serialize prescription: {}", e))
    })?;

    // Positional $set replaces the first element whose _id matched the
    // filter; the element keeps its position in the sequence.
    let result = state
        .db
        .patients()
        .update_one(
            doc! { "_id": patient_id, "prescriptions._id": &prescription_id },
            doc! { "$set": { "prescriptions.$": prescription_doc } },
            None,
        )
        .await
        .map_err(|e| {
            tracing::error!(
                patient_id = %patient_id,
                prescription_id = %prescription_id,
                "Failed to update prescription: {}",
                e
            );
            AppError::from(e)
        })?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Patient or prescription not found"
        )));
    }

    Ok(Json(UpdateResponse::from(result)))
}

pub async fn remove_prescription(
    State(state): State<AppState>,
    Path((id, prescription_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let patient_id = parse_object_id(&id)?;

    let result = state
        .db
        .patients()
        .update_one(
            doc! { "_id": patient_id },
            doc! { "$pull": { "prescriptions": { "_id": &prescription_id } } },
            None,
        )
        .await
        .map_err(|e| {
            tracing::error!(
                patient_id = %patient_id,
                prescription_id = %prescription_id,
                "Failed to delete prescription: {}",
                e
            );
            AppError::from(e)
        })?;

    // $pull on a missing patient and on a missing prescription both modify
    // nothing; either way there was nothing to delete.
    if result.modified_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Patient or prescription not found"
        )));
    }

    tracing::info!(
        patient_id = %patient_id,
        prescription_id = %prescription_id,
        "Prescription deleted"
    );

    Ok(Json(MessageResponse {
        message: "Prescription deleted successfully".to_string(),
    }))
}
