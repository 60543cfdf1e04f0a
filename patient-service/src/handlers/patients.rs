use super::parse_object_id;
use crate::dtos::{
    CreatePatientRequest, DeleteResponse, InsertPatientResponse, PatientResponse,
    UpdatePatientRequest, UpdateResponse,
};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use service_core::error::AppError;

pub async fn list_patients(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut cursor = state
        .db
        .patients()
        .find(doc! {}, None)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch patients: {}", e);
            AppError::from(e)
        })?;

    let mut patients = Vec::new();
    while let Some(patient) = cursor.try_next().await.map_err(AppError::from)? {
        patients.push(PatientResponse::from(patient));
    }

    Ok(Json(patients))
}

pub async fn create_patient(
    State(state): State<AppState>,
    Json(payload): Json<CreatePatientRequest>,
) -> Result<impl IntoResponse, AppError> {
    let patient = payload.into_patient();

    let result = state
        .db
        .patients()
        .insert_one(&patient, None)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert patient: {}", e);
            AppError::from(e)
        })?;

    let inserted_id = result.inserted_id.as_object_id().ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!("Insert did not return an ObjectId"))
    })?;

    tracing::info!(patient_id = %inserted_id, "Patient created");

    Ok(Json(InsertPatientResponse {
        inserted_id: inserted_id.to_hex(),
    }))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePatientRequest>,
) -> Result<impl IntoResponse, AppError> {
    let patient_id = parse_object_id(&id)?;
    let fields = payload.into_set_document()?;

    let result = state
        .db
        .patients()
        .update_one(doc! { "_id": patient_id }, doc! { "$set": fields }, None)
        .await
        .map_err(|e| {
            tracing::error!(patient_id = %patient_id, "Failed to update patient: {}", e);
            AppError::from(e)
        })?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!("Patient not found")));
    }

    Ok(Json(UpdateResponse::from(result)))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let patient_id = parse_object_id(&id)?;

    let result = state
        .db
        .patients()
        .delete_one(doc! { "_id": patient_id }, None)
        .await
        .map_err(|e| {
            tracing::error!(patient_id = %patient_id, "Failed to delete patient: {}", e);
            AppError::from(e)
        })?;

    tracing::info!(patient_id = %patient_id, deleted = result.deleted_count, "Patient delete");

    // Deleting an unknown id is not an error; the count tells the caller.
    Ok(Json(DeleteResponse {
        deleted_count: result.deleted_count,
    }))
}
