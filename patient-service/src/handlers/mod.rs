use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

pub mod health;
pub mod patients;
pub mod prescriptions;

pub use health::health_check;
pub use patients::{create_patient, delete_patient, list_patients, update_patient};
pub use prescriptions::{
    add_prescription, list_prescriptions, remove_prescription, update_prescription,
};

/// Patient ids arrive as hex path segments; anything that does not parse is a
/// client error, not a storage failure.
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Malformed patient id: {}", id)))
}
