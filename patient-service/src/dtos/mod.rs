pub mod patients;
pub mod prescriptions;

pub use patients::{
    CreatePatientRequest, DeleteResponse, InsertPatientResponse, PatientResponse,
    UpdatePatientRequest, UpdateResponse,
};
pub use prescriptions::{MessageResponse, PrescriptionRequest};
