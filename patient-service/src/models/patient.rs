use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A patient record. Beyond the identifier and the prescriptions sequence the
/// document is schemaless: whatever fields the caller supplied are kept as-is
/// in `fields`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// Assigned by MongoDB on insert, immutable afterwards.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Always a sequence in insertion order. Documents written by other tools
    /// may lack the field entirely, which reads back as empty.
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
    #[serde(flatten)]
    pub fields: Document,
}

/// A prescription nested in a patient's `prescriptions` sequence. The id is a
/// caller-supplied string, matched by value; the system enforces no
/// uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Document,
}
