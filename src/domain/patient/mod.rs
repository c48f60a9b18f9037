// ============================================================================
// Patient Domain
// ============================================================================
//
// - Value objects (Email, PhoneNumber, PatientStatus)
// - Record (Patient, NewPatient, PatientPatch) and its store alias
// - Queries (search, status counts, display names)
//
// ============================================================================

pub mod value_objects;
pub mod record;
pub mod queries;

pub use value_objects::*;
pub use record::*;
pub use queries::*;
