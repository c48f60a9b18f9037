// ============================================================================
// Appointment Domain
// ============================================================================
//
// - Value objects (AppointmentStatus, Payment)
// - Record (Appointment, NewAppointment, AppointmentPatch) and its store alias
// - Queries (per patient, per day, per week, revenue)
//
// ============================================================================

pub mod value_objects;
pub mod record;
pub mod queries;

pub use value_objects::*;
pub use record::*;
pub use queries::*;
