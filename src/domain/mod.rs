// ============================================================================
// Domain Layer - Practice Records
// ============================================================================
//
// One subdirectory per record type held by a `ResourceStore`:
// - Value objects
// - Record, draft and patch types plus the `Resource` implementation
// - Read-side queries over loaded records
//
// The records reference each other by id only. Nothing here enforces that
// a referenced patient or appointment exists.
//
// ============================================================================

pub mod patient;
pub mod appointment;
pub mod session_note;
