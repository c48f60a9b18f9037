// ============================================================================
// Session Note Domain
// ============================================================================
//
// - Value objects (NoteTemplate)
// - Record (SessionNote, NewSessionNote, SessionNotePatch) and its store alias
// - Queries (note feed filtering)
//
// ============================================================================

pub mod value_objects;
pub mod record;
pub mod queries;

pub use value_objects::*;
pub use record::*;
pub use queries::*;
