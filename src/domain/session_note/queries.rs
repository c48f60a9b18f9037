use super::record::SessionNote;
use crate::domain::patient::{find_patient, Patient};
use crate::store::RecordId;

// ============================================================================
// Session Note Queries
// ============================================================================

/// Note list filter. Both criteria are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub patient_id: Option<RecordId>,
    pub term: String,
}

impl NoteFilter {
    pub fn for_patient(patient_id: RecordId) -> Self {
        Self {
            patient_id: Some(patient_id),
            ..Self::default()
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            patient_id: None,
            term: term.into(),
        }
    }
}

/// Apply `filter`, newest note first. The term matches content, the
/// author patient's full name or the template name, case-insensitively.
pub fn filter_notes(
    notes: &[SessionNote],
    patients: &[Patient],
    filter: &NoteFilter,
) -> Vec<SessionNote> {
    let needle = filter.term.to_lowercase();

    let mut found: Vec<SessionNote> = notes
        .iter()
        .filter(|note| filter.patient_id.map_or(true, |id| note.patient_id == id))
        .filter(|note| needle.is_empty() || matches_term(note, patients, &needle))
        .cloned()
        .collect();
    found.sort_by(|a, b| b.date.cmp(&a.date));
    found
}

fn matches_term(note: &SessionNote, patients: &[Patient], needle: &str) -> bool {
    if note.content.to_lowercase().contains(needle) {
        return true;
    }

    let by_patient = find_patient(patients, note.patient_id)
        .is_some_and(|patient| patient.full_name().to_lowercase().contains(needle));

    by_patient
        || note
            .template
            .as_ref()
            .is_some_and(|template| template.as_str().to_lowercase().contains(needle))
}

// ============================================================================
// Unit Tests
// ============================================================================
