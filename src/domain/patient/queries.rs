use super::record::Patient;
use super::value_objects::PatientStatus;
use crate::store::RecordId;

// ============================================================================
// Patient Queries - read-side helpers over a loaded patient list
// ============================================================================

/// Status filter of the patient list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PatientStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: PatientStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Number of patients per status bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: usize,
    pub active: usize,
    pub inactive: usize,
    pub archived: usize,
}

/// Search by "first last" or email (case-insensitive) or phone (substring),
/// then apply the status filter. An empty term matches everyone.
pub fn search_patients(patients: &[Patient], term: &str, filter: StatusFilter) -> Vec<Patient> {
    let needle = term.to_lowercase();

    patients
        .iter()
        .filter(|patient| term.is_empty() || matches_term(patient, term, &needle))
        .filter(|patient| filter.matches(patient.status))
        .cloned()
        .collect()
}

fn matches_term(patient: &Patient, term: &str, needle: &str) -> bool {
    patient.full_name().to_lowercase().contains(needle)
        || patient.email.as_str().to_lowercase().contains(needle)
        || patient.phone.as_str().contains(term)
}

pub fn count_by_status(patients: &[Patient]) -> StatusCounts {
    patients.iter().fold(
        StatusCounts {
            all: patients.len(),
            ..StatusCounts::default()
        },
        |mut counts, patient| {
            match patient.status {
                PatientStatus::Active => counts.active += 1,
                PatientStatus::Inactive => counts.inactive += 1,
                PatientStatus::Archived => counts.archived += 1,
            }
            counts
        },
    )
}

pub fn find_patient(patients: &[Patient], id: RecordId) -> Option<&Patient> {
    patients.iter().find(|patient| patient.id == id)
}

/// Display name for a possibly dangling patient reference
pub fn patient_display_name(patients: &[Patient], id: RecordId) -> String {
    find_patient(patients, id)
        .map(Patient::full_name)
        .unwrap_or_else(|| UNKNOWN_PATIENT.to_string())
}

pub const UNKNOWN_PATIENT: &str = "Patient inconnu";

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::{Email, NewPatient, PhoneNumber};
    use crate::store::Resource;
    use chrono::Utc;

    fn patient(
        id: RecordId,
        (first, last): (&str, &str),
        email: &str,
        phone: &str,
        status: PatientStatus,
    ) -> Patient {
        let mut draft = NewPatient::named(first, last);
        draft.email = Email::new(email);
        draft.phone = PhoneNumber::new(phone);
        draft.status = status;
        Patient::from_draft(id, draft, Utc::now())
    }

    const ACTIVE: PatientStatus = PatientStatus::Active;
    const INACTIVE: PatientStatus = PatientStatus::Inactive;
    const ARCHIVED: PatientStatus = PatientStatus::Archived;

    fn roster() -> Vec<Patient> {
        vec![
            patient(1, ("Marie", "Dubois"), "marie.dubois@email.fr", "06 12 34 56 78", ACTIVE),
            patient(2, ("Pierre", "Martin"), "p.martin@email.fr", "06 98 76 54 32", INACTIVE),
            patient(3, ("Sophie", "Bernard"), "sophie.b@email.fr", "07 11 22 33 44", ACTIVE),
            patient(4, ("Luc", "Moreau"), "luc.moreau@email.fr", "06 55 44 33 22", ARCHIVED),
        ]
    }

    fn ids(patients: &[Patient]) -> Vec<RecordId> {
        patients.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_empty_term_and_all_filter_returns_everyone() {
        let found = search_patients(&roster(), "", StatusFilter::All);
        assert_eq!(ids(&found), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_full_name_is_case_insensitive() {
        let found = search_patients(&roster(), "MARIE DU", StatusFilter::All);
        assert_eq!(ids(&found), vec![1]);
    }

    #[test]
    fn test_search_matches_email_and_phone() {
        assert_eq!(ids(&search_patients(&roster(), "p.martin", StatusFilter::All)), vec![2]);
        assert_eq!(ids(&search_patients(&roster(), "07 11", StatusFilter::All)), vec![3]);
    }

    #[test]
    fn test_term_and_status_filter_combine() {
        let found = search_patients(&roster(), "email.fr", StatusFilter::Only(ACTIVE));
        assert_eq!(ids(&found), vec![1, 3]);
    }

    #[test]
    fn test_count_by_status() {
        let counts = count_by_status(&roster());
        assert_eq!(
            counts,
            StatusCounts {
                all: 4,
                active: 2,
                inactive: 1,
                archived: 1,
            }
        );
    }

    #[test]
    fn test_dangling_reference_has_placeholder_name() {
        let patients = roster();
        assert_eq!(patient_display_name(&patients, 3), "Sophie Bernard");
        assert_eq!(patient_display_name(&patients, 99), UNKNOWN_PATIENT);
    }
}
