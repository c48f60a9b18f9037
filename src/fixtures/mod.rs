use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::appointment::Appointment;
use crate::domain::patient::Patient;
use crate::domain::session_note::SessionNote;
use crate::store::{RecordId, Resource};

// ============================================================================
// Fixtures - seed datasets for the stores
// ============================================================================
//
// Three JSON arrays, one per store. The bundled copies are compiled into the
// crate; a directory holding files with the same names can replace them.
//
// Every record must carry a positive id below `RecordId::MAX`, unique
// within its dataset.
// ============================================================================

pub const PATIENTS_FILE: &str = "patients.json";
pub const APPOINTMENTS_FILE: &str = "appointments.json";
pub const SESSION_NOTES_FILE: &str = "session_notes.json";

const BUNDLED_PATIENTS: &str = include_str!("data/patients.json");
const BUNDLED_APPOINTMENTS: &str = include_str!("data/appointments.json");
const BUNDLED_SESSION_NOTES: &str = include_str!("data/session_notes.json");

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {dataset} fixture: {source}")]
    Parse {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{dataset} fixture contains a record with a non-positive id")]
    NonPositiveId { dataset: &'static str },

    #[error("{dataset} fixture contains id {id}, leaving no identifier for new records")]
    IdOutOfRange { dataset: &'static str, id: RecordId },

    #[error("{dataset} fixture contains duplicate id {id}")]
    DuplicateId { dataset: &'static str, id: RecordId },
}

pub type FixtureResult<T> = Result<T, FixtureError>;

/// Loaded seed data. Stores receive clones, never the set itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureSet {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub session_notes: Vec<SessionNote>,
}

impl FixtureSet {
    /// Datasets shipped with the crate
    pub fn bundled() -> FixtureResult<Self> {
        Self::from_json(BUNDLED_PATIENTS, BUNDLED_APPOINTMENTS, BUNDLED_SESSION_NOTES)
    }

    /// Read `patients.json`, `appointments.json` and `session_notes.json`
    /// from `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> FixtureResult<Self> {
        let dir = dir.as_ref();

        let patients = read_file(&dir.join(PATIENTS_FILE))?;
        let appointments = read_file(&dir.join(APPOINTMENTS_FILE))?;
        let session_notes = read_file(&dir.join(SESSION_NOTES_FILE))?;

        let fixtures = Self::from_json(&patients, &appointments, &session_notes)?;
        tracing::info!(dir = %dir.display(), "📂 Loaded fixtures from directory");
        Ok(fixtures)
    }

    pub fn from_json(
        patients: &str,
        appointments: &str,
        session_notes: &str,
    ) -> FixtureResult<Self> {
        let fixtures = Self {
            patients: parse_dataset(patients)?,
            appointments: parse_dataset(appointments)?,
            session_notes: parse_dataset(session_notes)?,
        };

        tracing::debug!(
            patients = fixtures.patients.len(),
            appointments = fixtures.appointments.len(),
            session_notes = fixtures.session_notes.len(),
            "Fixtures parsed"
        );

        Ok(fixtures)
    }
}

fn read_file(path: &Path) -> FixtureResult<String> {
    std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_dataset<R: Resource + DeserializeOwned>(json: &str) -> FixtureResult<Vec<R>> {
    let records: Vec<R> = serde_json::from_str(json).map_err(|source| FixtureError::Parse {
        dataset: R::KIND,
        source,
    })?;
    validate_ids(&records)?;
    Ok(records)
}

fn validate_ids<R: Resource>(records: &[R]) -> FixtureResult<()> {
    let mut seen = HashSet::with_capacity(records.len());

    for record in records {
        let id = record.id();
        if id == 0 {
            return Err(FixtureError::NonPositiveId { dataset: R::KIND });
        }
        if id == RecordId::MAX {
            return Err(FixtureError::IdOutOfRange { dataset: R::KIND, id });
        }
        if !seen.insert(id) {
            return Err(FixtureError::DuplicateId { dataset: R::KIND, id });
        }
    }

    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const NO_RECORDS: &str = "[]";

    fn patients_json(ids: &[i64]) -> String {
        let records: Vec<String> = ids
            .iter()
            .map(|id| {
                format!(
                    concat!(
                        r#"{{"Id": {id}, "firstName": "A", "lastName": "B", "#,
                        r#""createdAt": "2024-01-01T00:00:00Z"}}"#,
                    ),
                    id = id
                )
            })
            .collect();
        format!("[{}]", records.join(","))
    }

    #[test]
    fn test_bundled_fixtures_load() {
        let fixtures = FixtureSet::bundled().unwrap();

        assert_eq!(fixtures.patients.len(), 5);
        assert_eq!(fixtures.appointments.len(), 7);
        assert_eq!(fixtures.session_notes.len(), 4);
        assert_eq!(fixtures.patients[0].full_name(), "Marie Dubois");
    }

    #[test]
    fn test_zero_id_is_rejected() {
        let json = patients_json(&[1, 0]);
        let err = FixtureSet::from_json(&json, NO_RECORDS, NO_RECORDS).unwrap_err();

        assert!(matches!(err, FixtureError::NonPositiveId { dataset: "Patient" }));
    }

    #[test]
    fn test_negative_id_fails_to_parse() {
        let err = FixtureSet::from_json(&patients_json(&[-3]), NO_RECORDS, NO_RECORDS).unwrap_err();

        assert!(matches!(err, FixtureError::Parse { dataset: "Patient", .. }));
    }

    #[test]
    fn test_maximum_id_is_rejected() {
        let json = patients_json(&[1, 4_294_967_295]);
        let err = FixtureSet::from_json(&json, NO_RECORDS, NO_RECORDS).unwrap_err();

        assert!(matches!(
            err,
            FixtureError::IdOutOfRange { dataset: "Patient", id } if id == RecordId::MAX
        ));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let json = patients_json(&[1, 2, 1]);
        let err = FixtureSet::from_json(&json, NO_RECORDS, NO_RECORDS).unwrap_err();

        assert!(matches!(err, FixtureError::DuplicateId { dataset: "Patient", id: 1 }));
        assert_eq!(err.to_string(), "Patient fixture contains duplicate id 1");
    }

    #[test]
    fn test_malformed_json_names_the_dataset() {
        let err = FixtureSet::from_json(NO_RECORDS, "{not json", NO_RECORDS).unwrap_err();

        assert!(matches!(err, FixtureError::Parse { dataset: "Appointment", .. }));
    }

    #[test]
    fn test_from_dir_reads_the_three_files() {
        let dir = std::env::temp_dir().join(format!("theraflow-fixtures-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(PATIENTS_FILE), patients_json(&[4, 8])).unwrap();
        std::fs::write(dir.join(APPOINTMENTS_FILE), NO_RECORDS).unwrap();
        std::fs::write(dir.join(SESSION_NOTES_FILE), NO_RECORDS).unwrap();

        let fixtures = FixtureSet::from_dir(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        let ids: Vec<_> = fixtures.patients.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 8]);
        assert!(fixtures.appointments.is_empty());
    }

    #[test]
    fn test_from_missing_dir_is_io_error() {
        let err = FixtureSet::from_dir("/nonexistent/theraflow/fixtures").unwrap_err();

        assert!(matches!(err, FixtureError::Io { .. }));
    }
}
