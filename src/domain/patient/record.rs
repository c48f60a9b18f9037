use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{RecordId, Resource, ResourceStore};
use super::value_objects::{Email, PatientStatus, PhoneNumber};

// ============================================================================
// Patient Record
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "Id")]
    pub id: RecordId,

    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Email,
    #[serde(default)]
    pub phone: PhoneNumber,
    #[serde(default)]
    pub status: PatientStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == PatientStatus::Active
    }
}

/// Creation input. Everything except the name may be left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: PhoneNumber,
    pub status: PatientStatus,
    pub date_of_birth: Option<NaiveDate>,
    pub notes: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
}

impl NewPatient {
    pub fn named(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }
}

/// Partial update. `None` leaves a field untouched; for optional fields
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub status: Option<PatientStatus>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub notes: Option<Option<String>>,
    pub allergies: Option<Option<String>>,
    pub medical_history: Option<Option<String>>,
}

impl PatientPatch {
    pub fn status(status: PatientStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Resource for Patient {
    type Draft = NewPatient;
    type Patch = PatientPatch;

    const KIND: &'static str = "Patient";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewPatient, now: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            status: draft.status,
            date_of_birth: draft.date_of_birth,
            notes: draft.notes,
            allergies: draft.allergies,
            medical_history: draft.medical_history,
            created_at: now,
        }
    }

    fn apply_patch(&mut self, patch: PatientPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(allergies) = patch.allergies {
            self.allergies = allergies;
        }
        if let Some(medical_history) = patch.medical_history {
            self.medical_history = medical_history;
        }
    }
}

pub type PatientStore = ResourceStore<Patient>;

// ============================================================================
// Unit Tests
// ============================================================================
