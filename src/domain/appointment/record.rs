use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{RecordId, Resource, ResourceStore, StoreResult};
use super::value_objects::{AppointmentStatus, Payment, DEFAULT_SESSION_MINUTES};

// ============================================================================
// Appointment Record
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "Id")]
    pub id: RecordId,

    /// Soft reference to `Patient::id`, never checked
    pub patient_id: RecordId,
    pub date: DateTime<Utc>,
    /// Minutes
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub appointment_type: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub reminder_sent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
}

fn default_duration() -> u32 {
    DEFAULT_SESSION_MINUTES
}

impl Appointment {
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.date + chrono::Duration::minutes(i64::from(self.duration))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_id: RecordId,
    pub date: DateTime<Utc>,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(rename = "type", default)]
    pub appointment_type: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment: Option<Payment>,
}

impl NewAppointment {
    pub fn new(patient_id: RecordId, date: DateTime<Utc>) -> Self {
        Self {
            patient_id,
            date,
            duration: DEFAULT_SESSION_MINUTES,
            appointment_type: None,
            status: AppointmentStatus::Scheduled,
            notes: None,
            payment: None,
        }
    }
}

/// Partial update. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentPatch {
    pub patient_id: Option<RecordId>,
    pub date: Option<DateTime<Utc>>,
    pub duration: Option<u32>,
    pub appointment_type: Option<Option<String>>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<Option<String>>,
    pub reminder_sent: Option<bool>,
    pub payment: Option<Option<Payment>>,
}

impl AppointmentPatch {
    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Resource for Appointment {
    type Draft = NewAppointment;
    type Patch = AppointmentPatch;

    const KIND: &'static str = "Appointment";

    fn id(&self) -> RecordId {
        self.id
    }

    /// New appointments never start with a reminder sent
    fn from_draft(id: RecordId, draft: NewAppointment, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            patient_id: draft.patient_id,
            date: draft.date,
            duration: draft.duration,
            appointment_type: draft.appointment_type,
            status: draft.status,
            notes: draft.notes,
            reminder_sent: false,
            payment: draft.payment,
        }
    }

    fn apply_patch(&mut self, patch: AppointmentPatch) {
        if let Some(patient_id) = patch.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(appointment_type) = patch.appointment_type {
            self.appointment_type = appointment_type;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(reminder_sent) = patch.reminder_sent {
            self.reminder_sent = reminder_sent;
        }
        if let Some(payment) = patch.payment {
            self.payment = payment;
        }
    }
}

pub type AppointmentStore = ResourceStore<Appointment>;

// Status transitions used by the agenda. No state machine: any appointment
// can be marked, the store only checks that it exists.
impl ResourceStore<Appointment> {
    pub async fn complete(&self, id: RecordId) -> StoreResult<Appointment> {
        self.update(id, AppointmentPatch::status(AppointmentStatus::Completed))
            .await
    }

    pub async fn cancel(&self, id: RecordId) -> StoreResult<Appointment> {
        self.update(id, AppointmentPatch::status(AppointmentStatus::Cancelled))
            .await
    }

    pub async fn mark_reminder_sent(&self, id: RecordId) -> StoreResult<Appointment> {
        self.update(
            id,
            AppointmentPatch {
                reminder_sent: Some(true),
                ..AppointmentPatch::default()
            },
        )
        .await
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
