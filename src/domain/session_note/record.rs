use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{RecordId, Resource, ResourceStore};
use super::value_objects::NoteTemplate;

// ============================================================================
// Session Note Record
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionNote {
    #[serde(rename = "Id")]
    pub id: RecordId,

    pub patient_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<RecordId>,
    pub date: DateTime<Utc>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<NoteTemplate>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Creation input. `date` defaults to the creation time and `attachments`
/// to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewSessionNote {
    pub patient_id: RecordId,
    pub appointment_id: Option<RecordId>,
    pub date: Option<DateTime<Utc>>,
    pub content: String,
    pub template: Option<NoteTemplate>,
    pub attachments: Option<Vec<String>>,
}

impl NewSessionNote {
    pub fn new(patient_id: RecordId, content: impl Into<String>) -> Self {
        Self {
            patient_id,
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn for_appointment(mut self, appointment_id: RecordId) -> Self {
        self.appointment_id = Some(appointment_id);
        self
    }

    pub fn with_template(mut self, template: NoteTemplate) -> Self {
        self.template = Some(template);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionNotePatch {
    pub patient_id: Option<RecordId>,
    pub appointment_id: Option<Option<RecordId>>,
    pub date: Option<DateTime<Utc>>,
    pub content: Option<String>,
    pub template: Option<Option<NoteTemplate>>,
    pub attachments: Option<Vec<String>>,
}

impl Resource for SessionNote {
    type Draft = NewSessionNote;
    type Patch = SessionNotePatch;

    const KIND: &'static str = "Session note";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewSessionNote, now: DateTime<Utc>) -> Self {
        Self {
            id,
            patient_id: draft.patient_id,
            appointment_id: draft.appointment_id,
            date: draft.date.unwrap_or(now),
            content: draft.content,
            template: draft.template,
            attachments: draft.attachments.unwrap_or_default(),
        }
    }

    fn apply_patch(&mut self, patch: SessionNotePatch) {
        if let Some(patient_id) = patch.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(appointment_id) = patch.appointment_id {
            self.appointment_id = appointment_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(template) = patch.template {
            self.template = template;
        }
        if let Some(attachments) = patch.attachments {
            self.attachments = attachments;
        }
    }
}

pub type SessionNoteStore = ResourceStore<SessionNote>;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Latency;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_create_fills_date_and_attachments() {
        let store = SessionNoteStore::empty(Latency::None);
        let before = Utc::now();

        let note = store
            .create(
                NewSessionNote::new(1, "Première séance").with_template(NoteTemplate::Hypnose),
            )
            .await
            .unwrap();

        assert_eq!(note.id, 1);
        assert!(note.date >= before);
        assert!(note.attachments.is_empty());
        assert_eq!(note.template, Some(NoteTemplate::Hypnose));
        assert_eq!(note.appointment_id, None);
    }

    #[tokio::test]
    async fn test_supplied_date_and_attachments_are_kept() {
        let store = SessionNoteStore::empty(Latency::None);
        let date = Utc.with_ymd_and_hms(2024, 5, 20, 15, 0, 0).unwrap();
        let draft = NewSessionNote {
            date: Some(date),
            attachments: Some(vec!["bilan.pdf".to_string()]),
            ..NewSessionNote::new(2, "Suivi").for_appointment(7)
        };

        let note = store.create(draft).await.unwrap();

        assert_eq!(note.date, date);
        assert_eq!(note.attachments, vec!["bilan.pdf".to_string()]);
        assert_eq!(note.appointment_id, Some(7));
    }

    #[tokio::test]
    async fn test_update_content_keeps_links() {
        let store = SessionNoteStore::empty(Latency::None);
        store
            .create(NewSessionNote::new(2, "Brouillon").for_appointment(3))
            .await
            .unwrap();

        let updated = store
            .update(
                1,
                SessionNotePatch {
                    content: Some("Version finale".to_string()),
                    ..SessionNotePatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.content, "Version finale");
        assert_eq!(updated.patient_id, 2);
        assert_eq!(updated.appointment_id, Some(3));
    }

    #[tokio::test]
    async fn test_missing_note_error_reads_naturally() {
        let store = SessionNoteStore::empty(Latency::None);

        let err = store.delete(3).await.unwrap_err();

        assert_eq!(err.to_string(), "Session note not found: 3");
    }

    #[test]
    fn test_note_json_without_optional_fields() {
        let json = r#"{
            "Id": 5,
            "patientId": 1,
            "date": "2024-05-20T15:00:00Z",
            "content": "Séance de relaxation"
        }"#;

        let note: SessionNote = serde_json::from_str(json).unwrap();
        assert!(note.attachments.is_empty());
        assert_eq!(note.template, None);

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["Id"], 5);
        assert!(value.get("appointmentId").is_none());
        assert_eq!(value["attachments"], serde_json::json!([]));
    }
}
