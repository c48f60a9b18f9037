use chrono::{DateTime, Utc};

// ============================================================================
// Resource Trait - Record Contract
// ============================================================================
//
// Every collection owned by a `ResourceStore` holds records implementing
// this trait. The store knows nothing about patients, appointments or notes;
// it only needs to:
// 1. Read a record's identifier
// 2. Build a record from a draft once it has picked the next identifier
// 3. Merge a partial update onto a record
//
// Drafts and patches carry no identifier. Identity is owned by the store.
//
// ============================================================================

/// Store-assigned identifier, unique within one store. Always >= 1.
pub type RecordId = u32;

/// Generic record trait - patients, appointments and session notes implement this
///
/// Associated types:
/// - `Draft`: creation input, turned into a record by `from_draft`
/// - `Patch`: partial update, merged by `apply_patch`
pub trait Resource: Clone + Send + Sync + 'static {
    type Draft: Send + 'static;
    type Patch: Send + 'static;

    /// Human readable kind used in errors, logs and metric labels (e.g. "Patient")
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    /// Build the stored record, applying store-specific defaults
    fn from_draft(id: RecordId, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Shallow merge: only fields present in the patch change
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// `max(existing ids, 0) + 1`, or `None` once `RecordId::MAX` is taken
pub fn next_id<R: Resource>(records: &[R]) -> Option<RecordId> {
    records.iter().map(Resource::id).max().unwrap_or(0).checked_add(1)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Minimal record used to exercise the generic store in isolation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Tag {
        pub id: RecordId,
        pub label: String,
        pub status: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct TagPatch {
        pub label: Option<String>,
        pub status: Option<String>,
    }

    impl Resource for Tag {
        type Draft = String;
        type Patch = TagPatch;

        const KIND: &'static str = "Tag";

        fn id(&self) -> RecordId {
            self.id
        }

        fn from_draft(id: RecordId, label: String, now: DateTime<Utc>) -> Self {
            Self {
                id,
                label,
                status: "active".to_string(),
                created_at: now,
            }
        }

        fn apply_patch(&mut self, patch: TagPatch) {
            if let Some(label) = patch.label {
                self.label = label;
            }
            if let Some(status) = patch.status {
                self.status = status;
            }
        }
    }

    pub fn tag(id: RecordId, label: &str) -> Tag {
        Tag::from_draft(id, label.to_string(), Utc::now())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::test_support::{tag, Tag};
    use super::*;

    #[test]
    fn test_next_id_on_empty_collection_is_one() {
        let records: Vec<Tag> = vec![];
        assert_eq!(next_id(&records), Some(1));
    }

    #[test]
    fn test_next_id_uses_maximum_not_length() {
        let records = vec![tag(3, "a"), tag(9, "b"), tag(4, "c")];
        assert_eq!(next_id(&records), Some(10));
    }

    #[test]
    fn test_next_id_after_maximum_id_is_none() {
        let records = vec![tag(1, "a"), tag(RecordId::MAX, "b")];
        assert_eq!(next_id(&records), None);
    }
}
