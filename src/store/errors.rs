use super::resource::RecordId;

// ============================================================================
// Store Errors
// ============================================================================
//
// `NotFound` is the only domain outcome a store can fail with. It is raised
// by `update` and `delete` and must reach the caller untouched.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: RecordId },

    /// Every identifier up to `RecordId::MAX` is taken by an existing record.
    #[error("{kind} store has no identifier left above {max}", max = RecordId::MAX)]
    IdsExhausted { kind: &'static str },

    /// The runtime shut down before a spawned mutation reported back.
    #[error("{kind} store operation interrupted before completion")]
    Interrupted { kind: &'static str },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// ============================================================================
// Unit Tests
// ============================================================================
