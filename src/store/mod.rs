// ============================================================================
// Resource Store - Generic In-Memory Collection Layer
// ============================================================================
//
// This module contains GENERIC store infrastructure.
// Record types (patients, appointments, notes) live in src/domain/
//
// Key Principles:
// - No domain-specific code
// - Generic over record types through the `Resource` trait
// - One store instance per record type per session
//
// ============================================================================

mod errors;
mod latency;
mod resource;
mod resource_store;

pub use errors::{StoreError, StoreResult};
pub use latency::Latency;
pub use resource::{next_id, RecordId, Resource};
pub use resource_store::ResourceStore;
