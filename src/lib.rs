// ============================================================================
// theraflow - practice records for independent therapists
// ============================================================================
//
// Layers:
// - store:    generic in-memory resource store with simulated latency
// - domain:   patient, appointment and session note records and queries
// - fixtures: seed datasets
// - practice: composition root, views and settings
// - config / metrics: ambient concerns
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod fixtures;
pub mod metrics;
pub mod practice;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use fixtures::{FixtureError, FixtureSet};
pub use metrics::Metrics;
pub use practice::Practice;
pub use store::{Latency, RecordId, Resource, ResourceStore, StoreError, StoreResult};
