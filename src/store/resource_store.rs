use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::metrics::{Metrics, Outcome};
use super::errors::{StoreError, StoreResult};
use super::latency::Latency;
use super::resource::{next_id, RecordId, Resource};

// ============================================================================
// Generic Resource Store - In-Memory Collection Service
// ============================================================================
//
// This is a GENERIC store that works with ANY record type.
//
// Type Parameter:
// - `R`: The record type (must implement the Resource trait)
//
// Responsibilities:
// 1. Own the ordered record collection, seeded from a fixture copy
// 2. Assign identifiers (max + 1) and apply creation defaults
// 3. Shallow-merge partial updates, remove by identity
// 4. Hand out copies only, never the live collection
//
// Concurrency:
// - Each operation waits for one latency sample BEFORE taking the lock
// - The identifier computation and the collection mutation happen under
//   one lock acquisition, so concurrent creates never share an id
// - Mutations run on a spawned task: dropping the caller's future does not
//   cancel them
//
// ============================================================================

pub struct ResourceStore<R: Resource> {
    inner: Arc<StoreInner<R>>,
}

struct StoreInner<R> {
    records: Mutex<Vec<R>>,
    latency: Latency,
    metrics: Option<Arc<Metrics>>,
}

impl<R: Resource> Clone for ResourceStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Resource> ResourceStore<R> {
    /// Create a store owning `seed` (already a private copy of the fixture)
    pub fn new(seed: Vec<R>, latency: Latency) -> Self {
        Self::build(seed, latency, None)
    }

    pub fn with_metrics(seed: Vec<R>, latency: Latency, metrics: Arc<Metrics>) -> Self {
        Self::build(seed, latency, Some(metrics))
    }

    pub fn empty(latency: Latency) -> Self {
        Self::new(Vec::new(), latency)
    }

    fn build(seed: Vec<R>, latency: Latency, metrics: Option<Arc<Metrics>>) -> Self {
        if let Some(metrics) = &metrics {
            metrics.set_record_count(R::KIND, seed.len());
        }

        tracing::debug!(store = R::KIND, records = seed.len(), "Store seeded");

        Self {
            inner: Arc::new(StoreInner {
                records: Mutex::new(seed),
                latency,
                metrics,
            }),
        }
    }

    pub fn kind(&self) -> &'static str {
        R::KIND
    }

    /// All records in insertion order. The returned vector is a copy.
    pub async fn get_all(&self) -> Vec<R> {
        let started = Instant::now();
        self.inner.latency.wait().await;

        let records = self.inner.records.lock().await.clone();

        tracing::debug!(store = R::KIND, count = records.len(), "Listed records");
        self.inner.observe("get_all", started, Outcome::Ok);
        records
    }

    /// Absence is not an error: a missing id yields `None`.
    pub async fn get_by_id(&self, id: RecordId) -> Option<R> {
        let started = Instant::now();
        self.inner.latency.wait().await;

        let record = self
            .inner
            .records
            .lock()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned();

        tracing::debug!(store = R::KIND, id, found = record.is_some(), "Looked up record");
        self.inner.observe("get_by_id", started, Outcome::Ok);
        record
    }

    /// Append a new record with id `max(existing, 0) + 1`. Fails only when
    /// a record already holds `RecordId::MAX`, which fixtures never load.
    pub async fn create(&self, draft: R::Draft) -> StoreResult<R> {
        self.run_mutation("create", move |records| {
            let id = next_id(records).ok_or(StoreError::IdsExhausted { kind: R::KIND })?;
            let record = R::from_draft(id, draft, Utc::now());
            records.push(record.clone());

            tracing::info!(store = R::KIND, id, "✅ Created record");
            Ok(record)
        })
        .await
    }

    /// Merge `patch` onto a copy of the record, then commit the copy
    pub async fn update(&self, id: RecordId, patch: R::Patch) -> StoreResult<R> {
        self.run_mutation("update", move |records| {
            let slot = records
                .iter_mut()
                .find(|record| record.id() == id)
                .ok_or(StoreError::NotFound { kind: R::KIND, id })?;

            let mut updated = slot.clone();
            updated.apply_patch(patch);
            debug_assert_eq!(updated.id(), id);
            *slot = updated.clone();

            tracing::info!(store = R::KIND, id, "✅ Updated record");
            Ok(updated)
        })
        .await
    }

    pub async fn delete(&self, id: RecordId) -> StoreResult<()> {
        self.run_mutation("delete", move |records| {
            let index = records
                .iter()
                .position(|record| record.id() == id)
                .ok_or(StoreError::NotFound { kind: R::KIND, id })?;

            records.remove(index);

            tracing::info!(store = R::KIND, id, "✅ Deleted record");
            Ok(())
        })
        .await
    }

    /// Current record count, without simulated latency
    pub async fn len(&self) -> usize {
        self.inner.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Replace the whole collection, as a reload from fixtures would
    pub async fn reseed(&self, records: Vec<R>) {
        let mut current = self.inner.records.lock().await;
        *current = records;
        self.inner.publish_count(current.len());

        tracing::info!(store = R::KIND, records = current.len(), "Store reseeded");
    }

    async fn run_mutation<T, F>(&self, operation: &'static str, mutation: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Vec<R>) -> StoreResult<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            inner.latency.wait().await;

            let result = {
                let mut records = inner.records.lock().await;
                let result = mutation(&mut *records);
                inner.publish_count(records.len());
                result
            };

            let outcome = match &result {
                Ok(_) => Outcome::Ok,
                Err(StoreError::NotFound { id, .. }) => {
                    tracing::warn!(store = R::KIND, id = *id, operation, "Record not found");
                    Outcome::NotFound
                }
                Err(StoreError::IdsExhausted { .. }) => {
                    tracing::error!(store = R::KIND, operation, "No identifier left");
                    Outcome::IdsExhausted
                }
                Err(StoreError::Interrupted { .. }) => Outcome::Interrupted,
            };
            inner.observe(operation, started, outcome);

            result
        });

        match handle.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => {
                tracing::error!(store = R::KIND, operation, "Store mutation interrupted");
                Err(StoreError::Interrupted { kind: R::KIND })
            }
        }
    }
}

impl<R: Resource> StoreInner<R> {
    fn observe(&self, operation: &str, started: Instant, outcome: Outcome) {
        if let Some(metrics) = &self.metrics {
            metrics.record_operation(R::KIND, operation, started.elapsed().as_secs_f64(), outcome);
        }
    }

    fn publish_count(&self, count: usize) {
        if let Some(metrics) = &self.metrics {
            metrics.set_record_count(R::KIND, count);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
