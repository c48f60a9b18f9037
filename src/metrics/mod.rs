use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry,
    TextEncoder,
};

// ============================================================================
// Metrics Module - Prometheus metrics for the resource stores
// ============================================================================
//
// Provides:
// - Store operation counts by store/operation/outcome
// - Store operation latency (including the simulated network delay)
// - Record count per store after every mutation
//
// There is no scrape endpoint; callers read the registry directly or render
// it with `render_text`.
// ============================================================================

/// Central metrics registry shared by every store of a practice
pub struct Metrics {
    registry: Registry,

    pub store_operations: IntCounterVec,
    pub store_operation_duration: HistogramVec,
    pub store_records: IntGaugeVec,
}

/// Outcome label for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    NotFound,
    IdsExhausted,
    Interrupted,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::NotFound => "not_found",
            Outcome::IdsExhausted => "ids_exhausted",
            Outcome::Interrupted => "interrupted",
        }
    }
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let store_operations = IntCounterVec::new(
            Opts::new("store_operations_total", "Total store operations"),
            &["store", "operation", "outcome"],
        )?;
        registry.register(Box::new(store_operations.clone()))?;

        let store_operation_duration = HistogramVec::new(
            HistogramOpts::new(
                "store_operation_duration_seconds",
                "Store operation duration including simulated latency",
            )
            .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.2, 0.3, 0.4, 0.5, 1.0]),
            &["store", "operation"],
        )?;
        registry.register(Box::new(store_operation_duration.clone()))?;

        let store_records = IntGaugeVec::new(
            Opts::new("store_records", "Number of records held by a store"),
            &["store"],
        )?;
        registry.register(Box::new(store_records.clone()))?;

        Ok(Self {
            registry,
            store_operations,
            store_operation_duration,
            store_records,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record one finished store operation
    pub fn record_operation(
        &self,
        store: &str,
        operation: &str,
        duration_secs: f64,
        outcome: Outcome,
    ) {
        self.store_operations
            .with_label_values(&[store, operation, outcome.as_str()])
            .inc();
        self.store_operation_duration
            .with_label_values(&[store, operation])
            .observe(duration_secs);
    }

    /// Helper to publish the current record count of a store
    pub fn set_record_count(&self, store: &str, count: usize) {
        self.store_records
            .with_label_values(&[store])
            .set(count as i64);
    }

    /// Prometheus text exposition of everything registered
    pub fn render_text(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}
