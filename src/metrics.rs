//! Reducer metrics
//!
//! Counters are emitted through the `metrics` facade. The library installs no
//! recorder; embedding applications decide where (and whether) they go.

use ::metrics::counter;

pub const RECORDS_EMITTED: &str = "airscrape_records_emitted_total";
pub const RECORDS_REJECTED: &str = "airscrape_records_rejected_total";
pub const DESTINATIONS_SKIPPED: &str = "airscrape_destinations_skipped_total";
pub const AIRPORTS_ENRICHED: &str = "airscrape_airports_enriched_total";

/// Metrics collection for the reducers and the enricher
pub struct ReducerMetrics;

impl ReducerMetrics {
    pub fn record_emitted(dataset: &'static str, count: usize) {
        counter!(RECORDS_EMITTED, "dataset" => dataset).increment(count as u64);
    }

    pub fn record_rejected(dataset: &'static str, error_kind: &'static str) {
        counter!(RECORDS_REJECTED, "dataset" => dataset, "kind" => error_kind).increment(1);
    }

    pub fn record_destinations_skipped(count: usize) {
        counter!(DESTINATIONS_SKIPPED).increment(count as u64);
    }

    pub fn record_airports_enriched(count: usize) {
        counter!(AIRPORTS_ENRICHED).increment(count as u64);
    }
}
