// Pipeline processing: reducers for the three scraped datasets and the
// cross-dataset enrichment that ties them together.

pub mod airlines;
pub mod airports;
pub mod coordinates;
pub mod dedup;
pub mod destinations;
pub mod enrich;
pub mod links;
pub mod reduction;

pub use reduction::{RecordError, Reduction, ReductionSummary};

/// Trimmed text, or `None` when the source left the field blank.
pub(crate) fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
