// Data processing pipeline: raw snapshot in, normalized datasets out

pub mod normalizer;
pub mod processing;
pub mod snapshot;

pub use normalizer::{NormalizedDatasets, Normalizer};
pub use snapshot::{MalformedRecord, RawSnapshot};
