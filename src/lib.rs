pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod schema;
pub mod types;

pub use config::Config;
pub use error::{NormalizeError, Result};
pub use pipeline::processing::airlines::AirlineReducer;
pub use pipeline::processing::airports::{AirportReducer, AirportReduction};
pub use pipeline::processing::coordinates::{convert_axis, dms_to_decimal, Axis, Dms};
pub use pipeline::processing::dedup::has_duplicates;
pub use pipeline::processing::destinations::{
    is_valid_destination, AirportCityList, CityAirportIndex, DestinationGraph, DestinationReducer,
    DestinationReduction,
};
pub use pipeline::processing::enrich::{
    airport_airlines, apply_airline_counts, enrich_airports, Enrichment,
};
pub use pipeline::processing::links::{strip_wiki_prefix, LinkNormalizer};
pub use pipeline::processing::{RecordError, Reduction, ReductionSummary};
pub use pipeline::{MalformedRecord, NormalizedDatasets, Normalizer, RawSnapshot};
