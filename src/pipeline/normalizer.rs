use serde::Serialize;
use tracing::{info, instrument, warn};

use super::processing::airlines::AirlineReducer;
use super::processing::airports::AirportReducer;
use super::processing::destinations::{DestinationReducer, DestinationReduction};
use super::processing::enrich::{airport_airlines, apply_airline_counts};
use super::processing::links::LinkNormalizer;
use super::processing::reduction::{RecordError, Reduction};
use super::snapshot::RawSnapshot;
use crate::config::Config;
use crate::metrics::ReducerMetrics;
use crate::error::Result;
use crate::types::{AirlineDirectory, AirportAirlines, AirportDirectory, RawAirports, RunwayLookup};

/// Every dataset produced from one raw snapshot
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedDatasets {
    /// Airport directory with `airlinesFlying` filled in
    pub airports: AirportDirectory,
    pub runways: RunwayLookup,
    pub airlines: AirlineDirectory,
    pub destinations: DestinationReduction,
    pub airport_airlines: AirportAirlines,
    /// Airport keys served by some airline but absent from the airport directory
    pub unmatched_airports: Vec<String>,
    /// Per-record failures, formatted as `key: error`
    pub rejected: Vec<String>,
    pub skipped_destinations: usize,
}

/// Runs the reducers and the enricher over an in-memory snapshot.
pub struct Normalizer {
    config: Config,
    airports: AirportReducer,
    airlines: AirlineReducer,
    destinations: DestinationReducer,
}

impl Normalizer {
    pub fn new(config: Config) -> Self {
        let links = LinkNormalizer::new(&config.normalize);
        Self {
            airports: AirportReducer::new(links.clone()),
            airlines: AirlineReducer::new(links.clone()),
            destinations: DestinationReducer::new(links),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn airport_reducer(&self) -> &AirportReducer {
        &self.airports
    }

    pub fn airline_reducer(&self) -> &AirlineReducer {
        &self.airlines
    }

    pub fn destination_reducer(&self) -> &DestinationReducer {
        &self.destinations
    }

    /// ICAO code of the airport a reference link points at.
    pub fn icao_for_link<'a>(&self, link: &str, raw: &'a RawAirports) -> Option<&'a str> {
        self.airports.icao_for_link(link, raw)
    }

    /// Reduces all three datasets, then enriches airports with airline counts.
    ///
    /// In strict mode the first rejected record aborts the run; otherwise
    /// rejected records are listed in [`NormalizedDatasets::rejected`].
    #[instrument(skip_all)]
    pub fn run(&self, snapshot: &RawSnapshot) -> Result<NormalizedDatasets> {
        let mut rejected = Vec::new();
        for record in &snapshot.malformed {
            ReducerMetrics::record_rejected(record.dataset, "parse");
            if self.config.normalize.strict {
                return Err(record.to_error());
            }
            warn!(dataset = record.dataset, key = %record.key, "malformed record skipped");
            rejected.push(format!("{}: {}", record.key, record.to_error()));
        }

        let airports = self.airports.reduce(&snapshot.airports);
        let airlines = self.airlines.reduce(&snapshot.airlines);
        let destinations = self.destinations.reduce(&snapshot.destinations);

        let airports = self.settle(airports, &mut rejected)?;
        let airlines = self.settle(airlines, &mut rejected)?;
        let skipped_destinations = destinations.skipped;
        let destinations = self.settle(destinations, &mut rejected)?;

        let index = airport_airlines(&destinations.graph);
        let enrichment = apply_airline_counts(&airports.airports, &index);

        info!(
            airports = enrichment.airports.len(),
            airlines = airlines.len(),
            destination_airlines = destinations.graph.len(),
            rejected = rejected.len(),
            skipped_destinations,
            "snapshot normalized"
        );

        Ok(NormalizedDatasets {
            airports: enrichment.airports,
            runways: airports.runways,
            airlines,
            destinations,
            airport_airlines: index,
            unmatched_airports: enrichment.unmatched,
            rejected,
            skipped_destinations,
        })
    }

    fn settle<T>(&self, reduction: Reduction<T>, rejected: &mut Vec<String>) -> Result<T> {
        if self.config.normalize.strict {
            return reduction.into_strict();
        }
        for RecordError { key, error } in &reduction.errors {
            warn!(key = %key, error = %error, "record skipped");
            rejected.push(format!("{}: {}", key, error));
        }
        Ok(reduction.records)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
