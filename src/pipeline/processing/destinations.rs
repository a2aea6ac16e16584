use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::clean_text;
use super::links::LinkNormalizer;
use super::reduction::{RecordError, Reduction};
use crate::error::NormalizeError;
use crate::metrics::ReducerMetrics;
use crate::types::{CityRef, RawDestination, RawDestinations, RawLink};

/// Airline key -> airport keys it serves, in listing order
pub type DestinationGraph = BTreeMap<String, Vec<String>>;
/// City key -> distinct airport keys listed under it
pub type CityAirportIndex = BTreeMap<String, Vec<String>>;
/// Airport key -> the city it was first listed under
pub type AirportCityList = BTreeMap<String, CityRef>;

/// The destination graph and both views derived from the same pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct DestinationReduction {
    pub graph: DestinationGraph,
    pub city_airports: CityAirportIndex,
    pub airport_cities: AirportCityList,
}

/// True when both the city and the airport carry a name and a link.
pub fn is_valid_destination(destination: &RawDestination) -> bool {
    fn complete(link: Option<&RawLink>) -> bool {
        link.map_or(false, |link| {
            clean_text(link.name.as_deref()).is_some() && clean_text(link.url.as_deref()).is_some()
        })
    }
    complete(destination.city.as_ref()) && complete(destination.airport.as_ref())
}

/// A candidate that survived filtering, with its references resolved to keys
struct ResolvedDestination {
    city_key: String,
    city_name: String,
    airport_key: String,
}

pub struct DestinationReducer {
    links: LinkNormalizer,
}

impl DestinationReducer {
    pub fn new(links: LinkNormalizer) -> Self {
        Self { links }
    }

    fn resolve(&self, destination: &RawDestination) -> Option<ResolvedDestination> {
        if !is_valid_destination(destination) {
            return None;
        }
        let city = destination.city.as_ref()?;
        let airport = destination.airport.as_ref()?;

        let resolved = ResolvedDestination {
            city_key: self.links.record_key(city.url.as_deref()?)?,
            city_name: clean_text(city.name.as_deref())?,
            airport_key: self.links.record_key(airport.url.as_deref()?)?,
        };
        if self.links.contains_prefix(&resolved.city_key)
            || self.links.contains_prefix(&resolved.airport_key)
        {
            return None;
        }
        Some(resolved)
    }

    /// Builds the destination graph and both derived views in one pass.
    ///
    /// Invalid candidates are counted in `skipped`. An airline whose every
    /// candidate was dropped still appears with an empty list.
    #[instrument(skip_all, fields(airlines = raw.len()))]
    pub fn reduce(&self, raw: &RawDestinations) -> Reduction<DestinationReduction> {
        let mut reduction = Reduction::new(DestinationReduction::default());
        let mut served: BTreeMap<String, HashSet<String>> = BTreeMap::new();

        for (raw_airline, blocks) in raw {
            let airline_key = match self.links.record_key(raw_airline) {
                Some(key) => key,
                None => {
                    warn!(raw_key = %raw_airline, "destination listing without an airline key");
                    ReducerMetrics::record_rejected("destinations", "validation");
                    reduction.errors.push(RecordError::new(
                        raw_airline.as_str(),
                        NormalizeError::validation(raw_airline.as_str(), "missing airline key"),
                    ));
                    continue;
                }
            };

            let airports = reduction
                .records
                .graph
                .entry(airline_key.clone())
                .or_default();
            let seen = served.entry(airline_key).or_default();

            for candidate in blocks.iter().flat_map(|block| block.candidates()) {
                let Some(resolved) = self.resolve(candidate) else {
                    reduction.skipped += 1;
                    continue;
                };

                if seen.insert(resolved.airport_key.clone()) {
                    airports.push(resolved.airport_key.clone());
                }

                let city_airports = reduction
                    .records
                    .city_airports
                    .entry(resolved.city_key.clone())
                    .or_default();
                if !city_airports.contains(&resolved.airport_key) {
                    city_airports.push(resolved.airport_key.clone());
                }

                reduction
                    .records
                    .airport_cities
                    .entry(resolved.airport_key)
                    .or_insert(CityRef {
                        name: resolved.city_name,
                        url: Some(resolved.city_key),
                    });
            }
        }

        ReducerMetrics::record_destinations_skipped(reduction.skipped);
        ReducerMetrics::record_emitted("destinations", reduction.records.graph.len());
        debug!(
            airlines = reduction.records.graph.len(),
            skipped = reduction.skipped,
            "destinations reduced"
        );
        reduction
    }
}
