use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, instrument};

use super::destinations::DestinationGraph;
use crate::metrics::ReducerMetrics;
use crate::types::{AirportAirlines, AirportDirectory};

/// Enriched airport directory plus the cross-reference misses found on the way
#[derive(Debug, Clone, Default, Serialize)]
pub struct Enrichment {
    pub airports: AirportDirectory,
    /// Airport keys served by some airline but missing from the directory
    pub unmatched: Vec<String>,
}

/// Inverts the destination graph: airport key -> airlines serving it.
///
/// Each airline appears at most once per airport, in graph order.
pub fn airport_airlines(graph: &DestinationGraph) -> AirportAirlines {
    let mut index = AirportAirlines::new();
    for (airline, airports) in graph {
        for airport in airports {
            let airlines = index.entry(airport.clone()).or_default();
            if !airlines.contains(airline) {
                airlines.push(airline.clone());
            }
        }
    }
    index
}

/// Sets `airlines_flying` from an airport -> airlines index.
///
/// Airports the index does not mention end up with the count unset rather
/// than zero, so re-running on the same inputs gives the same directory.
#[instrument(skip_all, fields(airports = airports.len(), indexed = index.len()))]
pub fn apply_airline_counts(airports: &AirportDirectory, index: &AirportAirlines) -> Enrichment {
    let mut enriched = AirportDirectory::new();
    let mut matched = 0usize;

    for (key, airport) in airports {
        let mut airport = airport.clone();
        airport.airlines_flying = index.get(key).map(|airlines| {
            matched += 1;
            airlines.iter().collect::<HashSet<_>>().len()
        });
        enriched.insert(key.clone(), airport);
    }

    let unmatched: Vec<String> = index
        .keys()
        .filter(|key| !airports.contains_key(*key))
        .cloned()
        .collect();

    ReducerMetrics::record_airports_enriched(matched);
    debug!(matched, unmatched = unmatched.len(), "airports enriched");

    Enrichment {
        airports: enriched,
        unmatched,
    }
}

/// Annotates every airport with the number of distinct airlines serving it.
pub fn enrich_airports(airports: &AirportDirectory, graph: &DestinationGraph) -> Enrichment {
    apply_airline_counts(airports, &airport_airlines(graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Airport;

    fn airport(name: &str) -> Airport {
        Airport {
            name: name.to_string(),
            nickname: None,
            iata: None,
            icao: None,
            latitude: "0°0′0″N".to_string(),
            longitude: "0°0′0″E".to_string(),
            dd_latitude: 0.0,
            dd_longitude: 0.0,
            airlines_flying: None,
        }
    }

    fn directory() -> AirportDirectory {
        let mut airports = AirportDirectory::new();
        airports.insert(
            "Amsterdam_Airport_Schiphol".to_string(),
            airport("Amsterdam Airport Schiphol"),
        );
        airports.insert("Anaa_Airport".to_string(), airport("Anaa Airport"));
        airports
    }

    fn graph() -> DestinationGraph {
        let mut graph = DestinationGraph::new();
        graph.insert(
            "KLM".to_string(),
            vec!["Amsterdam_Airport_Schiphol".to_string(), "Lima_Airport".to_string()],
        );
        graph.insert(
            "Air France".to_string(),
            vec!["Amsterdam_Airport_Schiphol".to_string()],
        );
        graph.insert("Ghost Air".to_string(), Vec::new());
        graph
    }

    #[test]
    fn inverts_graph_without_duplicates() {
        let index = airport_airlines(&graph());
        assert_eq!(
            index["Amsterdam_Airport_Schiphol"],
            vec!["Air France".to_string(), "KLM".to_string()]
        );
        assert_eq!(index["Lima_Airport"], vec!["KLM".to_string()]);
    }

    #[test]
    fn counts_airlines_per_airport() {
        let enrichment = enrich_airports(&directory(), &graph());
        assert_eq!(
            enrichment.airports["Amsterdam_Airport_Schiphol"].airlines_flying,
            Some(2)
        );
    }

    #[test]
    fn airports_without_destination_data_stay_unset() {
        let enrichment = enrich_airports(&directory(), &graph());
        assert_eq!(enrichment.airports["Anaa_Airport"].airlines_flying, None);
        assert_eq!(enrichment.airports.len(), 2);
    }

    #[test]
    fn reports_unmatched_airports() {
        let enrichment = enrich_airports(&directory(), &graph());
        assert_eq!(enrichment.unmatched, vec!["Lima_Airport".to_string()]);
    }

    #[test]
    fn count_matches_supplied_index() {
        let mut index = AirportAirlines::new();
        let airlines: Vec<String> = (0..7).map(|i| format!("Airline {}", i)).collect();
        index.insert("Amsterdam_Airport_Schiphol".to_string(), airlines.clone());

        let enrichment = apply_airline_counts(&directory(), &index);
        assert_eq!(
            enrichment.airports["Amsterdam_Airport_Schiphol"].airlines_flying,
            Some(airlines.len())
        );
    }

    #[test]
    fn duplicate_airlines_in_index_count_once() {
        let mut index = AirportAirlines::new();
        index.insert(
            "Anaa_Airport".to_string(),
            vec!["Air Tahiti".to_string(), "Air Tahiti".to_string()],
        );
        let enrichment = apply_airline_counts(&directory(), &index);
        assert_eq!(enrichment.airports["Anaa_Airport"].airlines_flying, Some(1));
    }

    #[test]
    fn enrichment_is_idempotent() {
        let once = enrich_airports(&directory(), &graph());
        let twice = enrich_airports(&once.airports, &graph());
        assert_eq!(once.airports, twice.airports);
    }
}
