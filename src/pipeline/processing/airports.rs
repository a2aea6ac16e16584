use tracing::{debug, instrument, warn};

use super::clean_text;
use super::coordinates::{convert_axis, Axis};
use super::links::LinkNormalizer;
use super::reduction::{RecordError, Reduction};
use crate::error::{NormalizeError, Result};
use crate::metrics::ReducerMetrics;
use crate::types::{Airport, AirportDirectory, RawAirport, RawAirports, RawRunway, RunwayLookup};

/// Airport directory plus the runways split out of it
#[derive(Debug, Clone, Default)]
pub struct AirportReduction {
    pub airports: AirportDirectory,
    pub runways: RunwayLookup,
}

pub struct AirportReducer {
    links: LinkNormalizer,
}

impl AirportReducer {
    pub fn new(links: LinkNormalizer) -> Self {
        Self { links }
    }

    /// Identity key of a raw airport: its name, falling back to the raw map key.
    pub fn airport_key(&self, raw_key: &str, airport: &RawAirport) -> Option<String> {
        airport
            .name
            .as_deref()
            .and_then(|name| self.links.record_key(name))
            .or_else(|| self.links.record_key(raw_key))
    }

    /// Reduces every raw airport.
    ///
    /// Raw entries whose keys differ but resolve to the same airport key
    /// collapse to the first one in key order that reduces cleanly.
    #[instrument(skip_all, fields(raw = raw.len()))]
    pub fn reduce(&self, raw: &RawAirports) -> Reduction<AirportReduction> {
        let reduction = self.collect(raw);

        for error in &reduction.errors {
            ReducerMetrics::record_rejected("airports", error.error.kind());
        }
        ReducerMetrics::record_emitted("airports", reduction.records.airports.len());
        debug!(
            emitted = reduction.records.airports.len(),
            rejected = reduction.errors.len(),
            "airports reduced"
        );
        reduction
    }

    fn collect(&self, raw: &RawAirports) -> Reduction<AirportReduction> {
        let mut reduction = Reduction::new(AirportReduction::default());

        for (raw_key, raw_airport) in raw {
            let Some(key) = self.airport_key(raw_key, raw_airport) else {
                warn!(raw_key = %raw_key, "airport has neither a name nor a usable key");
                reduction.errors.push(RecordError::new(
                    raw_key.as_str(),
                    NormalizeError::validation(raw_key.as_str(), "missing airport name"),
                ));
                continue;
            };

            if reduction.records.airports.contains_key(&key) {
                debug!(raw_key = %raw_key, key = %key, "collapsing duplicate airport");
                continue;
            }

            match self.reduce_one(&key, raw_airport) {
                Ok(airport) => {
                    let runways = runway_descriptors(&raw_airport.runways);
                    if !runways.is_empty() {
                        reduction.records.runways.insert(key.clone(), runways);
                    }
                    reduction.records.airports.insert(key, airport);
                }
                Err(error) => {
                    warn!(key = %key, error = %error, "airport rejected");
                    reduction.errors.push(RecordError::new(key, error));
                }
            }
        }
        reduction
    }

    fn reduce_one(&self, key: &str, raw: &RawAirport) -> Result<Airport> {
        let name = clean_text(raw.name.as_deref())
            .ok_or_else(|| NormalizeError::validation(key, "missing airport name"))?;
        let latitude = clean_text(raw.latitude.as_deref())
            .ok_or_else(|| NormalizeError::validation(key, "missing latitude"))?;
        let longitude = clean_text(raw.longitude.as_deref())
            .ok_or_else(|| NormalizeError::validation(key, "missing longitude"))?;

        let dd_latitude = convert_axis(&latitude, Axis::Latitude)?;
        let dd_longitude = convert_axis(&longitude, Axis::Longitude)?;

        Ok(Airport {
            name,
            nickname: clean_text(raw.nickname.as_deref()),
            iata: clean_text(raw.iata.as_deref()),
            icao: clean_text(raw.icao.as_deref()),
            latitude,
            longitude,
            dd_latitude,
            dd_longitude,
            airlines_flying: None,
        })
    }

    /// Airport key -> runway descriptors, for every emitted airport that lists
    /// at least one runway. Same lookup as [`AirportReduction::runways`].
    pub fn runways(&self, raw: &RawAirports) -> RunwayLookup {
        self.collect(raw).records.runways
    }

    /// ICAO code of the airport a reference link points at.
    pub fn icao_for_link<'a>(&self, link: &str, raw: &'a RawAirports) -> Option<&'a str> {
        let wanted = self.links.record_key(link)?;
        raw.iter()
            .find(|(raw_key, airport)| {
                self.links.record_key(raw_key).as_deref() == Some(wanted.as_str())
                    || self.airport_key(raw_key, airport).as_deref() == Some(wanted.as_str())
            })
            .and_then(|(_, airport)| airport.icao.as_deref())
            .map(str::trim)
            .filter(|icao| !icao.is_empty())
    }
}

fn runway_descriptors(runways: &[RawRunway]) -> Vec<String> {
    runways.iter().filter_map(RawRunway::descriptor).collect()
}

impl RawRunway {
    /// Single-line description such as `06/24 3,453 m Asphalt`.
    pub fn descriptor(&self) -> Option<String> {
        match self {
            RawRunway::Text(text) => clean_text(Some(text.as_str())),
            RawRunway::Detailed {
                designation,
                length,
                surface,
            } => {
                let parts: Vec<String> = [designation, length, surface]
                    .into_iter()
                    .filter_map(|part| clean_text(part.as_deref()))
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(" "))
                }
            }
        }
    }
}
