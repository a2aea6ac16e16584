use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::clean_text;
use super::links::LinkNormalizer;
use super::reduction::{RecordError, Reduction};
use crate::error::{NormalizeError, Result};
use crate::metrics::ReducerMetrics;
use crate::types::{Airline, AirlineDirectory, Hub, RawAirline, RawHub};

pub struct AirlineReducer {
    links: LinkNormalizer,
}

impl AirlineReducer {
    pub fn new(links: LinkNormalizer) -> Self {
        Self { links }
    }

    /// Airline key: the airline name run through [`LinkNormalizer::record_key`],
    /// the same function the destination graph is keyed with.
    pub fn airline_key(&self, name: &str) -> Option<String> {
        self.links.record_key(name)
    }

    /// Reduces the scraped airline list into a directory keyed by airline key.
    ///
    /// Airlines listed more than once merge their hubs.
    #[instrument(skip_all, fields(raw = raw.len()))]
    pub fn reduce(&self, raw: &[RawAirline]) -> Reduction<AirlineDirectory> {
        let mut reduction = Reduction::new(AirlineDirectory::new());

        for (index, raw_airline) in raw.iter().enumerate() {
            let label = raw_airline
                .name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("airlines[{}]", index));

            let (key, airline) = match self.reduce_one(&label, raw_airline) {
                Ok(reduced) => reduced,
                Err(error) => {
                    warn!(airline = %label, error = %error, "airline rejected");
                    ReducerMetrics::record_rejected("airlines", error.kind());
                    reduction.errors.push(RecordError::new(label, error));
                    continue;
                }
            };

            match reduction.records.get_mut(&key) {
                Some(existing) => {
                    debug!(airline = %key, "merging duplicate airline");
                    merge_airline(existing, airline);
                }
                None => {
                    reduction.records.insert(key, airline);
                }
            }
        }

        ReducerMetrics::record_emitted("airlines", reduction.records.len());
        reduction
    }

    fn reduce_one(&self, label: &str, raw: &RawAirline) -> Result<(String, Airline)> {
        let name = clean_text(raw.name.as_deref())
            .ok_or_else(|| NormalizeError::validation(label, "airline has no name"))?;
        let key = self
            .airline_key(&name)
            .ok_or_else(|| NormalizeError::validation(label, "airline name yields no key"))?;

        let hubs = raw
            .hubs
            .iter()
            .map(|hub| self.reduce_hub(label, hub))
            .collect::<Result<Vec<_>>>()?;

        let airline = Airline {
            name,
            iata: clean_text(raw.iata.as_deref()),
            icao: clean_text(raw.icao.as_deref()),
            callsign: clean_text(raw.callsign.as_deref()),
            hubs: dedup_hubs(hubs),
        };

        ensure_no_empty_values(label, &airline)?;
        Ok((key, airline))
    }

    fn reduce_hub(&self, label: &str, raw: &RawHub) -> Result<Hub> {
        let name = clean_text(raw.name.as_deref())
            .ok_or_else(|| NormalizeError::validation(label, "hub without a name"))?;
        let link = raw
            .link
            .as_deref()
            .and_then(|link| self.links.record_key(link))
            .ok_or_else(|| {
                NormalizeError::validation(label, format!("hub '{}' has no link", name))
            })?;
        if self.links.contains_prefix(&link) {
            return Err(NormalizeError::validation(
                label,
                format!("hub '{}' still links through '{}'", name, link),
            ));
        }
        Ok(Hub { name, link })
    }
}

fn dedup_hubs(hubs: Vec<Hub>) -> Vec<Hub> {
    let mut unique: Vec<Hub> = Vec::with_capacity(hubs.len());
    for hub in hubs {
        if !unique.iter().any(|known| known.link == hub.link) {
            unique.push(hub);
        }
    }
    unique
}

fn merge_airline(existing: &mut Airline, other: Airline) {
    existing.iata = existing.iata.take().or(other.iata);
    existing.icao = existing.icao.take().or(other.icao);
    existing.callsign = existing.callsign.take().or(other.callsign);
    let mut hubs = std::mem::take(&mut existing.hubs);
    hubs.extend(other.hubs);
    existing.hubs = dedup_hubs(hubs);
}

/// Fails on the first empty string anywhere in the serialized record.
fn ensure_no_empty_values(label: &str, airline: &Airline) -> Result<()> {
    let value = serde_json::to_value(airline)?;
    match find_empty_string(&value, String::new()) {
        Some(path) => Err(NormalizeError::validation(
            label,
            format!("empty value at '{}'", path),
        )),
        None => Ok(()),
    }
}

fn find_empty_string(value: &Value, path: String) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => Some(path),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| find_empty_string(item, format!("{}[{}]", path, i))),
        Value::Object(fields) => fields.iter().find_map(|(key, field)| {
            let child = if path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", path, key)
            };
            find_empty_string(field, child)
        }),
        _ => None,
    }
}
