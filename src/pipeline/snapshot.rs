use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{NormalizeError, Result};
use crate::types::{RawAirlines, RawAirports, RawDestinations};

/// A raw record whose fields had the wrong types
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedRecord {
    pub dataset: &'static str,
    pub key: String,
    pub reason: String,
}

impl MalformedRecord {
    pub fn to_error(&self) -> NormalizeError {
        NormalizeError::parse(self.key.as_str(), self.reason.as_str())
    }
}

/// The three raw blobs handed over by the scraping layer.
///
/// Blobs are decoded record by record: a record with mistyped fields lands in
/// `malformed` and the rest of its blob still comes through.
#[derive(Debug, Clone, Default)]
pub struct RawSnapshot {
    pub destinations: RawDestinations,
    pub airports: RawAirports,
    pub airlines: RawAirlines,
    pub malformed: Vec<MalformedRecord>,
}

impl RawSnapshot {
    pub fn from_json_strs(destinations: &str, airports: &str, airlines: &str) -> Result<Self> {
        Self::from_values(
            serde_json::from_str(destinations)?,
            serde_json::from_str(airports)?,
            serde_json::from_str(airlines)?,
        )
    }

    /// Fails only when a blob as a whole has the wrong shape.
    pub fn from_values(destinations: Value, airports: Value, airlines: Value) -> Result<Self> {
        let destinations: BTreeMap<String, Vec<Value>> = serde_json::from_value(destinations)?;
        let airports: BTreeMap<String, Value> = serde_json::from_value(airports)?;
        let airlines: Vec<Value> = serde_json::from_value(airlines)?;

        let mut snapshot = Self::default();

        for (airline, blocks) in destinations {
            let mut decoded = Vec::with_capacity(blocks.len());
            for (index, block) in blocks.into_iter().enumerate() {
                let key = format!("{}[{}]", airline, index);
                if let Some(block) = decode("destinations", key, block, &mut snapshot.malformed) {
                    decoded.push(block);
                }
            }
            snapshot.destinations.insert(airline, decoded);
        }

        for (key, airport) in airports {
            if let Some(airport) = decode("airports", key.clone(), airport, &mut snapshot.malformed)
            {
                snapshot.airports.insert(key, airport);
            }
        }

        for (index, airline) in airlines.into_iter().enumerate() {
            let key = airline
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("airlines[{}]", index));
            if let Some(airline) = decode("airlines", key, airline, &mut snapshot.malformed) {
                snapshot.airlines.push(airline);
            }
        }

        Ok(snapshot)
    }
}

fn decode<T: DeserializeOwned>(
    dataset: &'static str,
    key: String,
    value: Value,
    malformed: &mut Vec<MalformedRecord>,
) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(error) => {
            warn!(dataset, key = %key, error = %error, "malformed raw record");
            malformed.push(MalformedRecord {
                dataset,
                key,
                reason: error.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_all_three_blobs() {
        let snapshot = RawSnapshot::from_json_strs(
            r#"{"KLM": [{"city": {"name": "Lima", "url": "/wiki/Lima"}}]}"#,
            r#"{"/wiki/Anaa_Airport": {"name": "Anaa Airport"}}"#,
            r#"[{"name": "KLM"}]"#,
        )
        .unwrap();

        assert_eq!(snapshot.destinations["KLM"].len(), 1);
        assert_eq!(
            snapshot.airports["/wiki/Anaa_Airport"].name.as_deref(),
            Some("Anaa Airport")
        );
        assert_eq!(snapshot.airlines.len(), 1);
        assert!(snapshot.malformed.is_empty());
    }

    #[test]
    fn wrong_shape_is_a_json_error() {
        let err = RawSnapshot::from_values(json!({}), json!([]), json!([])).unwrap_err();
        assert!(matches!(err, NormalizeError::Json(_)));
    }

    #[test]
    fn single_runway_cell_is_accepted() {
        let snapshot = RawSnapshot::from_values(
            json!({}),
            json!({"/wiki/Anaa_Airport": {"name": "Anaa Airport", "runways": "12/30 1,500 m Asphalt"}}),
            json!([]),
        )
        .unwrap();

        assert_eq!(snapshot.airports["/wiki/Anaa_Airport"].runways.len(), 1);
        assert!(snapshot.malformed.is_empty());
    }

    #[test]
    fn mistyped_records_do_not_sink_their_blob() {
        let snapshot = RawSnapshot::from_values(
            json!({"KLM": [
                {"city": 5},
                {"city": {"name": "Lima", "url": "/wiki/Lima"}}
            ]}),
            json!({
                "/wiki/Amsterdam_Airport_Schiphol": {"name": "Amsterdam Airport Schiphol"},
                "/wiki/Odd_Airport": {"name": "Odd Airport", "runways": 12}
            }),
            json!([{"name": "KLM"}, {"name": "Air France", "iata": 42}]),
        )
        .unwrap();

        assert_eq!(snapshot.destinations["KLM"].len(), 1);
        assert!(snapshot
            .airports
            .contains_key("/wiki/Amsterdam_Airport_Schiphol"));
        assert_eq!(snapshot.airports.len(), 1);
        assert_eq!(snapshot.airlines.len(), 1);

        let keys: Vec<_> = snapshot
            .malformed
            .iter()
            .map(|record| (record.dataset, record.key.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("destinations", "KLM[0]"),
                ("airports", "/wiki/Odd_Airport"),
                ("airlines", "Air France"),
            ]
        );
        assert!(matches!(
            snapshot.malformed[0].to_error(),
            NormalizeError::Parse { .. }
        ));
    }
}
