use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Raw records, as produced by the scraping layer
// ---------------------------------------------------------------------------

/// Airport record as scraped from its article infobox
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAirport {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub iata: Option<String>,
    pub icao: Option<String>,
    /// DMS string, e.g. `17°20′56″S`
    pub latitude: Option<String>,
    /// DMS string, e.g. `145°30′44″W`
    pub longitude: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub runways: Vec<RawRunway>,
}

/// Accepts a single runway cell as well as a list of them.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<RawRunway>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<RawRunway>),
        One(RawRunway),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(runways) => runways,
        OneOrMany::One(runway) => vec![runway],
    })
}

/// Runways show up either as a single text cell or split into columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRunway {
    Text(String),
    Detailed {
        #[serde(default, alias = "direction")]
        designation: Option<String>,
        #[serde(default)]
        length: Option<String>,
        #[serde(default)]
        surface: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAirline {
    pub name: Option<String>,
    pub iata: Option<String>,
    pub icao: Option<String>,
    pub callsign: Option<String>,
    pub hubs: Vec<RawHub>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawHub {
    pub name: Option<String>,
    #[serde(alias = "url")]
    pub link: Option<String>,
}

/// A named reference to another article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLink {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// A single city/airport pair from an airline's destination table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDestination {
    pub city: Option<RawLink>,
    pub airport: Option<RawLink>,
}

/// One row of a destination table; rows with rowspans carry several airports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDestinationBlock {
    Many(Vec<RawDestination>),
    Single(RawDestination),
}

impl RawDestinationBlock {
    pub fn candidates(&self) -> &[RawDestination] {
        match self {
            Self::Many(items) => items,
            Self::Single(item) => std::slice::from_ref(item),
        }
    }
}

pub type RawAirports = BTreeMap<String, RawAirport>;
pub type RawAirlines = Vec<RawAirline>;
pub type RawDestinations = BTreeMap<String, Vec<RawDestinationBlock>>;

// ---------------------------------------------------------------------------
// Normalized records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
    /// Source DMS strings, kept for traceability
    pub latitude: String,
    pub longitude: String,
    pub dd_latitude: f64,
    pub dd_longitude: f64,
    /// Unset means no destination data mentions this airport
    #[serde(
        rename = "airlinesFlying",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub airlines_flying: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub name: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callsign: Option<String>,
    pub hubs: Vec<Hub>,
}

/// City an airport was listed under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

pub type AirportDirectory = BTreeMap<String, Airport>;
pub type AirlineDirectory = BTreeMap<String, Airline>;
pub type RunwayLookup = BTreeMap<String, Vec<String>>;
/// Airport key -> airline keys serving it
pub type AirportAirlines = BTreeMap<String, Vec<String>>;
