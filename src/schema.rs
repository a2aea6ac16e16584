//! Passive contract checks for the normalized datasets.
//!
//! The reducers never consult these schemas; callers run them over finished
//! output to confirm it still has the shape downstream consumers expect.

use jsonschema::JSONSchema;
use serde::Serialize;
use serde_json::Value;

use crate::constants::{AIRLINE_SCHEMA, AIRPORT_SCHEMA, DESTINATIONS_SCHEMA};
use crate::error::{NormalizeError, Result};
use crate::pipeline::processing::destinations::DestinationGraph;
use crate::types::{AirlineDirectory, AirportDirectory};

pub const AIRPORT_SCHEMA_JSON: &str = include_str!("../schemas/airport.schema.json");
pub const AIRLINE_SCHEMA_JSON: &str = include_str!("../schemas/airline.schema.json");
pub const DESTINATIONS_SCHEMA_JSON: &str = include_str!("../schemas/destinations.schema.json");

pub struct ContractValidator {
    airport: JSONSchema,
    airline: JSONSchema,
    destinations: JSONSchema,
}

impl ContractValidator {
    /// Validator over the schemas shipped in `schemas/`.
    pub fn bundled() -> Result<Self> {
        Self::from_values(
            &serde_json::from_str(AIRPORT_SCHEMA_JSON)?,
            &serde_json::from_str(AIRLINE_SCHEMA_JSON)?,
            &serde_json::from_str(DESTINATIONS_SCHEMA_JSON)?,
        )
    }

    pub fn from_values(airport: &Value, airline: &Value, destinations: &Value) -> Result<Self> {
        Ok(Self {
            airport: compile(AIRPORT_SCHEMA, airport)?,
            airline: compile(AIRLINE_SCHEMA, airline)?,
            destinations: compile(DESTINATIONS_SCHEMA, destinations)?,
        })
    }

    /// Checks each airport record on its own.
    pub fn validate_airports(&self, airports: &AirportDirectory) -> Result<()> {
        let mut errors = Vec::new();
        for (key, airport) in airports {
            let instance = serde_json::to_value(airport)?;
            errors.extend(
                violations(&self.airport, &instance)
                    .into_iter()
                    .map(|e| format!("{}: {}", key, e)),
            );
        }
        into_result(AIRPORT_SCHEMA, errors)
    }

    pub fn validate_airlines(&self, airlines: &AirlineDirectory) -> Result<()> {
        let mut errors = Vec::new();
        for (key, airline) in airlines {
            let instance = serde_json::to_value(airline)?;
            errors.extend(
                violations(&self.airline, &instance)
                    .into_iter()
                    .map(|e| format!("{}: {}", key, e)),
            );
        }
        into_result(AIRLINE_SCHEMA, errors)
    }

    pub fn validate_destinations(&self, graph: &DestinationGraph) -> Result<()> {
        let instance = to_instance(graph)?;
        into_result(DESTINATIONS_SCHEMA, violations(&self.destinations, &instance))
    }
}

fn compile(name: &str, schema: &Value) -> Result<JSONSchema> {
    JSONSchema::compile(schema).map_err(|e| NormalizeError::Schema {
        schema: name.to_string(),
        errors: vec![format!("schema does not compile: {}", e)],
    })
}

fn to_instance<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn violations(schema: &JSONSchema, instance: &Value) -> Vec<String> {
    match schema.validate(instance) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|e| format!("{} at '{}'", e, e.instance_path))
            .collect(),
    }
}

fn into_result(schema: &str, errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(NormalizeError::Schema {
            schema: schema.to_string(),
            errors,
        })
    }
}
