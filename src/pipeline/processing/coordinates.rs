//! Degrees-minutes-seconds to decimal degrees.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::NEGATIVE_HEMISPHERES;
use crate::error::{NormalizeError, Result};

// Accepts the typographic marks used in infoboxes (° ′ ″) as well as their
// ASCII stand-ins. Minutes and seconds may be omitted.
static DMS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\s*(\d+(?:\.\d+)?)\s*°\s*(?:(\d+(?:\.\d+)?)\s*[′']\s*)?(?:(\d+(?:\.\d+)?)\s*(?:″|"|′′|'')\s*)?([NSEWnsew])\s*$"#,
    )
    .expect("DMS pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    fn accepts(self, hemisphere: char) -> bool {
        match self {
            Axis::Latitude => matches!(hemisphere, 'N' | 'S'),
            Axis::Longitude => matches!(hemisphere, 'E' | 'W'),
        }
    }
}

/// A parsed DMS coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub hemisphere: char,
}

impl Dms {
    pub fn parse(input: &str) -> Result<Self> {
        let captures = DMS_PATTERN
            .captures(input)
            .ok_or_else(|| NormalizeError::parse(input, "expected D°M′S″ followed by N, S, E or W"))?;

        let component = |index: usize| -> Result<f64> {
            match captures.get(index) {
                Some(m) => m
                    .as_str()
                    .parse::<f64>()
                    .map_err(|e| NormalizeError::parse(input, e.to_string())),
                None => Ok(0.0),
            }
        };

        let degrees = component(1)?;
        let minutes = component(2)?;
        let seconds = component(3)?;
        let hemisphere = captures
            .get(4)
            .and_then(|m| m.as_str().chars().next())
            .map(|c| c.to_ascii_uppercase())
            .ok_or_else(|| NormalizeError::parse(input, "missing hemisphere"))?;

        if minutes >= 60.0 || seconds >= 60.0 {
            return Err(NormalizeError::parse(
                input,
                "minutes and seconds must be below 60",
            ));
        }

        Ok(Self {
            degrees,
            minutes,
            seconds,
            hemisphere,
        })
    }

    /// Decimal degrees, summed left to right so results match the scraped fixtures bit for bit.
    pub fn to_decimal(&self) -> f64 {
        let dd = self.degrees + self.minutes / 60.0 + self.seconds / 3600.0;
        if NEGATIVE_HEMISPHERES.contains(&self.hemisphere) {
            -dd
        } else {
            dd
        }
    }
}

/// Converts a DMS string such as `17°20′56″S` to decimal degrees.
pub fn dms_to_decimal(input: &str) -> Result<f64> {
    Dms::parse(input).map(|dms| dms.to_decimal())
}

/// Like [`dms_to_decimal`], but also checks the hemisphere letter and range for `axis`.
pub fn convert_axis(input: &str, axis: Axis) -> Result<f64> {
    let dms = Dms::parse(input)?;
    if !axis.accepts(dms.hemisphere) {
        return Err(NormalizeError::validation(
            input,
            format!("hemisphere {} is not valid for {:?}", dms.hemisphere, axis),
        ));
    }

    let value = dms.to_decimal();
    if value.abs() > axis.limit() {
        return Err(NormalizeError::validation(
            input,
            format!("{:?} {} is outside ±{}", axis, value, axis.limit()),
        ));
    }
    Ok(value)
}
