/// Path prefix the encyclopedia uses for internal article links.
pub const WIKI_PREFIX: &str = "/wiki/";

/// Default tracing filter directive for this crate
pub const DEFAULT_LOG_FILTER: &str = "airscrape_normalize=info";

/// File name used by the rolling JSON log appender
pub const LOG_FILE_NAME: &str = "normalize.log";

// Schema names, as reported in contract violations
pub const AIRPORT_SCHEMA: &str = "airport";
pub const AIRLINE_SCHEMA: &str = "airline";
pub const DESTINATIONS_SCHEMA: &str = "destinations";

/// Hemisphere letters that make a coordinate negative.
pub const NEGATIVE_HEMISPHERES: [char; 2] = ['S', 'W'];
