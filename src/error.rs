use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("could not parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("invalid record '{record}': {reason}")]
    Validation { record: String, reason: String },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("output does not satisfy schema '{schema}': {}", errors.join("; "))]
    Schema { schema: String, errors: Vec<String> },
}

impl NormalizeError {
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn validation(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            record: record.into(),
            reason: reason.into(),
        }
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse",
            Self::Validation { .. } => "validation",
            Self::Json(_) => "json",
            Self::Toml(_) => "toml",
            Self::Io(_) => "io",
            Self::Config(_) => "config",
            Self::Schema { .. } => "schema",
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
