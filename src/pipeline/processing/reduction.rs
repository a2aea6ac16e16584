use serde::Serialize;

use crate::error::{NormalizeError, Result};

/// A record the reducer refused to emit
#[derive(Debug)]
pub struct RecordError {
    pub key: String,
    pub error: NormalizeError,
}

impl RecordError {
    pub fn new(key: impl Into<String>, error: NormalizeError) -> Self {
        Self {
            key: key.into(),
            error,
        }
    }
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.error)
    }
}

/// Output of one reducer run.
///
/// Per-record failures travel next to the records that did make it, so the
/// caller decides whether one bad entry sinks the whole batch.
#[derive(Debug)]
pub struct Reduction<T> {
    pub records: T,
    pub errors: Vec<RecordError>,
    /// Candidates filtered out as routine (never errors)
    pub skipped: usize,
}

impl<T> Reduction<T> {
    pub fn new(records: T) -> Self {
        Self {
            records,
            errors: Vec::new(),
            skipped: 0,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the records, or the first per-record error if there was any.
    pub fn into_strict(self) -> Result<T> {
        match self.errors.into_iter().next() {
            Some(record_error) => Err(record_error.error),
            None => Ok(self.records),
        }
    }

    pub fn summary(&self) -> ReductionSummary {
        ReductionSummary {
            errors: self.errors.iter().map(ToString::to_string).collect(),
            skipped: self.skipped,
        }
    }
}

/// Serializable view of the failures in a [`Reduction`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReductionSummary {
    pub errors: Vec<String>,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_returns_first_error() {
        let mut reduction = Reduction::new(vec![1, 2]);
        reduction
            .errors
            .push(RecordError::new("a", NormalizeError::validation("a", "first")));
        reduction
            .errors
            .push(RecordError::new("b", NormalizeError::validation("b", "second")));

        let err = reduction.into_strict().unwrap_err();
        assert!(err.to_string().contains("first"));
    }

    #[test]
    fn strict_passes_clean_reduction() {
        let reduction = Reduction::new("ok");
        assert!(reduction.is_clean());
        assert_eq!(reduction.into_strict().unwrap(), "ok");
    }

    #[test]
    fn summary_lists_errors() {
        let mut reduction = Reduction::new(());
        reduction.skipped = 3;
        reduction
            .errors
            .push(RecordError::new("KLM", NormalizeError::validation("KLM", "empty hub")));

        let summary = reduction.summary();
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.errors, vec!["KLM: invalid record 'KLM': empty hub"]);
    }
}
