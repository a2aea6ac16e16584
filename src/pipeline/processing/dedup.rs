use std::collections::HashSet;
use std::hash::Hash;

/// Returns true when any value occurs more than once.
///
/// Diagnostic only: reducers never use it to filter.
pub fn has_duplicates<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().any(|value| !seen.insert(value))
}
