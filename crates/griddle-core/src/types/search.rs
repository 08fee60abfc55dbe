//! Search field declarations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of fields eligible for free-text search.
///
/// Field names are unique; insertion order is irrelevant. An empty set
/// disables search for the view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchFields(BTreeSet<String>);

impl SearchFields {
    /// Create a search-field set from the given field names.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fields.into_iter().map(Into::into).collect())
    }

    /// The empty set: search disabled.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the given field is declared.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    /// Iterate over the declared fields.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// What to do when a search term is supplied against a view that declares
/// no search fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPolicy {
    /// Drop the term and continue with the unfiltered query (default).
    #[default]
    Ignore,
    /// Fail the render with a configuration error.
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_fields() {
        let fields = SearchFields::new(["email", "name", "email"]);
        assert_eq!(fields.len(), 2);
        assert!(fields.contains("email"));
        assert!(fields.contains("name"));
    }

    #[test]
    fn none_disables_search() {
        assert!(SearchFields::none().is_empty());
    }
}
