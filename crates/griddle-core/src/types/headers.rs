//! Column header set.

use serde::{Deserialize, Serialize};

/// The ordered column labels of a table view.
///
/// The header count establishes the expected row width for the rest of the
/// render pipeline. An empty header set is representable but rejected at
/// render time, before the repository is touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers(Vec<String>);

impl Headers {
    /// Create a header set from an ordered sequence of labels.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no columns are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the labels in column order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Headers {
    fn from(labels: Vec<String>) -> Self {
        Self(labels)
    }
}
