//! Query model handed from the render pipeline to repositories.
//!
//! A [`Query`] carries everything a repository needs to narrow, order, and
//! paginate its collection. Interpretation is owned entirely by the
//! repository; the pipeline never reimplements filtering or sorting.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Error};

/// How a field predicate matches a record's field text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    /// Exact string equality.
    Equals,
    /// Case-sensitive substring containment.
    Contains,
}

/// A single field predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    /// The schema field the predicate reads.
    pub field: String,
    /// The match operation.
    pub op: FilterOp,
    /// The value matched against the field's text form.
    pub value: String,
}

impl FieldFilter {
    /// Exact-match predicate on the given field.
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Equals,
            value: value.into(),
        }
    }

    /// Substring predicate on the given field.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Contains,
            value: value.into(),
        }
    }

    /// Whether the given field text satisfies the predicate.
    pub fn matches(&self, text: &str) -> bool {
        match self.op {
            FilterOp::Equals => text == self.value,
            FilterOp::Contains => text.contains(&self.value),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smallest key first (default).
    #[default]
    Ascending,
    /// Largest key first.
    Descending,
}

/// Ordering specification, interpreted by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The schema field to order by.
    pub field: String,
    /// The sort direction.
    pub direction: Direction,
}

impl OrderBy {
    /// Ascending order on the given field.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    /// Descending order on the given field.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

/// A 1-based pagination window.
///
/// Page number and size are validated at construction, making out-of-range
/// windows unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Create a page, validating that number and size are at least 1.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a zero page number or size.
    pub fn new(number: u32, size: u32) -> Result<Self, Error> {
        if number == 0 {
            return Err(ConfigurationError::InvalidPage {
                reason: "page number is 1-based".to_string(),
            }
            .into());
        }
        if size == 0 {
            return Err(ConfigurationError::InvalidPage {
                reason: "page size must be at least 1".to_string(),
            }
            .into());
        }
        Ok(Self { number, size })
    }

    /// The 1-based page number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Records per page.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Records to skip before this page starts.
    pub fn offset(&self) -> u64 {
        (u64::from(self.number) - 1) * u64::from(self.size)
    }

    /// Maximum records this page may hold.
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

/// The narrowed query a render hands to its repository.
///
/// `any_of` predicates OR-combine (free-text search across the declared
/// search fields); `all_of` predicates AND-combine (exact filters). An empty
/// `any_of` imposes no search constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// OR-combined predicates; a record matches if any one matches.
    pub any_of: Vec<FieldFilter>,
    /// AND-combined predicates; a record matches only if all match.
    pub all_of: Vec<FieldFilter>,
    /// Optional ordering.
    pub order: Option<OrderBy>,
    /// Maximum records to yield.
    pub limit: Option<u64>,
    /// Records to skip before yielding.
    pub offset: Option<u64>,
}

impl Query {
    /// Every field the query references, for schema validation.
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.any_of
            .iter()
            .chain(self.all_of.iter())
            .map(|f| f.field.as_str())
            .chain(self.order.as_ref().map(|o| o.field.as_str()))
    }
}
