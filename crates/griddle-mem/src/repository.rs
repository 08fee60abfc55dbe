//! In-memory repository.

use std::sync::Arc;

use async_stream::try_stream;
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use tracing::{debug, instrument};

use griddle_core::error::ConfigurationError;
use griddle_core::{Direction, Query, Record, Repository, Result};

/// An in-memory repository over a vector of records.
///
/// The schema is declared explicitly at construction; fetches validate every
/// field a query references against it and reject unknown names. Records are
/// shared behind an `Arc`, so each fetch is a cheap handle over the same
/// collection and concurrent fetches never copy it.
#[derive(Debug, Clone)]
pub struct MemRepository<R> {
    schema: Vec<String>,
    records: Arc<Vec<R>>,
}

impl<R> MemRepository<R> {
    /// Create a repository with the given schema and records.
    pub fn new<I, S>(schema: I, records: Vec<R>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schema: schema.into_iter().map(Into::into).collect(),
            records: Arc::new(records),
        }
    }

    /// Number of records in the collection.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn validate(&self, query: &Query) -> Result<()> {
        for field in query.referenced_fields() {
            if !self.schema.iter().any(|f| f == field) {
                return Err(ConfigurationError::UnknownField {
                    field: field.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Ordering key for a record: the field's text, or empty when absent.
fn order_key<R: Record>(record: &R, field: &str) -> String {
    record.field(field).map(|v| v.into_owned()).unwrap_or_default()
}

fn selected<R: Record>(record: &R, query: &Query) -> bool {
    let any_ok = query.any_of.is_empty()
        || query
            .any_of
            .iter()
            .any(|f| record.field(&f.field).is_some_and(|text| f.matches(&text)));
    let all_ok = query
        .all_of
        .iter()
        .all(|f| record.field(&f.field).is_some_and(|text| f.matches(&text)));
    any_ok && all_ok
}

#[async_trait]
impl<R> Repository for MemRepository<R>
where
    R: Record + Clone + 'static,
{
    type Record = R;
    type Records = BoxStream<'static, Result<R>>;

    fn schema(&self) -> &[String] {
        &self.schema
    }

    #[instrument(skip(self, query), fields(records = self.records.len()))]
    async fn fetch(&self, query: Query) -> Result<Self::Records> {
        self.validate(&query)?;

        let records = Arc::clone(&self.records);
        let offset = query.offset.unwrap_or(0);
        let limit = query.limit;

        debug!(?limit, offset, "fetching records");

        let stream = try_stream! {
            if let Some(order) = query.order.clone() {
                // Ordering needs the full matching set before pagination.
                // The sort is stable, so ties keep insertion order.
                let mut matched: Vec<usize> = (0..records.len())
                    .filter(|&i| selected(&records[i], &query))
                    .collect();
                matched.sort_by(|&a, &b| {
                    let ka = order_key(&records[a], &order.field);
                    let kb = order_key(&records[b], &order.field);
                    match order.direction {
                        Direction::Ascending => ka.cmp(&kb),
                        Direction::Descending => kb.cmp(&ka),
                    }
                });

                let mut yielded = 0u64;
                for i in matched.into_iter().skip(offset as usize) {
                    if limit.is_some_and(|l| yielded >= l) {
                        break;
                    }
                    yield records[i].clone();
                    yielded += 1;
                }
            } else {
                // Unordered: stop scanning once the window is full.
                let mut skipped = 0u64;
                let mut yielded = 0u64;
                for record in records.iter() {
                    if limit.is_some_and(|l| yielded >= l) {
                        break;
                    }
                    if !selected(record, &query) {
                        continue;
                    }
                    if skipped < offset {
                        skipped += 1;
                        continue;
                    }
                    yield record.clone();
                    yielded += 1;
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use griddle_core::{Error, FieldFilter, OrderBy};

    use futures_util::TryStreamExt;
    use std::borrow::Cow;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: &'static str,
        kind: &'static str,
    }

    impl Record for Item {
        fn field(&self, name: &str) -> Option<Cow<'_, str>> {
            match name {
                "name" => Some(Cow::Borrowed(self.name)),
                "kind" => Some(Cow::Borrowed(self.kind)),
                _ => None,
            }
        }
    }

    fn repo() -> MemRepository<Item> {
        MemRepository::new(
            ["name", "kind"],
            vec![
                Item { name: "pear", kind: "fruit" },
                Item { name: "beet", kind: "root" },
                Item { name: "apple", kind: "fruit" },
                Item { name: "carrot", kind: "root" },
            ],
        )
    }

    async fn names(repo: &MemRepository<Item>, query: Query) -> Vec<&'static str> {
        let records: Vec<Item> = repo.fetch(query).await.unwrap().try_collect().await.unwrap();
        records.into_iter().map(|item| item.name).collect()
    }

    #[tokio::test]
    async fn empty_query_yields_everything_in_order() {
        let yielded = names(&repo(), Query::default()).await;
        assert_eq!(yielded, vec!["pear", "beet", "apple", "carrot"]);
    }

    #[tokio::test]
    async fn any_of_filters_or_combine() {
        let query = Query {
            any_of: vec![
                FieldFilter::contains("name", "pea"),
                FieldFilter::contains("name", "bee"),
            ],
            ..Query::default()
        };
        assert_eq!(names(&repo(), query).await, vec!["pear", "beet"]);
    }

    #[tokio::test]
    async fn all_of_filters_and_combine() {
        let query = Query {
            all_of: vec![
                FieldFilter::equals("kind", "fruit"),
                FieldFilter::contains("name", "app"),
            ],
            ..Query::default()
        };
        assert_eq!(names(&repo(), query).await, vec!["apple"]);
    }

    #[tokio::test]
    async fn ordering_sorts_by_field_text() {
        let query = Query {
            order: Some(OrderBy::ascending("name")),
            ..Query::default()
        };
        assert_eq!(
            names(&repo(), query).await,
            vec!["apple", "beet", "carrot", "pear"]
        );

        let query = Query {
            order: Some(OrderBy::descending("name")),
            ..Query::default()
        };
        assert_eq!(
            names(&repo(), query).await,
            vec!["pear", "carrot", "beet", "apple"]
        );
    }

    #[tokio::test]
    async fn pagination_windows_the_ordered_set() {
        let query = Query {
            order: Some(OrderBy::ascending("name")),
            limit: Some(2),
            offset: Some(1),
            ..Query::default()
        };
        assert_eq!(names(&repo(), query).await, vec!["beet", "carrot"]);
    }

    #[tokio::test]
    async fn unordered_pagination_respects_the_limit() {
        let query = Query {
            limit: Some(3),
            ..Query::default()
        };
        assert_eq!(names(&repo(), query).await, vec!["pear", "beet", "apple"]);
    }

    #[tokio::test]
    async fn offset_past_the_end_yields_nothing() {
        let query = Query {
            offset: Some(10),
            ..Query::default()
        };
        assert!(names(&repo(), query).await.is_empty());
    }

    #[tokio::test]
    async fn unknown_field_rejected() {
        let query = Query {
            all_of: vec![FieldFilter::equals("color", "red")],
            ..Query::default()
        };
        let err = repo().fetch(query).await.err().unwrap();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::UnknownField { field }) if field == "color"
        ));
    }

    #[tokio::test]
    async fn records_missing_the_field_never_match() {
        let repo = MemRepository::new(
            ["name", "kind", "note"],
            vec![Item { name: "pear", kind: "fruit" }],
        );
        let query = Query {
            all_of: vec![FieldFilter::contains("note", "x")],
            ..Query::default()
        };
        assert!(names(&repo, query).await.is_empty());
    }
}
