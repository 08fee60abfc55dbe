//! The render pipeline.
//!
//! Turns a [`TableView`] and a caller-supplied [`RenderRequest`] into a
//! [`RenderedTable`]: bind the repository, apply search and filters,
//! delegate ordering and pagination, then project each record into a
//! width-checked row. Nothing persists on the view between renders.

use futures_util::{StreamExt, pin_mut};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Result;
use crate::error::{ConfigurationError, ProjectionError};
use crate::query::{FieldFilter, OrderBy, Page, Query};
use crate::traits::{Repository, TableView};
use crate::types::{Headers, Row, SearchPolicy};

/// Caller-supplied render configuration.
///
/// All parts are optional: an empty request renders the unfiltered,
/// unordered, unpaginated table.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    search: Option<String>,
    filters: Vec<FieldFilter>,
    order: Option<OrderBy>,
    page: Option<Page>,
    search_policy: SearchPolicy,
}

impl RenderRequest {
    /// An empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrow rows by the view's declared search fields.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Add an exact-match filter; filters AND-combine.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(FieldFilter::equals(field, value));
        self
    }

    /// Delegate ordering to the repository.
    pub fn with_order(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    /// Delegate pagination to the repository.
    pub fn with_page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    /// What to do when a search term is supplied but the view declares no
    /// search fields.
    pub fn with_search_policy(mut self, policy: SearchPolicy) -> Self {
        self.search_policy = policy;
        self
    }

    /// The search term, if any.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

/// The result payload of a render: headers plus header-aligned rows.
///
/// Handed to whatever renders the table; row order matches header order
/// positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTable {
    /// The ordered column labels.
    pub headers: Headers,
    /// One row per record, aligned positionally with the headers.
    pub rows: Vec<Row>,
}

/// Run the render pipeline for a view.
///
/// Configuration errors surface before any record is processed; a
/// projection failure aborts the render with no partial rows delivered.
pub async fn render<V: TableView>(view: &V, request: &RenderRequest) -> Result<RenderedTable> {
    let headers = view.headers();
    if headers.is_empty() {
        return Err(ConfigurationError::EmptyHeaders.into());
    }

    let repo = view.repository()?;
    let query = build_query(view, &repo, request)?;

    let records = repo.fetch(query).await?;
    pin_mut!(records);

    let mut rows = Vec::new();
    let mut index = 0u64;
    while let Some(record) = records.next().await {
        let record = record?;
        let row = view.row(&record);
        if row.len() != headers.len() {
            return Err(ProjectionError::new(index, headers.len(), row.len()).into());
        }
        rows.push(row);
        index += 1;
    }

    debug!(rows = rows.len(), "rendered table");
    Ok(RenderedTable { headers, rows })
}

fn build_query<V: TableView>(
    view: &V,
    repo: &V::Repository,
    request: &RenderRequest,
) -> Result<Query> {
    let mut query = Query::default();

    if let Some(term) = request.search() {
        let fields = view.search_by();
        if fields.is_empty() {
            match request.search_policy {
                SearchPolicy::Ignore => {
                    warn!(term, "search term ignored: view declares no search fields");
                }
                SearchPolicy::Reject => {
                    return Err(ConfigurationError::SearchUnavailable.into());
                }
            }
        } else {
            for field in fields.iter() {
                if !repo.schema().iter().any(|f| f == field) {
                    return Err(ConfigurationError::UnknownField {
                        field: field.to_string(),
                    }
                    .into());
                }
                query.any_of.push(FieldFilter::contains(field, term));
            }
        }
    }

    query.all_of = request.filters.clone();
    query.order = request.order.clone();
    if let Some(page) = request.page {
        query.limit = Some(page.limit());
        query.offset = Some(page.offset());
    }

    Ok(query)
}
