//! Table view trait.

use async_trait::async_trait;

use crate::Result;
use crate::render::{RenderRequest, RenderedTable};
use crate::types::{Headers, Row, SearchFields};

use super::Repository;

/// The table-view contract.
///
/// A concrete view binds a repository, declares its column headers, and
/// projects each record into a row of display values. Search is an optional
/// capability enabled by declaring search fields. Views are stateless
/// between renders: each render constructs its own repository handle, so one
/// instance can serve concurrent renders without locking.
#[async_trait]
pub trait TableView: Send + Sync {
    /// The record type the bound repository yields.
    type Record: Send;
    /// The repository type bound by this view.
    type Repository: Repository<Record = Self::Record>;

    /// Construct the repository handle for one render cycle.
    ///
    /// Called once per render; must not have side effects beyond building
    /// the handle.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a usable handle cannot be built.
    fn repository(&self) -> Result<Self::Repository>;

    /// The ordered column labels. Must be non-empty.
    fn headers(&self) -> Headers;

    /// Project one record into a row of display values.
    ///
    /// A pure projection, called once per yielded record. The returned row
    /// must have exactly as many cells as [`headers`](Self::headers) has
    /// labels; the render pipeline rejects mismatches.
    fn row(&self, record: &Self::Record) -> Row;

    /// Fields that participate in free-text search.
    ///
    /// The default declares none, which disables search for the view.
    fn search_by(&self) -> SearchFields {
        SearchFields::none()
    }

    /// Run the render pipeline for this view.
    async fn render(&self, request: &RenderRequest) -> Result<RenderedTable>
    where
        Self: Sized,
    {
        crate::render::render(self, request).await
    }
}
