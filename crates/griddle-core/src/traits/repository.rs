//! Repository trait.

use async_trait::async_trait;

use crate::Result;
use crate::query::Query;

use super::RecordStream;

/// A queryable handle over a homogeneous collection of records.
///
/// A repository supports field filtering, ordering, and offset/limit
/// pagination, and enumerates matching records lazily. Implementations
/// validate the fields a [`Query`] references against [`schema`](Self::schema)
/// and reject unknown names. A handle is constructed per render and
/// discarded once its stream is drained or dropped.
#[async_trait]
pub trait Repository: Send + Sync {
    /// The record type this repository yields.
    type Record: Send;
    /// Stream type produced by [`fetch`](Self::fetch).
    type Records: RecordStream<Self::Record>;

    /// Field names the underlying schema exposes for filtering and ordering.
    fn schema(&self) -> &[String];

    /// Narrow, order, and paginate the collection, returning a lazy stream
    /// of matching records.
    ///
    /// The stream is finite, bounded by the query's pagination window, and
    /// restartable per call: fetching again with the same query over an
    /// unchanged collection yields the same records.
    async fn fetch(&self, query: Query) -> Result<Self::Records>;
}
