//! Record stream trait.

use futures_core::Stream;

use crate::Result;

/// A lazy, pull-based stream of records produced by a repository fetch.
pub trait RecordStream<R>: Stream<Item = Result<R>> + Send {}

impl<T, R> RecordStream<R> for T where T: Stream<Item = Result<R>> + Send {}
