//! griddle-core - Core table-view traits and types.

pub mod error;
pub mod query;
pub mod record;
pub mod render;
pub mod traits;
pub mod types;

pub use error::Error;
pub use query::{Direction, FieldFilter, FilterOp, OrderBy, Page, Query};
pub use record::{JsonRecord, Record};
pub use render::{RenderRequest, RenderedTable, render};
pub use traits::{RecordStream, Repository, TableView};
pub use types::{Headers, Row, SearchFields, SearchPolicy};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
