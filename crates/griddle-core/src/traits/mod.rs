//! Core traits for view and repository behavior.

mod repository;
mod stream;
mod table_view;

pub use repository::Repository;
pub use stream::RecordStream;
pub use table_view::TableView;
