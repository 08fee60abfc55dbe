//! griddle-mem - In-memory repository backend for griddle.

mod load;
mod repository;

pub use load::{infer_schema, records_from_json, records_from_jsonl};
pub use repository::MemRepository;
