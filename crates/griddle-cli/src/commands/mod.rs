//! Command implementations.

pub mod fields;
pub mod render;

pub use fields::FieldsArgs;
pub use render::RenderArgs;
