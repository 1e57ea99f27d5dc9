mod registry;
mod schema;

pub use registry::SchemaRegistry;
pub use schema::{FieldDef, Relationship, Schema};
