use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullsOrder {
    #[serde(rename = "nullsfirst")]
    NullsFirst,
    #[serde(rename = "nullslast")]
    NullsLast,
}

/// One resolved sort directive. `field` and `joins` are model-level names,
/// ready for the query builder; `joins` lists the to-one join fields for the
/// dotted traversal path, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    pub order: SortOrder,
    pub nulls: Option<NullsOrder>,
    pub joins: Vec<String>,
}
