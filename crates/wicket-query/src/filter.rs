use serde::{Deserialize, Serialize};

/// One element of the `filter` parameter: either a single condition or a
/// nested boolean group. Decoded from the JSON form
/// `[{"name": "age", "op": "gt", "val": 21}, {"or": [...]}]`.
///
/// Conditions are not validated here — field existence and operator legality
/// belong to the downstream query builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    And { and: Vec<FilterNode> },
    Or { or: Vec<FilterNode> },
    Not { not: Box<FilterNode> },
    Condition(FilterCondition),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub name: String,
    pub op: String,
    #[serde(default)]
    pub val: serde_json::Value,
}

impl FilterNode {
    /// Equality condition, the form synthesized from `filter[name]=value`.
    pub fn eq(name: impl Into<String>, val: serde_json::Value) -> Self {
        FilterNode::Condition(FilterCondition {
            name: name.into(),
            op: "eq".into(),
            val,
        })
    }
}
