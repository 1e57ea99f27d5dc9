use serde::{Deserialize, Serialize};

/// Limits and policy for query-string parsing, passed by reference at
/// parser construction instead of read from process-global configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// When false, clients may not request `page[size]=0` to turn
    /// pagination off.
    #[serde(default = "default_true")]
    pub allow_disable_pagination: bool,
    #[serde(default)]
    pub max_page_size: Option<i64>,
    #[serde(default)]
    pub max_include_depth: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            allow_disable_pagination: true,
            max_page_size: None,
            max_include_depth: None,
        }
    }
}
