mod config;
mod error;
mod filter;
mod params;
mod querystring;
mod sort;

pub use config::QueryConfig;
pub use error::QueryError;
pub use filter::{FilterCondition, FilterNode};
pub use params::{ParamValue, Params};
pub use querystring::{MANAGED_KEYS, QueryString};
pub use sort::{NullsOrder, SortField, SortOrder};
