use std::fmt;

/// Validation failure for one query-string directive.
///
/// Every variant carries the client-facing message; `BadRequest` also names
/// the offending parameter so error bodies can point at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    InvalidArgument(String),
    BadRequest { message: String, parameter: String },
    InvalidFilters(String),
    InvalidField(String),
    InvalidSort(String),
    InvalidInclude(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            QueryError::BadRequest { message, .. } => write!(f, "{message}"),
            QueryError::InvalidFilters(msg) => write!(f, "invalid filters: {msg}"),
            QueryError::InvalidField(msg) => write!(f, "invalid field: {msg}"),
            QueryError::InvalidSort(msg) => write!(f, "invalid sort: {msg}"),
            QueryError::InvalidInclude(msg) => write!(f, "invalid include: {msg}"),
        }
    }
}

impl std::error::Error for QueryError {}

impl QueryError {
    pub fn bad_request(message: impl Into<String>, parameter: impl Into<String>) -> Self {
        QueryError::BadRequest {
            message: message.into(),
            parameter: parameter.into(),
        }
    }

    pub fn status_code(&self) -> http::StatusCode {
        match self {
            // constructor misuse by the caller, not a client error
            QueryError::InvalidArgument(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => http::StatusCode::BAD_REQUEST,
        }
    }

    /// The query parameter this error points at, when one is known.
    pub fn source_parameter(&self) -> Option<&str> {
        match self {
            QueryError::BadRequest { parameter, .. } => Some(parameter),
            _ => None,
        }
    }
}
