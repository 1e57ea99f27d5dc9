//! Adapter between `http` request/response types and the query-string
//! parser: extracts the raw parameter mapping from a request URI and renders
//! `QueryError` values as JSON error responses.

use http::{Request, Response, StatusCode};
use wicket_query::{Params, QueryError};

/// Decode the request URI's query string into a parameter mapping. A request
/// without a query string yields an empty mapping.
pub fn params_from_request<T>(req: &Request<T>) -> Params {
    req.uri().query().map(decode_query).unwrap_or_default()
}

/// Percent-decode `a=b&c=d` pairs. When a key repeats, the first occurrence
/// wins, matching what frameworks hand over as a flat parameter dict.
pub fn decode_query(query: &str) -> Params {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();

    let mut params = Params::new();
    for (key, value) in pairs {
        if !params.contains_key(&key) {
            params.insert(key, value);
        }
    }
    params
}

/// Render a parse/validation error as a JSON response body, carrying the
/// source parameter when the error names one.
pub fn error_response(error: &QueryError) -> Response<Vec<u8>> {
    let body = match error.source_parameter() {
        Some(parameter) => serde_json::json!({
            "error": error.to_string(),
            "source": { "parameter": parameter },
        }),
        None => serde_json::json!({ "error": error.to_string() }),
    };
    json_response(error.status_code(), body.to_string().into_bytes())
}

pub fn json_response(status: StatusCode, body: impl Into<Vec<u8>>) -> Response<Vec<u8>> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}
