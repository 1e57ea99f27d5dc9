use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use wicket_schema::{Schema, SchemaRegistry};

use crate::config::QueryConfig;
use crate::error::QueryError;
use crate::filter::FilterNode;
use crate::params::{ParamValue, Params};
use crate::sort::{NullsOrder, SortField, SortOrder};

/// Top-level query-parameter names this parser owns. Anything else in the
/// query string belongs to other layers (caching, analytics) and is ignored.
pub const MANAGED_KEYS: [&str; 6] = ["filter", "page", "fields", "sort", "include", "q"];

// Eg. -[nullslast]author.publisher.name -> ("-", "nullslast", "author.publisher.", "name")
static SORT_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(-?)(?:\[(nullsfirst|nullslast)\])?((?:\w+\.)*)(\w+)$",
    )
    .expect("sort segment pattern is valid")
});

/// JSON:API query-string parser.
///
/// Holds the raw parameter mapping plus borrowed schema and config handles;
/// each accessor parses and validates one directive on every call. Nothing is
/// cached and nothing is validated up front, so a malformed `sort` does not
/// get in the way of reading `page`.
pub struct QueryString<'a> {
    params: Params,
    schema: &'a Schema,
    registry: &'a SchemaRegistry,
    config: &'a QueryConfig,
}

impl<'a> QueryString<'a> {
    /// `schema` is the root resource schema of the endpoint being queried;
    /// `registry` resolves related types for sparse fieldsets and sort
    /// traversal.
    pub fn new(
        params: Params,
        schema: &'a Schema,
        registry: &'a SchemaRegistry,
        config: &'a QueryConfig,
    ) -> Self {
        Self {
            params,
            schema,
            registry,
            config,
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The raw parameters restricted to directive names this parser owns,
    /// including `filter[...]` bracket groups.
    pub fn managed(&self) -> Params {
        self.params
            .iter()
            .filter(|(key, _)| {
                MANAGED_KEYS.iter().any(|name| {
                    key.as_str() == *name
                        || key
                            .strip_prefix(name)
                            .is_some_and(|rest| rest.starts_with('['))
                })
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Filter conditions, in order: conditions decoded from the JSON
    /// `filter` parameter first, then equality conditions synthesized from
    /// `filter[name]=value` pairs. The two forms are concatenated as-is,
    /// never merged or deduplicated.
    pub fn filters(&self) -> Result<Vec<FilterNode>, QueryError> {
        let mut results = Vec::new();

        if let Some(raw) = self.params.get("filter") {
            let nodes: Vec<FilterNode> = serde_json::from_str(raw)
                .map_err(|e| QueryError::InvalidFilters(format!("parse error: {e}")))?;
            results.extend(nodes);
        }

        for (name, value) in self.params.bracket_values("filter[")? {
            let val = match value {
                ParamValue::Scalar(s) => serde_json::Value::String(s),
                ParamValue::List(items) => serde_json::Value::Array(
                    items.into_iter().map(serde_json::Value::String).collect(),
                ),
            };
            results.push(FilterNode::eq(name, val));
        }

        Ok(results)
    }

    /// Validated `page[...]` parameters. Values stay the strings the client
    /// sent; validation only requires that they parse as integers and respect
    /// the configured pagination policy.
    pub fn pagination(&self) -> Result<BTreeMap<String, String>, QueryError> {
        let mut result = BTreeMap::new();
        let mut size: Option<i64> = None;

        for (key, value) in self.params.bracket_values("page")? {
            if key != "number" && key != "size" {
                return Err(QueryError::bad_request(
                    format!("{key} is not a valid parameter of pagination"),
                    "page",
                ));
            }
            let parameter = format!("page[{key}]");
            let raw = match value {
                ParamValue::Scalar(s) => s,
                ParamValue::List(_) => {
                    return Err(QueryError::bad_request("parse error", parameter));
                }
            };
            let parsed: i64 = raw
                .parse()
                .map_err(|_| QueryError::bad_request("parse error", parameter))?;
            if key == "size" {
                size = Some(parsed);
            }
            result.insert(key, raw);
        }

        if !self.config.allow_disable_pagination && size.unwrap_or(1) == 0 {
            return Err(QueryError::bad_request(
                "you are not allowed to disable pagination",
                "page[size]",
            ));
        }

        if let (Some(max), Some(size)) = (self.config.max_page_size, size) {
            if size > max {
                return Err(QueryError::bad_request(
                    format!("maximum page size is {max}"),
                    "page[size]",
                ));
            }
        }

        Ok(result)
    }

    /// Sparse fieldsets: `fields[<type>]=a,b` becomes `<type> -> [a, b]`,
    /// with every requested field checked against that type's schema.
    pub fn fields(&self) -> Result<BTreeMap<String, Vec<String>>, QueryError> {
        let mut result = BTreeMap::new();

        for (type_name, value) in self.params.bracket_values("fields")? {
            let requested = value.into_list();
            let schema = self.registry.get(&type_name).ok_or_else(|| {
                QueryError::InvalidField(format!("unknown resource type {type_name}"))
            })?;
            for field in &requested {
                if !schema.declares(field) {
                    return Err(QueryError::InvalidField(format!(
                        "{} has no attribute {}",
                        schema.type_name, field
                    )));
                }
            }
            result.insert(type_name, requested);
        }

        Ok(result)
    }

    /// Sort directives from the comma-separated `sort` parameter. Each
    /// segment is `-` for descending, an optional `[nullsfirst]`/`[nullslast]`
    /// marker, a dotted to-one relationship path, and a final attribute name,
    /// all resolved against the schema graph to model-level names.
    pub fn sorting(&self) -> Result<Vec<SortField>, QueryError> {
        let raw = match self.params.get("sort") {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(Vec::new()),
        };

        let mut results = Vec::new();
        for segment in raw.split(',') {
            let caps = SORT_SEGMENT.captures(segment).ok_or_else(|| {
                QueryError::InvalidSort(format!("invalid sort field format {segment}"))
            })?;
            let order = if caps[1].is_empty() {
                SortOrder::Asc
            } else {
                SortOrder::Desc
            };
            let nulls = caps.get(2).map(|m| match m.as_str() {
                "nullsfirst" => NullsOrder::NullsFirst,
                _ => NullsOrder::NullsLast,
            });
            let path = caps.get(3).map_or("", |m| m.as_str());
            let field_name = &caps[4];

            let mut current = self.schema;
            let mut joins = Vec::new();
            for join in path.split('.').filter(|s| !s.is_empty()) {
                let field = current.field(join).ok_or_else(|| {
                    QueryError::InvalidSort(format!(
                        "{} has no relationship {}",
                        current.type_name, join
                    ))
                })?;
                let relationship = field.relationship.as_ref().ok_or_else(|| {
                    QueryError::InvalidSort(format!(
                        "{} has no relationship {}",
                        current.type_name, join
                    ))
                })?;
                if relationship.many {
                    return Err(QueryError::InvalidSort(format!(
                        "cannot sort across the to-many relationship {} on {}",
                        join, current.type_name
                    )));
                }
                joins.push(field.model_field.clone());
                current = self.registry.get(&relationship.related_type).ok_or_else(|| {
                    QueryError::InvalidSort(format!(
                        "unknown resource type {} behind relationship {}",
                        relationship.related_type, join
                    ))
                })?;
            }

            let field = current.field(field_name).ok_or_else(|| {
                QueryError::InvalidSort(format!(
                    "{} has no attribute {}",
                    current.type_name, field_name
                ))
            })?;
            if field.relationship.is_some() {
                return Err(QueryError::InvalidSort(format!(
                    "cannot sort on {field_name} because it is a relationship field"
                )));
            }

            results.push(SortField {
                field: field.model_field.clone(),
                order,
                nulls,
                joins,
            });
        }

        Ok(results)
    }

    /// Raw dotted include paths from the comma-separated `include`
    /// parameter, depth-checked against the configured maximum.
    pub fn include(&self) -> Result<Vec<String>, QueryError> {
        let raw = match self.params.get("include") {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(Vec::new()),
        };

        let paths: Vec<String> = raw.split(',').map(str::to_string).collect();
        if let Some(max) = self.config.max_include_depth {
            for path in &paths {
                if path.split('.').count() > max {
                    return Err(QueryError::InvalidInclude(format!(
                        "you cannot use include through more than {max} relationships"
                    )));
                }
            }
        }

        Ok(paths)
    }
}
