use std::collections::HashMap;

/// A query parameter value: either a single scalar or a list of scalars.
///
/// A list of N values under key `k` contributes N `k=v` pairs to the encoded
/// string, not array syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

/// Query parameters for a single call. Iteration order is unspecified, so the
/// encoded pair order is too.
pub type QueryParams = HashMap<String, QueryValue>;

/// Encodes parameters as `key=value` pairs joined by `&`.
///
/// Values are written verbatim; callers supplying characters that need
/// percent-encoding must encode them beforehand.
pub fn query_string(params: &QueryParams) -> String {
    let mut pairs: Vec<String> = Vec::new();
    for (key, value) in params {
        match value {
            QueryValue::Scalar(v) => pairs.push(format!("{key}={v}")),
            QueryValue::List(values) => {
                for v in values {
                    pairs.push(format!("{key}={v}"));
                }
            }
        }
    }
    pairs.join("&")
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self { QueryValue::Scalar(value.to_string()) }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self { QueryValue::Scalar(value) }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self { QueryValue::Scalar(value.to_string()) }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self { QueryValue::Scalar(value.to_string()) }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self { QueryValue::Scalar(value.to_string()) }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self { QueryValue::Scalar(value.to_string()) }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self { QueryValue::List(values) }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        QueryValue::List(values.into_iter().map(str::to_string).collect())
    }
}
