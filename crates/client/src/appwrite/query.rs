//! Appwrite document queries.
//!
//! List endpoints take repeated `queries[]` parameters, each a JSON object
//! such as `{"method":"equal","attribute":"accountId","values":["abc"]}`.

use serde_json::{Value, json};

/// A single list-documents query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Attribute equals one of the values.
    Equal { attribute: String, values: Vec<String> },
    /// Full-text search on an indexed attribute.
    Search { attribute: String, value: String },
    /// Maximum number of documents.
    Limit(u32),
}

impl Query {
    /// `attribute == value`.
    #[must_use]
    pub fn equal(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equal {
            attribute: attribute.into(),
            values: vec![value.into()],
        }
    }

    /// Full-text search.
    #[must_use]
    pub fn search(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Search {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Result limit.
    #[must_use]
    pub const fn limit(limit: u32) -> Self {
        Self::Limit(limit)
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Equal { attribute, values } => {
                json!({ "method": "equal", "attribute": attribute, "values": values })
            }
            Self::Search { attribute, value } => {
                json!({ "method": "search", "attribute": attribute, "values": [value] })
            }
            Self::Limit(limit) => json!({ "method": "limit", "values": [limit] }),
        }
    }

    /// Serialized form for the `queries[]` parameter.
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_value().to_string()
    }
}

/// Build `(name, value)` pairs for `RequestBuilder::query`.
#[must_use]
pub fn to_params(queries: &[Query]) -> Vec<(&'static str, String)> {
    queries.iter().map(|q| ("queries[]", q.encode())).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_encoding() {
        let value: Value = serde_json::from_str(&Query::equal("accountId", "abc").encode()).unwrap();
        assert_eq!(
            value,
            json!({ "method": "equal", "attribute": "accountId", "values": ["abc"] })
        );
    }

    #[test]
    fn test_search_encoding() {
        let value: Value = serde_json::from_str(&Query::search("name", "burger").encode()).unwrap();
        assert_eq!(value["method"], "search");
        assert_eq!(value["values"][0], "burger");
    }

    #[test]
    fn test_limit_encoding() {
        let value: Value = serde_json::from_str(&Query::limit(25).encode()).unwrap();
        assert_eq!(value, json!({ "method": "limit", "values": [25] }));
    }

    #[test]
    fn test_params_repeat_name() {
        let params = to_params(&[Query::limit(1), Query::limit(2)]);
        assert_eq!(params.len(), 2);
        assert!(params.iter().all(|(name, _)| *name == "queries[]"));
    }
}
