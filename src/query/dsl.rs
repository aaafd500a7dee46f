// file: src/query/dsl.rs
// description: typed subset of the Elasticsearch query DSL
// reference: https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl.html

use crate::error::{Result, SearchError};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Request body for `POST /{index}/_search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    pub query: QueryClause,
}

impl SearchQuery {
    pub fn new(query: QueryClause) -> Self {
        Self { query }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| SearchError::Serialization(e.to_string()))
    }
}

/// One query clause; serializes as a single-key object named after the clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryClause {
    Term(TermQuery),
    Nested(NestedQuery),
    Bool(BoolQuery),
    MultiMatch(MultiMatchQuery),
}

impl QueryClause {
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        QueryClause::Term(TermQuery {
            field: field.into(),
            value: value.into(),
        })
    }

    pub fn nested(path: impl Into<String>, query: QueryClause) -> Self {
        QueryClause::Nested(NestedQuery {
            path: path.into(),
            query: Box::new(query),
        })
    }

    pub fn must(clauses: Vec<QueryClause>) -> Self {
        QueryClause::Bool(BoolQuery {
            must: clauses,
        })
    }
}

/// Exact match of an unanalyzed value: `{"<field>": "<value>"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    pub field: String,
    pub value: String,
}

impl Serialize for TermQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.value)?;
        map.end()
    }
}

/// Scopes `query` to individual sub-documents under `path`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedQuery {
    pub path: String,
    pub query: Box<QueryClause>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    pub must: Vec<QueryClause>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiMatchQuery {
    pub query: String,
    pub fields: Vec<String>,
    pub fuzziness: Fuzziness,
}

/// Edit distance tolerance; `AUTO` lets the engine scale it by term length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Fuzziness {
    #[serde(rename = "AUTO")]
    Auto,
}
