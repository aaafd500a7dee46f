// file: src/query/builder.rs
// description: maps a raw query string to a structured search query per search mode
// reference: https://www.elastic.co/guide/en/elasticsearch/reference/current/query-dsl-nested-query.html

use crate::query::dsl::{Fuzziness, MultiMatchQuery, QueryClause, SearchQuery};
use crate::query::tokenizer::tokenize;

/// Flat text fields searched by fuzzy mode.
pub const FUZZY_FIELDS: [&str; 2] = ["slug", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Every token must equal the name of some project member.
    Users,
    /// Every token must equal the name of some project hashtag.
    Hashtags,
    /// Approximate match of the whole query over slug and description.
    Fuzzy,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [SearchMode::Users, SearchMode::Hashtags, SearchMode::Fuzzy];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Users => "users",
            SearchMode::Hashtags => "hashtags",
            SearchMode::Fuzzy => "fuzzy",
        }
    }

    pub fn route(&self) -> &'static str {
        match self {
            SearchMode::Users => "/users",
            SearchMode::Hashtags => "/hashtags",
            SearchMode::Fuzzy => "/fuzzy",
        }
    }

    /// Nested collection a tokenized mode searches, `None` for fuzzy.
    pub fn nested_path(&self) -> Option<&'static str> {
        match self {
            SearchMode::Users => Some("users"),
            SearchMode::Hashtags => Some("hashtags"),
            SearchMode::Fuzzy => None,
        }
    }

    pub fn build(&self, raw: &str) -> SearchQuery {
        match self.nested_path() {
            Some(path) => all_nested_names(path, &tokenize(raw)),
            None => fuzzy(raw),
        }
    }
}

/// One nested term query per token, all required. Each token is scoped
/// separately, so different tokens may match different sub-documents.
fn all_nested_names(path: &str, tokens: &[String]) -> SearchQuery {
    let field = format!("{}.name", path);

    let clauses = tokens
        .iter()
        .map(|token| QueryClause::nested(path, QueryClause::term(field.as_str(), token.as_str())))
        .collect();

    SearchQuery::new(QueryClause::must(clauses))
}

fn fuzzy(raw: &str) -> SearchQuery {
    SearchQuery::new(QueryClause::MultiMatch(MultiMatchQuery {
        query: raw.to_string(),
        fields: FUZZY_FIELDS.iter().map(|f| f.to_string()).collect(),
        fuzziness: Fuzziness::Auto,
    }))
}
