// file: src/query/mod.rs
// description: query translation module exports
// reference: internal module structure

pub mod builder;
pub mod dsl;
pub mod tokenizer;

pub use builder::SearchMode;
pub use dsl::{BoolQuery, Fuzziness, MultiMatchQuery, NestedQuery, QueryClause, SearchQuery, TermQuery};
pub use tokenizer::{normalize, tokenize};
