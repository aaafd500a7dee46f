// file: src/query/tokenizer.rs
// description: query normalization and space tokenization

/// Lower-cases a raw query string.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
}

/// Splits a normalized query on single spaces.
///
/// Order and duplicates are kept. No token is dropped, so an empty query
/// yields one empty token and a double space yields an empty token between
/// its neighbours.
pub fn tokenize(raw: &str) -> Vec<String> {
    normalize(raw).split(' ').map(str::to_string).collect()
}
