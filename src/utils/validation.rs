// file: src/utils/validation.rs
// description: configuration validation helpers
// reference: input validation patterns

use crate::error::{Result, SearchError};

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        let host = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(|| SearchError::Validation(format!("Invalid URL format: {}", url)))?;

        if host.trim_matches('/').is_empty() {
            return Err(SearchError::Validation(format!("URL has no host: {}", url)));
        }

        Ok(())
    }

    /// A password is meaningless without a username to pair it with.
    pub fn validate_credentials(username: Option<&str>, password: Option<&str>) -> Result<()> {
        match (username, password) {
            (None, Some(_)) => Err(SearchError::Validation(
                "Password given without a username".to_string(),
            )),
            (Some(user), _) if user.trim().is_empty() => Err(SearchError::Validation(
                "Username is empty".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
