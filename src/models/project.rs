// file: src/models/project.rs
// description: project document stored in the projects index
// reference: https://www.elastic.co/guide/en/elasticsearch/reference/current/date.html

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hashtags: Vec<Tag>,
    #[serde(default)]
    pub users: Vec<Tag>,
}

/// Shape shared by the nested `hashtags` and `users` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    EpochMillis(i64),
    Text(String),
}

/// Accepts the inputs of the engine's default `date` format:
/// RFC 3339, a date-time without offset, a bare date, or epoch millis
/// (as a number or a string).
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawDate>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawDate::EpochMillis(ms)) => DateTime::from_timestamp_millis(ms)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("epoch millis out of range: {}", ms))),
        Some(RawDate::Text(text)) => parse_date(&text)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unrecognized date: {}", text))),
    }
}

pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    text.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

impl ProjectDocument {
    pub fn hashtag_names(&self) -> Vec<&str> {
        self.hashtags.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn user_names(&self) -> Vec<&str> {
        self.users.iter().map(|u| u.name.as_str()).collect()
    }

    pub fn format_summary(&self, score: Option<f64>) -> String {
        let score = score
            .map(|s| format!("{:.4}", s))
            .unwrap_or_else(|| "-".to_string());

        let mut out = format!("Score: {} | {} ({})", score, self.name, self.slug);
        if !self.description.is_empty() {
            out.push_str(&format!("\n   {}", self.description));
        }
        if !self.hashtags.is_empty() {
            out.push_str(&format!("\n   Hashtags: {}", self.hashtag_names().join(", ")));
        }
        if !self.users.is_empty() {
            out.push_str(&format!("\n   Users: {}", self.user_names().join(", ")));
        }
        out
    }
}
