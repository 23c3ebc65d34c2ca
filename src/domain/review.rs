use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub date: String,
    pub rating: u8,
    pub app_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    /// Number of "helpful" votes, only when positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub useful: Option<u32>,
    /// Number of "not helpful" votes, only when positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub useless: Option<u32>,
}

/// A review as sent to the summarizer: no author, no date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrippedReview<'a> {
    pub rating: u8,
    pub app_version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub useful: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub useless: Option<u32>,
}

impl Review {
    pub fn new(author: &str, date: &str, rating: u8, content: &str) -> Self {
        Self {
            author: author.to_string(),
            date: date.to_string(),
            rating,
            app_version: String::new(),
            title: None,
            content: content.to_string(),
            useful: None,
            useless: None,
        }
    }

    /// Characters of content plus title.
    pub fn informativeness(&self) -> usize {
        self.content.chars().count() + self.title.as_deref().map_or(0, |t| t.chars().count())
    }

    /// Parsed review date; accepts RFC 3339 and plain `YYYY-MM-DD`.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let date = self.date.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    pub fn stripped(&self) -> StrippedReview<'_> {
        StrippedReview {
            rating: self.rating,
            app_version: &self.app_version,
            title: self.title.as_deref(),
            content: &self.content,
            useful: self.useful,
            useless: self.useless,
        }
    }

    /// Deterministic hash of author and content, used for deduplication
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.author.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.content.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}
