//! Download and revenue estimates scraped from a Sensor Tower overview page.
//!
//! The numbers live in the page's meta description as prose, e.g.
//! `... has 5M downloads and $100M revenue in the past month`. The page is
//! not an API; when its wording changes the estimates silently fall back to
//! the placeholder.

use std::sync::Arc;

use scraper::{Html, Selector};

use crate::domain::SensorTowerInfo;
use crate::fetcher::{FetchResult, Fetcher};

pub struct SensorTower {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl SensorTower {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { fetcher }
    }

    /// Estimates for `app_id`; placeholders on any failure.
    pub async fn revenue_and_downloads(&self, app_id: &str) -> SensorTowerInfo {
        let url = format!("https://app.sensortower.com/overview/{}?country=US", app_id);

        match self.fetcher.get(&url).await {
            Ok(FetchResult::Content { body }) => parse_page(&String::from_utf8_lossy(&body)),
            Ok(FetchResult::Failed { status }) => {
                tracing::warn!("Failed to fetch {}. Status code: {}", url, status);
                SensorTowerInfo::default()
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                SensorTowerInfo::default()
            }
        }
    }
}

/// Read the estimates out of an overview page.
pub fn parse_page(html: &str) -> SensorTowerInfo {
    match meta_description(html).and_then(|content| extract_estimates(&content)) {
        Some((downloads, revenue)) => SensorTowerInfo::new(Some(downloads), Some(revenue)),
        None => SensorTowerInfo::default(),
    }
}

fn meta_description(html: &str) -> Option<String> {
    let selector = Selector::parse(r#"meta[name="description"]"#).ok()?;
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(String::from)
}

/// `(downloads, revenue)` from the description prose.
///
/// Downloads is the word right before the last "downloads". Revenue is the
/// word right before the last "revenue", with a preceding `<` kept attached.
pub fn extract_estimates(content: &str) -> Option<(String, String)> {
    if !content.contains("downloads") || !content.contains("revenue") {
        return None;
    }

    let downloads = segment_before_last(content, "downloads")?
        .split_whitespace()
        .last()?
        .to_string();

    let words: Vec<&str> = segment_before_last(content, "revenue")?
        .split_whitespace()
        .collect();
    let tail = &words[words.len().saturating_sub(2)..];
    let revenue = match tail {
        ["<", ..] => tail.concat(),
        [_, amount] => amount.to_string(),
        _ => return None,
    };
    let revenue = if revenue == "app's" {
        "???".to_string()
    } else {
        revenue
    };

    Some((downloads, revenue))
}

/// Text between the last two occurrences of `word`, or from the start when
/// it occurs once.
fn segment_before_last<'a>(content: &'a str, word: &str) -> Option<&'a str> {
    let last = content.rfind(word)?;
    let head = &content[..last];
    Some(match head.rfind(word) {
        Some(previous) => &head[previous + word.len()..],
        None => head,
    })
}
