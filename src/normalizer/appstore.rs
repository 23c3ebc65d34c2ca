//! App Store lookup API and customer-review feed (RSS rendered as JSON).

use serde_json::Value;

use crate::app::Result;
use crate::domain::{AppInfo, Review};
use crate::normalizer::{json_at, label_at, one_or_many, str_at};

/// One page of the customer-review feed.
#[derive(Debug, Clone, Default)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    /// Page number the feed's `next` link points at
    pub next_page: Option<u32>,
    /// Page number the feed's `last` link points at
    pub last_page: Option<u32>,
}

/// Normalize a lookup API response; `None` when it has no results.
pub fn normalize_lookup(body: &[u8]) -> Result<Option<AppInfo>> {
    let data: Value = serde_json::from_slice(body)?;
    let Some(result) = json_at(&data, &["results"]).and_then(|r| r.get(0)) else {
        return Ok(None);
    };

    let mut screenshots = string_list(result.get("screenshotUrls"));
    if screenshots.is_empty() {
        screenshots = string_list(result.get("ipadScreenshotUrls"));
    }

    let price = result.get("price").and_then(Value::as_f64);

    Ok(Some(AppInfo {
        name: str_at(result, &["trackName"]),
        description: str_at(result, &["description"]),
        update_history: result
            .get("releaseNotes")
            .and_then(Value::as_str)
            .unwrap_or("N/A")
            .to_string(),
        icon: str_at(result, &["artworkUrl512"]),
        screenshots,
        release: date_part(&str_at(result, &["releaseDate"])),
        update: date_part(&str_at(result, &["currentVersionReleaseDate"])),
        developer: result
            .get("artistName")
            .and_then(Value::as_str)
            .map(String::from),
        genre: result
            .get("primaryGenreName")
            .and_then(Value::as_str)
            .map(String::from),
        installs: None,
        price,
        free: price.map(|p| p == 0.0),
        rating: result.get("averageUserRating").and_then(Value::as_f64),
        rating_count: result.get("userRatingCount").and_then(Value::as_u64),
        reviews_count: None,
    }))
}

/// Normalize one page of the review feed.
///
/// Entries whose vote count is not an integer are skipped.
pub fn normalize_review_page(body: &[u8]) -> Result<ReviewPage> {
    let data: Value = serde_json::from_slice(body)?;
    let Some(feed) = data.get("feed").filter(|f| !f.is_null()) else {
        return Ok(ReviewPage::default());
    };

    let reviews = one_or_many(feed.get("entry"))
        .into_iter()
        .filter_map(normalize_entry)
        .collect();

    Ok(ReviewPage {
        reviews,
        next_page: page_link(feed, "next"),
        last_page: page_link(feed, "last"),
    })
}

fn normalize_entry(entry: &Value) -> Option<Review> {
    let vote_count: i64 = label_at(entry, &["im:voteCount"]).trim().parse().ok()?;
    let vote_sum: i64 = label_at(entry, &["im:voteSum"]).trim().parse().unwrap_or(0);
    let useless = vote_count - vote_sum;

    let title = label_at(entry, &["title"]);

    Some(Review {
        author: label_at(entry, &["author", "name"]),
        date: label_at(entry, &["updated"]),
        rating: label_at(entry, &["im:rating"]).trim().parse().unwrap_or(0),
        app_version: label_at(entry, &["im:version"]),
        title: Some(title),
        content: label_at(entry, &["content"]),
        useful: positive(vote_sum),
        useless: positive(useless),
    })
}

fn positive(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v > 0)
}

/// Page number of the feed link with relation `rel`.
fn page_link(feed: &Value, rel: &str) -> Option<u32> {
    one_or_many(feed.get("link"))
        .into_iter()
        .find(|link| json_at(link, &["attributes", "rel"]).and_then(Value::as_str) == Some(rel))
        .and_then(|link| json_at(link, &["attributes", "href"]))
        .and_then(Value::as_str)
        .and_then(page_number)
}

/// Extract `N` from a `.../page=N/...` feed URL.
pub fn page_number(url: &str) -> Option<u32> {
    let start = url.find("page=")? + "page=".len();
    let rest = &url[start..];
    let end = rest.find(['/', '?']).unwrap_or(rest.len());
    rest[..end].parse().ok()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// `2022-08-07T07:00:00Z` -> `2022-08-07`
fn date_part(raw: &str) -> String {
    raw.split('T').next().unwrap_or_default().to_string()
}
