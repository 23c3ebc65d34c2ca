//! Google Play details page and `batchexecute` review payloads.
//!
//! Neither is a documented API: fields are read by position, and any
//! position that moved simply yields a default.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::Value;

use crate::app::{Result, ReviewLensError};
use crate::domain::{AppInfo, Review};
use crate::normalizer::json_index;

static DS5_DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)AF_initDataCallback\(\{key:\s*'ds:5',\s*hash:\s*'[^']*',\s*data:\s*(\[.+?\]),\s*sideChannel:",
    )
    .expect("ds:5 pattern is valid")
});

/// A page of reviews plus the token for the next one.
#[derive(Debug, Clone, Default)]
pub struct ReviewBatch {
    pub reviews: Vec<Review>,
    pub next_token: Option<String>,
}

/// Normalize the details page of an app.
pub fn normalize_details(html: &str) -> Result<AppInfo> {
    let raw = DS5_DATA
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or_else(|| ReviewLensError::Parse("could not find ds:5 data in page".into()))?;
    let data: Value = serde_json::from_str(raw.as_str())?;

    let Some(app) = json_index(&data, &[1, 2]) else {
        return Err(ReviewLensError::Parse("ds:5 data has no app block".into()));
    };

    let screenshots = json_index(app, &[78, 0])
        .and_then(Value::as_array)
        .map(|shots| {
            shots
                .iter()
                .filter_map(|s| index_str(s, &[3, 2]))
                .collect()
        })
        .unwrap_or_default();

    let price = json_index(app, &[57, 0, 0, 0, 0, 1, 0, 0])
        .and_then(Value::as_f64)
        .map(|micros| micros / 1_000_000.0);

    let update = json_index(app, &[145, 0, 1, 0])
        .and_then(Value::as_i64)
        .map(format_timestamp)
        .or_else(|| index_str(app, &[145, 0, 0]).map(|d| format_release_date(&d)))
        .unwrap_or_default();

    Ok(AppInfo {
        name: index_str(app, &[0, 0]).unwrap_or_default(),
        description: index_str(app, &[72, 0, 1])
            .map(|d| d.replace("<br>", "\n"))
            .unwrap_or_default(),
        update_history: index_str(app, &[144, 1, 1]).unwrap_or_else(|| "N/A".to_string()),
        icon: index_str(app, &[95, 0, 3, 2]).unwrap_or_default(),
        screenshots,
        release: index_str(app, &[10, 0])
            .map(|d| format_release_date(&d))
            .unwrap_or_default(),
        update,
        developer: index_str(app, &[68, 0]),
        genre: index_str(app, &[79, 0, 0, 0]),
        installs: index_str(app, &[13, 0]),
        price,
        free: Some(price.unwrap_or(0.0) == 0.0),
        rating: json_index(app, &[51, 0, 1]).and_then(Value::as_f64),
        rating_count: json_index(app, &[51, 2, 1]).and_then(Value::as_u64),
        reviews_count: json_index(app, &[51, 3, 1]).and_then(Value::as_u64),
    })
}

/// Normalize a `batchexecute` reply for the `UsvDTd` review RPC.
pub fn normalize_review_batch(body: &str) -> Result<ReviewBatch> {
    let start = body
        .find('[')
        .ok_or_else(|| ReviewLensError::Parse("empty batchexecute reply".into()))?;
    let envelope: Value = serde_json::from_str(body[start..].trim_end())?;

    let Some(payload) = json_index(&envelope, &[0, 2]).and_then(Value::as_str) else {
        return Ok(ReviewBatch::default());
    };
    let payload: Value = serde_json::from_str(payload)?;

    let reviews = json_index(&payload, &[0])
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_review).collect())
        .unwrap_or_default();

    let next_token = payload
        .as_array()
        .filter(|parts| parts.len() >= 2)
        .and_then(|parts| parts[parts.len() - 2].as_array())
        .and_then(|cursor| cursor.last())
        .and_then(Value::as_str)
        .map(String::from);

    Ok(ReviewBatch {
        reviews,
        next_token,
    })
}

fn normalize_review(raw: &Value) -> Review {
    Review {
        author: index_str(raw, &[1, 0]).unwrap_or_else(|| "Anonymous".to_string()),
        date: json_index(raw, &[5, 0])
            .and_then(Value::as_i64)
            .map(format_timestamp)
            .unwrap_or_default(),
        rating: json_index(raw, &[2])
            .and_then(Value::as_u64)
            .and_then(|r| u8::try_from(r).ok())
            .unwrap_or(0),
        app_version: index_str(raw, &[10]).unwrap_or_else(|| "Unknown".to_string()),
        title: None,
        content: index_str(raw, &[4]).unwrap_or_default(),
        useful: None,
        useless: None,
    }
}

fn index_str(value: &Value, indices: &[usize]) -> Option<String> {
    json_index(value, indices)
        .and_then(Value::as_str)
        .map(String::from)
}

/// `Aug 7, 2022` -> `2022-08-07`; anything else -> empty.
pub fn format_release_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%b %d, %Y")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Unix seconds -> `YYYY-MM-DD` (UTC).
pub fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// A `UsvDTd` reply holding `reviews`, with an optional continuation token.
    pub(crate) fn batch_reply(reviews: Value, token: Option<&str>) -> String {
        let payload = json!([reviews, null, [null, token], null]).to_string();
        let envelope = json!([["wrb.fr", "UsvDTd", payload, null, null, null, "generic"]]);
        format!(")]}}'\n\n{}", envelope)
    }

    pub(crate) fn raw_review(name: &str, score: u64, at: i64, version: Value, text: &str) -> Value {
        json!([
            "gp:review-id",
            [name, [null, 2, null, [null, null, "https://example.com/avatar"]]],
            score,
            null,
            text,
            [at, 0],
            3,
            null,
            null,
            null,
            version
        ])
    }

    fn details_page(app: Value) -> String {
        let data = json!([null, [null, null, app]]);
        format!(
            "<html><script>AF_initDataCallback({{key: 'ds:4', hash: '1', data:[1], sideChannel: {{}}}});</script>\
             <script>AF_initDataCallback({{key: 'ds:5', hash: '7', data:{}, sideChannel: {{}}}});</script></html>",
            data
        )
    }

    fn set(app: &mut Vec<Value>, index: usize, value: Value) {
        if app.len() <= index {
            app.resize(index + 1, Value::Null);
        }
        app[index] = value;
    }

    #[test]
    fn test_normalize_details() {
        let mut app = Vec::new();
        set(&mut app, 0, json!(["English Quiz"]));
        set(&mut app, 10, json!(["Aug 7, 2022", [1659830400, 0]]));
        set(&mut app, 13, json!(["1,000,000+", 1000000]));
        set(&mut app, 51, json!([["4.5", 4.53], null, ["12K", 12000], ["3K", 3000]]));
        set(&mut app, 57, json!([[[[[null, [[0, "USD"]]]]]]]));
        set(&mut app, 68, json!(["Smile Solution Team"]));
        set(&mut app, 72, json!([[null, "Learn<br>English"]]));
        set(&mut app, 78, json!([[
            [null, null, null, [null, null, "https://example.com/s1.png"]],
            [null, null, null, [null, null, "https://example.com/s2.png"]]
        ]]));
        set(&mut app, 79, json!([[["Education"]]]));
        set(&mut app, 95, json!([[null, null, null, [null, null, "https://example.com/icon.png"]]]));
        set(&mut app, 144, json!([null, [null, "New levels"]]));
        set(&mut app, 145, json!([["Jan 2, 2024", [1704153600, 0]]]));

        let info = normalize_details(&details_page(Value::Array(app))).unwrap();
        assert_eq!(info.name, "English Quiz");
        assert_eq!(info.description, "Learn\nEnglish");
        assert_eq!(info.update_history, "New levels");
        assert_eq!(info.icon, "https://example.com/icon.png");
        assert_eq!(info.screenshots.len(), 2);
        assert_eq!(info.release, "2022-08-07");
        assert_eq!(info.update, "2024-01-02");
        assert_eq!(info.developer.as_deref(), Some("Smile Solution Team"));
        assert_eq!(info.genre.as_deref(), Some("Education"));
        assert_eq!(info.installs.as_deref(), Some("1,000,000+"));
        assert_eq!(info.price, Some(0.0));
        assert_eq!(info.free, Some(true));
        assert_eq!(info.rating, Some(4.53));
        assert_eq!(info.rating_count, Some(12000));
        assert_eq!(info.reviews_count, Some(3000));
    }

    #[test]
    fn test_normalize_details_sparse_block() {
        let info = normalize_details(&details_page(json!([["Bare App"]]))).unwrap();
        assert_eq!(info.name, "Bare App");
        assert_eq!(info.update_history, "N/A");
        assert!(info.screenshots.is_empty());
        assert!(info.developer.is_none());
        assert_eq!(info.release, "");
    }

    #[test]
    fn test_normalize_details_without_data() {
        let err = normalize_details("<html>not found</html>").unwrap_err();
        assert!(matches!(err, ReviewLensError::Parse(_)));
    }

    #[test]
    fn test_normalize_review_batch() {
        let reviews = json!([
            raw_review("Ann", 5, 1704153600, json!("1.2.0"), "Great app"),
            raw_review("Ben", 2, 1704067200, Value::Null, "Too many ads")
        ]);
        let batch = normalize_review_batch(&batch_reply(reviews, Some("next-token"))).unwrap();

        assert_eq!(batch.reviews.len(), 2);
        assert_eq!(batch.next_token.as_deref(), Some("next-token"));

        let first = &batch.reviews[0];
        assert_eq!(first.author, "Ann");
        assert_eq!(first.date, "2024-01-02");
        assert_eq!(first.rating, 5);
        assert_eq!(first.app_version, "1.2.0");
        assert_eq!(first.content, "Great app");
        assert!(first.title.is_none());

        assert_eq!(batch.reviews[1].app_version, "Unknown");
    }

    #[test]
    fn test_review_defaults() {
        let batch = normalize_review_batch(&batch_reply(json!([[]]), None)).unwrap();
        let review = &batch.reviews[0];

        assert_eq!(review.author, "Anonymous");
        assert_eq!(review.date, "");
        assert_eq!(review.rating, 0);
        assert_eq!(review.app_version, "Unknown");
        assert_eq!(review.content, "");
        assert!(batch.next_token.is_none());
    }

    #[test]
    fn test_empty_payload() {
        let envelope = json!([["wrb.fr", "UsvDTd", null, null, null, null, "generic"]]);
        let batch = normalize_review_batch(&format!(")]}}'\n\n{}", envelope)).unwrap();
        assert!(batch.reviews.is_empty());
        assert!(batch.next_token.is_none());
    }

    #[test]
    fn test_format_release_date() {
        assert_eq!(format_release_date("Aug 7, 2022"), "2022-08-07");
        assert_eq!(format_release_date("Dec 25, 2019"), "2019-12-25");
        assert_eq!(format_release_date(""), "");
        assert_eq!(format_release_date("Varies with device"), "");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01");
        assert_eq!(format_timestamp(1659830400), "2022-08-07");
    }
}
