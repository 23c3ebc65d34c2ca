use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use url::Url;

use crate::app::Result;
use crate::config::PlayStoreConfig;
use crate::domain::{AppInfo, Platform, Review};
use crate::fetcher::{FetchResult, Fetcher};
use crate::normalizer::playstore::{normalize_details, normalize_review_batch};
use crate::progress;
use crate::storefront::Storefront;

const DETAILS_URL: &str = "https://play.google.com/store/apps/details";
const BATCH_URL: &str = "https://play.google.com/_/PlayStoreUi/data/batchexecute";

/// Reviews requested per `batchexecute` call
const PAGE_SIZE: usize = 200;
const SORT_NEWEST: u8 = 2;

/// Language and country a set of reviews is requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayLocale {
    pub lang: String,
    pub country: String,
}

impl PlayLocale {
    pub fn new(lang: &str, country: &str) -> Self {
        Self {
            lang: lang.to_string(),
            country: country.to_string(),
        }
    }
}

pub struct PlayStore {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    lookup_countries: Vec<String>,
    locales: Vec<PlayLocale>,
    reviews_per_locale: usize,
}

impl PlayStore {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, config: &PlayStoreConfig) -> Self {
        Self {
            fetcher,
            lookup_countries: config.lookup_countries.clone(),
            locales: config.review_locales(),
            reviews_per_locale: config.reviews_per_locale,
        }
    }

    async fn details(&self, app_id: &str, country: &str) -> Result<Option<AppInfo>> {
        let url = Url::parse_with_params(
            DETAILS_URL,
            &[("id", app_id), ("hl", "en"), ("gl", country)],
        )?;

        match self.fetcher.get(url.as_str()).await? {
            FetchResult::Content { body } => {
                normalize_details(&String::from_utf8_lossy(&body)).map(Some)
            }
            FetchResult::Failed { status: 404 } => Ok(None),
            failed => failed.into_body(url.as_str()).map(|_| None),
        }
    }

    /// Most recent reviews for one locale, following continuation tokens
    /// until `reviews_per_locale` is reached or the feed runs out.
    pub async fn locale_reviews(&self, app_id: &str, locale: &PlayLocale) -> Result<Vec<Review>> {
        let url = Url::parse_with_params(
            BATCH_URL,
            &[("hl", locale.lang.as_str()), ("gl", locale.country.as_str())],
        )?;

        let mut reviews = Vec::new();
        let mut token: Option<String> = None;

        while reviews.len() < self.reviews_per_locale {
            let count = PAGE_SIZE.min(self.reviews_per_locale - reviews.len());
            let request = review_request(app_id, count, token.as_deref());

            let body = self
                .fetcher
                .post_form(url.as_str(), &[("f.req", request.as_str())])
                .await?
                .into_body(url.as_str())?;
            let batch = normalize_review_batch(&String::from_utf8_lossy(&body))?;

            if batch.reviews.is_empty() {
                break;
            }
            reviews.extend(batch.reviews);

            match batch.next_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        reviews.truncate(self.reviews_per_locale);
        Ok(reviews)
    }
}

/// `f.req` value for the `UsvDTd` (reviews) RPC.
fn review_request(app_id: &str, count: usize, token: Option<&str>) -> String {
    let args = json!([
        null,
        null,
        [2, SORT_NEWEST, [count, null, token], null, []],
        [app_id, 7]
    ]);
    json!([[["UsvDTd", args.to_string(), null, "generic"]]]).to_string()
}

#[async_trait]
impl Storefront for PlayStore {
    fn platform(&self) -> Platform {
        Platform::PlayStore
    }

    async fn load_app_info(&self, app_id: &str) -> Option<AppInfo> {
        for country in &self.lookup_countries {
            match self.details(app_id, country).await {
                Ok(Some(info)) if info.is_loaded() => return Some(info),
                Ok(_) => tracing::info!("No Play Store results for {} in {}", app_id, country),
                Err(e) => tracing::warn!(
                    "Error loading Android app info for {} in {}: {}",
                    app_id,
                    country,
                    e
                ),
            }
        }
        None
    }

    async fn load_reviews(&self, app_id: &str) -> Vec<Review> {
        let mut reviews = Vec::new();
        let pb = progress::bar(self.locales.len() as u64, "Google Play reviews");

        for locale in &self.locales {
            pb.set_message(format!("Load Android reviews: {}-{}", locale.lang, locale.country));
            match self.locale_reviews(app_id, locale).await {
                Ok(found) => reviews.extend(found),
                Err(e) => tracing::warn!(
                    "Error loading reviews for {} from {}-{}: {}",
                    app_id,
                    locale.lang,
                    locale.country,
                    e
                ),
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        reviews
    }
}
