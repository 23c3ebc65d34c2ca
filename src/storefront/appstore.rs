use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;
use crate::config::AppStoreConfig;
use crate::domain::{AppInfo, Platform, Review};
use crate::fetcher::Fetcher;
use crate::normalizer::appstore::{normalize_lookup, normalize_review_page};
use crate::progress;
use crate::storefront::Storefront;

const LOOKUP_URL: &str = "https://itunes.apple.com/lookup";

pub struct AppStore {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    lookup_regions: Vec<String>,
    review_stores: Vec<String>,
    max_pages: u32,
}

impl AppStore {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, config: &AppStoreConfig) -> Self {
        Self {
            fetcher,
            lookup_regions: config.lookup_regions.clone(),
            review_stores: config.review_stores.clone(),
            max_pages: config.max_pages,
        }
    }

    pub fn review_stores(&self) -> &[String] {
        &self.review_stores
    }

    async fn lookup(&self, app_id: &str, region: &str) -> Result<Option<AppInfo>> {
        let url = Url::parse_with_params(LOOKUP_URL, &[("id", app_id), ("country", region)])?;
        let body = self.fetcher.get(url.as_str()).await?.into_body(url.as_str())?;
        normalize_lookup(&body)
    }

    /// Walk the review feed of one storefront page by page.
    ///
    /// Stops at the first failed or empty page, when the feed's `next` link
    /// does not advance, or at the page ceiling.
    pub async fn store_reviews(&self, store: &str, app_id: &str) -> Vec<Review> {
        let mut reviews = Vec::new();
        let pb = progress::bar(u64::from(self.max_pages), format!("Store {}, app {}", store, app_id));

        for page in 1..=self.max_pages {
            let url = format!(
                "https://itunes.apple.com/{}/rss/customerreviews/page={}/id={}/sortby=mostrecent/json",
                store, page, app_id
            );

            let parsed = match self.fetcher.get(&url).await.and_then(|r| r.into_body(&url)) {
                Ok(body) => normalize_review_page(&body),
                Err(e) => Err(e),
            };
            let parsed = match parsed {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("Request failed for {}: {}", url, e);
                    break;
                }
            };

            if parsed.reviews.is_empty() {
                break;
            }

            if let Some(last) = parsed.last_page {
                pb.set_length(u64::from(last.min(self.max_pages)));
            }
            pb.inc(1);
            reviews.extend(parsed.reviews);

            if !matches!(parsed.next_page, Some(next) if next > page) {
                break;
            }
        }

        pb.finish_and_clear();
        tracing::debug!("{} reviews from store {}", reviews.len(), store);
        reviews
    }
}

#[async_trait]
impl Storefront for AppStore {
    fn platform(&self) -> Platform {
        Platform::AppStore
    }

    async fn load_app_info(&self, app_id: &str) -> Option<AppInfo> {
        for region in &self.lookup_regions {
            match self.lookup(app_id, region).await {
                Ok(Some(info)) if info.is_loaded() => return Some(info),
                Ok(_) => tracing::info!("No App Store results for {} in {}", app_id, region),
                Err(e) => tracing::warn!("App Store lookup failed for {} in {}: {}", app_id, region, e),
            }
        }
        None
    }

    async fn load_reviews(&self, app_id: &str) -> Vec<Review> {
        let mut reviews = Vec::new();
        let pb = progress::bar(self.review_stores.len() as u64, "App Store reviews");

        for store in &self.review_stores {
            pb.set_message(format!("Load from store: {}", store));
            reviews.extend(self.store_reviews(store, app_id).await);
            pb.inc(1);
        }

        pb.finish_and_clear();
        reviews
    }
}
