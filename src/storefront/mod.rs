pub mod appstore;
pub mod playstore;

use async_trait::async_trait;

use crate::domain::{AppInfo, Platform, Review};

pub use appstore::AppStore;
pub use playstore::{PlayLocale, PlayStore};

/// Metadata and review source for one platform.
///
/// Both operations swallow transport and parse failures: they are logged and
/// reported as "no data" so a batch run can move on.
#[async_trait]
pub trait Storefront: Send + Sync {
    fn platform(&self) -> Platform;

    /// Try each configured region in order; `None` when none yields a name.
    async fn load_app_info(&self, app_id: &str) -> Option<AppInfo>;

    /// Reviews from every configured region or locale, concatenated.
    async fn load_reviews(&self, app_id: &str) -> Vec<Review>;
}
