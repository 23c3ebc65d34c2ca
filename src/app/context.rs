use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::domain::Platform;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::sensortower::SensorTower;
use crate::storefront::{AppStore, PlayStore, Storefront};

pub struct AppContext {
    pub config: Config,
    pub appstore: AppStore,
    pub playstore: PlayStore,
    pub sensortower: SensorTower,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.http)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Build every component on top of an existing fetcher.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let appstore = AppStore::new(fetcher.clone(), &config.appstore);
        let playstore = PlayStore::new(fetcher.clone(), &config.playstore);
        let sensortower = SensorTower::new(fetcher);

        Self {
            config,
            appstore,
            playstore,
            sensortower,
        }
    }

    pub fn storefront(&self, platform: Platform) -> &dyn Storefront {
        match platform {
            Platform::AppStore => &self.appstore,
            Platform::PlayStore => &self.playstore,
        }
    }
}
