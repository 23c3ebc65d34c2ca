//! Configuration management for reviewlens.
//!
//! Configuration is read from `~/.config/reviewlens/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! Command-line flags override the values loaded here.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storefront::PlayLocale;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub appstore: AppStoreConfig,
    pub playstore: PlayStoreConfig,
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppStoreConfig {
    /// Regions tried in order for the lookup API
    pub lookup_regions: Vec<String>,
    /// Storefronts whose review feeds are collected
    pub review_stores: Vec<String>,
    /// Upper bound on feed pages per storefront
    pub max_pages: u32,
}

impl Default for AppStoreConfig {
    fn default() -> Self {
        Self {
            lookup_regions: strings(&["us", "gb"]),
            review_stores: strings(&[
                "us", "ca", "au", "ru", "it", "in", "fr", "gb", "ua", "jp", "cn", "tw", "my",
                "de", "es", "br", "mx", "kr", "nl", "se",
            ]),
            max_pages: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayStoreConfig {
    /// Countries tried in order for the details page
    pub lookup_countries: Vec<String>,
    /// Languages whose reviews are collected (country `us`)
    pub review_languages: Vec<String>,
    /// When non-empty, collect by country (language `en`) instead of language
    pub review_countries: Vec<String>,
    /// Most recent reviews fetched per language or country
    pub reviews_per_locale: usize,
}

impl Default for PlayStoreConfig {
    fn default() -> Self {
        Self {
            lookup_countries: strings(&["us", "gb"]),
            review_languages: strings(&[
                "en", "fr", "ru", "it", "hi", "de", "uk", "ja", "zh-CN", "zh-TW", "ms", "es",
                "pt-BR", "ko", "ar", "tr", "pl", "vi", "id", "th",
            ]),
            review_countries: Vec::new(),
            reviews_per_locale: 2000,
        }
    }
}

impl PlayStoreConfig {
    /// Locales to collect reviews from.
    pub fn review_locales(&self) -> Vec<PlayLocale> {
        if self.review_countries.is_empty() {
            self.review_languages
                .iter()
                .map(|lang| PlayLocale::new(lang, "us"))
                .collect()
        } else {
            self.review_countries
                .iter()
                .map(|country| PlayLocale::new("en", country))
                .collect()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Base URL of the OpenAI-compatible API
    pub api_base: String,
    pub temperature: f32,
    /// Most reviews kept after ranking
    pub review_cap: usize,
    /// Fewer reviews than this and the app is skipped
    pub min_reviews: usize,
    /// Send the app description to the model
    pub include_description: bool,
    /// Drop repeated (author, content) pairs before ranking
    pub dedup: bool,
    /// Completion requests can take minutes on large inputs
    pub request_timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            temperature: 0.2,
            review_cap: 500,
            min_reviews: 6,
            include_description: false,
            dedup: false,
            request_timeout_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub open_in_browser: bool,
    /// Folder reports are written to (default: `./temp`)
    pub save_folder: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            open_in_browser: true,
            save_folder: None,
        }
    }
}

impl ReportConfig {
    pub fn save_folder(&self) -> PathBuf {
        self.save_folder
            .clone()
            .unwrap_or_else(|| PathBuf::from("temp"))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/reviewlens/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("reviewlens").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Wrote default config to {}", path.display());
        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# reviewlens configuration
#
# Command-line flags take precedence over the values below.

[appstore]
# Regions tried in order when looking up app metadata
lookup_regions = ["us", "gb"]

# Storefronts whose customer review feeds are collected
review_stores = [
    "us", "ca", "au", "ru", "it", "in", "fr", "gb", "ua", "jp",
    "cn", "tw", "my", "de", "es", "br", "mx", "kr", "nl", "se",
]

# The feed serves at most 10 pages per storefront
max_pages = 10

[playstore]
# Countries tried in order when loading the details page
lookup_countries = ["us", "gb"]

# Languages whose reviews are collected
review_languages = [
    "en", "fr", "ru", "it", "hi", "de", "uk", "ja", "zh-CN", "zh-TW",
    "ms", "es", "pt-BR", "ko", "ar", "tr", "pl", "vi", "id", "th",
]

# Set to collect by country instead of by language, e.g. ["us", "gb"]
review_countries = []

# Most recent reviews fetched per language or country
reviews_per_locale = 2000

[analysis]
api_base = "https://api.openai.com/v1"
temperature = 0.2

# Reviews kept after ranking by length
review_cap = 500

# Apps with fewer reviews are skipped
min_reviews = 6

# Send the app description to the model
include_description = false

# Drop reviews repeated across storefronts before ranking
dedup = false

# Timeout for a single completion request
request_timeout_secs = 300

[report]
open_in_browser = true
# save_folder = "/path/to/reports"

[http]
timeout_secs = 30
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        let defaults = Config::default();
        assert_eq!(config.appstore.review_stores, defaults.appstore.review_stores);
        assert_eq!(config.playstore.review_languages, defaults.playstore.review_languages);
        assert_eq!(config.analysis.review_cap, 500);
        assert_eq!(config.analysis.min_reviews, 6);
        assert!(config.report.open_in_browser);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_default_store_lists() {
        let config = Config::default();
        assert_eq!(config.appstore.review_stores.len(), 20);
        assert_eq!(config.playstore.review_languages.len(), 20);
        assert_eq!(config.appstore.lookup_regions, vec!["us", "gb"]);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[analysis]
review_cap = 100
dedup = true
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.analysis.review_cap, 100);
        assert!(config.analysis.dedup);
        assert_eq!(config.analysis.min_reviews, 6);
        assert_eq!(config.appstore.max_pages, 10);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.analysis.api_base, "https://api.openai.com/v1");
        assert_eq!(config.report.save_folder(), PathBuf::from("temp"));
    }

    #[test]
    fn test_review_locales_by_language() {
        let config = PlayStoreConfig {
            review_languages: strings(&["en", "ru"]),
            ..Default::default()
        };
        let locales = config.review_locales();
        assert_eq!(locales, vec![PlayLocale::new("en", "us"), PlayLocale::new("ru", "us")]);
    }

    #[test]
    fn test_review_locales_by_country() {
        let config = PlayStoreConfig {
            review_countries: strings(&["us", "gb"]),
            ..Default::default()
        };
        let locales = config.review_locales();
        assert_eq!(locales, vec![PlayLocale::new("en", "us"), PlayLocale::new("en", "gb")]);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/reviewlens.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[analysis\nreview_cap = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
