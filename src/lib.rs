//! # reviewlens
//!
//! Turns the public reviews of an App Store or Google Play app into a short
//! product summary: pros, cons, what to fix next and why people use it.
//!
//! ## Architecture
//!
//! Every app id goes through the same sequential pipeline:
//!
//! ```text
//! Storefront → Selection → Analyzer → Sensor Tower → Report
//! ```
//!
//! - [`storefront`]: app metadata and reviews from either store
//! - [`selection`]: rank by length, cap, re-sort by date, strip identities
//! - [`analyzer`]: one JSON-mode chat completion per app
//! - [`sensortower`]: download and revenue estimates
//! - [`report`]: self-contained HTML report
//!
//! ## Quick Start
//!
//! ```bash
//! # Analyze an App Store app and a Play Store app
//! reviewlens analyze --api-key sk-... --app-ids 1620725834,com.whatsapp
//!
//! # Only the metadata
//! reviewlens info com.whatsapp
//!
//! # Selected reviews as JSON
//! reviewlens reviews 1620725834 --stores us,gb --out reviews.json
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// both storefronts and the Sensor Tower scraper.
pub mod app;

/// Chat-completion client and supported models.
pub mod analyzer;

/// Command-line interface using clap.
///
/// - `analyze --api-key KEY --app-ids a,b` - Full pipeline and HTML reports
/// - `info <id>` - Store metadata as JSON
/// - `reviews <id>` - Selected reviews as JSON
/// - `market <id>` - Sensor Tower estimates
pub mod cli;

/// Configuration loaded from `~/.config/reviewlens/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`AppInfo`](domain::AppInfo): Store metadata
/// - [`Review`](domain::Review): One user review, with SHA256 fingerprints
/// - [`AnalysisResult`](domain::AnalysisResult): The model's summary
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for GET and form POST
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Store payload parsing into domain models.
pub mod normalizer;

pub mod progress;

/// Static HTML report rendering and output.
pub mod report;

/// Review ranking and stripping ahead of analysis.
pub mod selection;

pub mod sensortower;

/// App Store and Google Play sources behind one trait.
pub mod storefront;
