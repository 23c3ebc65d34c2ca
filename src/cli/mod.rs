pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::analyzer::GptModel;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "reviewlens")]
#[command(about = "Summarize App Store and Google Play reviews into an HTML report", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/reviewlens/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze the reviews of one or more apps and write HTML reports
    Analyze(AnalyzeArgs),
    /// Print the store metadata of an app as JSON
    Info {
        /// App Store numeric id or Play Store package name
        app_id: String,
    },
    /// Fetch and select the reviews of an app
    Reviews {
        /// App Store numeric id or Play Store package name
        app_id: String,

        /// Save the selected reviews as JSON instead of printing them
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// App Store storefronts to collect from (e.g. "us,gb")
        #[arg(long, value_delimiter = ',')]
        stores: Vec<String>,
    },
    /// Print Sensor Tower download and revenue estimates
    Market {
        /// App Store numeric id or Play Store package name
        app_id: String,
    },
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// OpenAI API key
    #[arg(long)]
    pub api_key: String,

    /// Model used for the summary
    #[arg(long, value_enum, default_value_t = GptModel::default())]
    pub model: GptModel,

    /// Comma-separated app ids (e.g. "1620725834,com.whatsapp")
    #[arg(long, value_delimiter = ',', required = true)]
    pub app_ids: Vec<String>,

    /// App Store storefronts to collect reviews from
    #[arg(long, value_delimiter = ',')]
    pub stores: Vec<String>,

    /// Send the app description to the model
    #[arg(long)]
    pub with_app_description: bool,

    /// Folder for the reports (default: ./temp)
    #[arg(long)]
    pub save_folder: Option<PathBuf>,

    /// Collect Play Store reviews by country instead of by language
    #[arg(long, value_delimiter = ',')]
    pub play_countries: Vec<String>,

    /// Drop duplicate reviews before ranking
    #[arg(long)]
    pub dedup: bool,

    /// Don't open reports in the browser
    #[arg(long)]
    pub no_open: bool,
}

impl AnalyzeArgs {
    /// Fold command-line flags over the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        apply_stores(&self.stores, config);
        if !self.play_countries.is_empty() {
            config.playstore.review_countries = self.play_countries.clone();
        }
        if self.with_app_description {
            config.analysis.include_description = true;
        }
        if self.dedup {
            config.analysis.dedup = true;
        }
        if self.no_open {
            config.report.open_in_browser = false;
        }
        if let Some(folder) = &self.save_folder {
            config.report.save_folder = Some(folder.clone());
        }
    }

    /// Non-empty, trimmed app ids in the order given.
    pub fn app_ids(&self) -> Vec<&str> {
        self.app_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

/// Replace the App Store storefront list when any were given.
pub fn apply_stores(stores: &[String], config: &mut Config) {
    let stores: Vec<String> = stores
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if !stores.is_empty() {
        config.appstore.review_stores = stores;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(args: &[&str]) -> AnalyzeArgs {
        let argv = ["reviewlens", "analyze", "--api-key", "sk-test"]
            .iter()
            .chain(args.iter())
            .copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Analyze(args) => args,
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_analyze_defaults() {
        let args = analyze(&["--app-ids", "1620725834"]);
        assert_eq!(args.model, GptModel::Gpt4oMini);
        assert_eq!(args.app_ids(), vec!["1620725834"]);
        assert!(args.stores.is_empty());
        assert!(!args.dedup);
        assert!(!args.no_open);
    }

    #[test]
    fn test_app_ids_split_and_trimmed() {
        let args = analyze(&["--app-ids", "1620725834, com.whatsapp,,"]);
        assert_eq!(args.app_ids(), vec!["1620725834", "com.whatsapp"]);
    }

    #[test]
    fn test_app_ids_required() {
        let argv = ["reviewlens", "analyze", "--api-key", "sk-test"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_model_choice() {
        let args = analyze(&["--app-ids", "x.y", "--model", "gpt-4o-2024-05-13"]);
        assert_eq!(args.model, GptModel::Gpt4o);

        let argv = [
            "reviewlens", "analyze", "--api-key", "k", "--app-ids", "x", "--model", "gpt-5",
        ];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let args = analyze(&[
            "--app-ids",
            "com.whatsapp",
            "--stores",
            "US, gb",
            "--play-countries",
            "us,de",
            "--with-app-description",
            "--dedup",
            "--no-open",
            "--save-folder",
            "/tmp/reports",
        ]);
        let mut config = Config::default();
        args.apply_to(&mut config);

        assert_eq!(config.appstore.review_stores, vec!["us", "gb"]);
        assert_eq!(config.playstore.review_countries, vec!["us", "de"]);
        assert!(config.analysis.include_description);
        assert!(config.analysis.dedup);
        assert!(!config.report.open_in_browser);
        assert_eq!(config.report.save_folder(), PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = analyze(&["--app-ids", "com.whatsapp"]);
        let mut config = Config::default();
        args.apply_to(&mut config);

        assert_eq!(config.appstore.review_stores.len(), 20);
        assert!(config.playstore.review_countries.is_empty());
        assert!(config.report.open_in_browser);
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["reviewlens", "market", "com.whatsapp", "--config", "a.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
        assert!(matches!(cli.command, Commands::Market { app_id } if app_id == "com.whatsapp"));
    }
}
