use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reviewlens::analyzer::Analyzer;
use reviewlens::app::AppContext;
use reviewlens::cli::{apply_stores, commands, Cli, Commands};
use reviewlens::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Analyze(args) => {
            args.apply_to(&mut config);
            let analyzer = Analyzer::connect(&args.api_key, args.model, &config.analysis, &config.http)?;
            let ctx = AppContext::new(config)?;
            commands::analyze_apps(&ctx, &analyzer, &args.app_ids()).await?;
        }
        Commands::Info { app_id } => {
            let ctx = AppContext::new(config)?;
            commands::show_info(&ctx, app_id.trim()).await?;
        }
        Commands::Reviews { app_id, out, stores } => {
            apply_stores(&stores, &mut config);
            let ctx = AppContext::new(config)?;
            commands::export_reviews(&ctx, app_id.trim(), out.as_deref()).await?;
        }
        Commands::Market { app_id } => {
            let ctx = AppContext::new(config)?;
            commands::show_market(&ctx, app_id.trim()).await?;
        }
    }

    Ok(())
}
