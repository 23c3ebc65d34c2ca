use std::path::{Path, PathBuf};

use chrono::Local;

use crate::analyzer::{Analyzer, TokenUsage};
use crate::app::{AppContext, Result, ReviewLensError};
use crate::domain::{Platform, Review};
use crate::report::{open_report, render_report, write_report, ReportInput};
use crate::selection::{dedup_reviews, select_reviews, strip_for_analysis};

/// Run the full pipeline for every app id, one after another.
///
/// A failure for one app id is reported and the batch moves on.
pub async fn analyze_apps(ctx: &AppContext, analyzer: &Analyzer, app_ids: &[&str]) -> Result<()> {
    if app_ids.is_empty() {
        println!("No app ids given");
        return Ok(());
    }

    println!("Analyzing {} apps with {}", app_ids.len(), analyzer.model());

    let mut usage = TokenUsage::default();
    let mut written = 0;
    let mut skipped = 0;
    let mut errors = 0;

    for app_id in app_ids {
        println!("\n{}", app_id);
        match analyze_app(ctx, analyzer, app_id, &mut usage).await {
            Ok(Some(path)) => {
                written += 1;
                println!("  Report saved to {}", path.display());
            }
            Ok(None) => skipped += 1,
            Err(e) => {
                errors += 1;
                tracing::error!("Analysis of {} failed: {}", app_id, e);
                eprintln!("  Error processing {}: {}", app_id, e);
            }
        }
    }

    println!(
        "\nDone: {} reports, {} skipped, {} errors",
        written, skipped, errors
    );
    println!(
        "Tokens used: {} prompt + {} completion = {}",
        usage.prompt_tokens,
        usage.completion_tokens,
        usage.total()
    );

    Ok(())
}

/// Path of the written report, or `None` when the app was skipped.
async fn analyze_app(
    ctx: &AppContext,
    analyzer: &Analyzer,
    app_id: &str,
    usage: &mut TokenUsage,
) -> Result<Option<PathBuf>> {
    let platform = Platform::classify(app_id);
    let storefront = ctx.storefront(platform);

    let Some(app) = storefront.load_app_info(app_id).await else {
        println!("  App info not found on {}, skipping", platform.display_name());
        return Ok(None);
    };
    println!("  {} ({})", app.name, platform.display_name());

    let mut reviews = storefront.load_reviews(app_id).await;
    println!("  Collected {} reviews", reviews.len());
    if reviews.len() < ctx.config.analysis.min_reviews {
        println!("  Not enough reviews to analyze, skipping");
        return Ok(None);
    }

    if ctx.config.analysis.dedup {
        reviews = dedup_reviews(reviews);
    }
    let selected = select_reviews(reviews, ctx.config.analysis.review_cap);
    let stripped = strip_for_analysis(&selected);

    let input = app.analysis_input(ctx.config.analysis.include_description)?;
    let analysis = analyzer.process_reviews(&input, &stripped).await?;
    *usage += analysis.usage;
    println!(
        "  Analysis used {} tokens",
        analysis.usage.total()
    );

    let market = ctx.sensortower.revenue_and_downloads(app_id).await;

    let html = render_report(&ReportInput {
        app_id,
        platform,
        app: &app,
        analysis: &analysis.result,
        reviews: &selected,
        market: &market,
        generated_on: Local::now().date_naive(),
    });
    let path = ctx
        .config
        .report
        .save_folder()
        .join(app.report_file_name(platform, app_id));
    write_report(&path, &html)?;

    if ctx.config.report.open_in_browser {
        if let Err(e) = open_report(&path) {
            tracing::warn!("Could not open {}: {}", path.display(), e);
        }
    }

    Ok(Some(path))
}

pub async fn show_info(ctx: &AppContext, app_id: &str) -> Result<()> {
    let platform = Platform::classify(app_id);
    let app = ctx
        .storefront(platform)
        .load_app_info(app_id)
        .await
        .ok_or_else(|| {
            ReviewLensError::Other(format!(
                "{} not found on {}",
                app_id,
                platform.display_name()
            ))
        })?;

    println!("{}", serde_json::to_string_pretty(&app)?);
    Ok(())
}

/// Fetch, rank and cap the reviews of one app.
pub async fn collect_reviews(ctx: &AppContext, app_id: &str) -> Vec<Review> {
    let platform = Platform::classify(app_id);
    let mut reviews = ctx.storefront(platform).load_reviews(app_id).await;
    if ctx.config.analysis.dedup {
        reviews = dedup_reviews(reviews);
    }
    select_reviews(reviews, ctx.config.analysis.review_cap)
}

pub async fn export_reviews(ctx: &AppContext, app_id: &str, out: Option<&Path>) -> Result<()> {
    let reviews = collect_reviews(ctx, app_id).await;
    let json = serde_json::to_string_pretty(&reviews)?;

    match out {
        Some(path) => {
            write_report(path, &json)?;
            println!("Saved {} reviews to {}", reviews.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

pub async fn show_market(ctx: &AppContext, app_id: &str) -> Result<()> {
    let market = ctx.sensortower.revenue_and_downloads(app_id).await;
    println!("Downloads (last month): {}", market.downloads);
    println!("Revenue (last month):   {}", market.revenue);
    Ok(())
}
