//! Static HTML report for one analyzed app.
//!
//! Rendering is plain string building. Every piece of text that came from a
//! storefront, a reviewer or the model goes through `html-escape` before it
//! lands in markup or in an attribute.

mod assets;

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::app::Result;
use crate::domain::{AnalysisResult, AppInfo, Platform, Review, SensorTowerInfo};

/// Everything shown in a report.
pub struct ReportInput<'a> {
    pub app_id: &'a str,
    pub platform: Platform,
    pub app: &'a AppInfo,
    pub analysis: &'a AnalysisResult,
    pub reviews: &'a [Review],
    pub market: &'a SensorTowerInfo,
    /// Date printed in the footer
    pub generated_on: NaiveDate,
}

/// Render a self-contained HTML document.
pub fn render_report(input: &ReportInput<'_>) -> String {
    let title = if input.analysis.name.trim().is_empty() {
        input.app.name.as_str()
    } else {
        input.analysis.name.as_str()
    };

    let mut html = String::with_capacity(64 * 1024);
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
    <script>{script}</script>
</head>
<body>
    <header>
        <h1>{title}</h1>
        <p><a href="{store_url}">{store}</a></p>
    </header>
    <div class="container">
"#,
        title = text(title),
        style = assets::STYLE,
        script = assets::SCRIPT,
        store_url = attr(&input.platform.store_url(input.app_id)),
        store = input.platform.display_name(),
    ));

    if !input.app.icon.is_empty() {
        html.push_str(&format!(
            "        <img class=\"app-icon\" src=\"{}\" alt=\"App Icon\">\n",
            attr(&input.app.icon)
        ));
    }

    html.push_str(&render_facts(input.app, input.market));

    html.push_str(&format!(
        "        <p><strong>Why the app is popular:</strong> {}</p>\n",
        text(&input.analysis.why_app_popular)
    ));
    html.push_str(&format!(
        r#"        <div class="pros-cons">
            <div>
                <h2>Pros</h2>
                <ul class="pros">{}</ul>
            </div>
            <div>
                <h2>Cons</h2>
                <ul class="cons">{}</ul>
            </div>
        </div>
"#,
        render_list(&input.analysis.pros),
        render_list(&input.analysis.cons)
    ));
    html.push_str(&format!(
        "        <p><strong>Suggestions for Improvement:</strong> {}</p>\n",
        text(&input.analysis.suggest_what_improve)
    ));

    if !input.app.screenshots.is_empty() {
        html.push_str("        <div class=\"screenshots\">\n            <h2>Screenshots</h2>\n");
        for screenshot in &input.app.screenshots {
            html.push_str(&format!(
                "            <img src=\"{}\" alt=\"Screenshot\">\n",
                attr(screenshot)
            ));
        }
        html.push_str("        </div>\n");
    }

    html.push_str(&render_reviews(input.reviews));

    html.push_str(&format!(
        r#"    </div>
    <footer>
        <p>Generated by reviewlens on {}</p>
    </footer>
</body>
</html>
"#,
        input.generated_on.format("%Y-%m-%d")
    ));

    html
}

fn render_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>&bull; {}</li>", text(item)))
        .collect()
}

fn render_facts(app: &AppInfo, market: &SensorTowerInfo) -> String {
    let mut facts: Vec<(&str, String)> = Vec::new();
    if let Some(developer) = &app.developer {
        facts.push(("Developer", developer.clone()));
    }
    if let Some(genre) = &app.genre {
        facts.push(("Genre", genre.clone()));
    }
    if let Some(rating) = app.rating {
        let count = app
            .rating_count
            .map(|c| format!(" ({} ratings)", c))
            .unwrap_or_default();
        facts.push(("Rating", format!("{:.1}{}", rating, count)));
    }
    if let Some(installs) = &app.installs {
        facts.push(("Installs", installs.clone()));
    }
    if !app.release.is_empty() {
        facts.push(("Released", app.release.clone()));
    }
    if !app.update.is_empty() {
        facts.push(("Updated", app.update.clone()));
    }
    facts.push(("Downloads (last month)", market.downloads.clone()));
    facts.push(("Revenue (last month)", market.revenue.clone()));

    let items: String = facts
        .iter()
        .map(|(label, value)| {
            format!("<span><strong>{}:</strong> {}</span>", label, text(value))
        })
        .collect();
    format!("        <div class=\"facts\">{}</div>\n", items)
}

fn render_reviews(reviews: &[Review]) -> String {
    let mut html = format!(
        "        <div class=\"reviews\">\n            <h2>Reviews ({})</h2>\n",
        reviews.len()
    );

    for review in reviews {
        let rating = usize::from(review.rating.min(5));
        let stars = format!("{}{}", "★".repeat(rating), "☆".repeat(5 - rating));
        let title = review.display_title();
        let heading = if title.is_empty() {
            String::new()
        } else {
            format!("\n                <h3>{}</h3>", text(title))
        };

        html.push_str(&format!(
            r#"            <div class="review">
                <div class="review-meta"><span class="stars">{stars}</span> {author} &middot; {date} &middot; v{version}</div>{heading}
                <p>{content}</p>
                <button class="translate" data-title="{data_title}" data-text="{data_text}" onclick="translateReview(this)">Translate</button>
            </div>
"#,
            stars = stars,
            author = text(&review.author),
            date = text(&review.date),
            version = text(&review.app_version),
            heading = heading,
            content = text(&review.content),
            data_title = attr(title),
            data_text = attr(&review.content),
        ));
    }

    html.push_str("        </div>\n");
    html
}

/// Write `html` to `path`, creating parent directories as needed.
pub fn write_report(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    Ok(())
}

/// Open a written report in the default browser.
pub fn open_report(path: &Path) -> Result<()> {
    open::that(path)?;
    Ok(())
}
