use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::Result;
use crate::domain::Platform;

/// Storefront metadata for one app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInfo {
    pub name: String,
    pub description: String,
    pub update_history: String,
    pub icon: String,
    pub screenshots: Vec<String>,
    /// Release date, `YYYY-MM-DD` or empty
    pub release: String,
    /// Last update date, `YYYY-MM-DD` or empty
    pub update: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u64>,
}

impl AppInfo {
    /// An app without a name counts as not loaded.
    pub fn is_loaded(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Metadata handed to the summarizer.
    ///
    /// Icon and screenshots are never sent. The description is dropped unless
    /// asked for, since the model otherwise lifts pros from marketing copy.
    pub fn analysis_input(&self, include_description: bool) -> Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Some(map) = value.as_object_mut() {
            map.remove("icon");
            map.remove("screenshots");
            if !include_description {
                map.remove("description");
            }
        }
        Ok(value)
    }

    /// `{prefix}_{app_id}_{name}.html` with a file-system safe name.
    pub fn report_file_name(&self, platform: Platform, app_id: &str) -> String {
        format!(
            "{}_{}_{}.html",
            platform.file_prefix(),
            sanitize_file_component(app_id),
            sanitize_file_component(&self.name)
        )
    }
}

fn sanitize_file_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('_'),
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}
