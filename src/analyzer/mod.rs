//! Review summarization through an OpenAI-compatible chat completion API.
//!
//! One request per app: the app metadata and stripped reviews are sent as a
//! single compact JSON user message, and the model is held to JSON-object
//! output. Token usage comes back with every result so callers keep their
//! own totals.

pub mod models;

use std::ops::AddAssign;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::app::{Result, ReviewLensError};
use crate::config::{AnalysisConfig, HttpConfig};
use crate::domain::{AnalysisResult, StrippedReview};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::{FetchResult, Fetcher};

pub use models::GptModel;

const OUTPUT_TEMPLATE: &str = r##"{"app_analysis": {"name": "app_name","pros": ["pros_1","pros_2", "..."],"cons": ["cons_1", "cons_2", "..."],"suggest_what_improve": "#1 fix, improve option","why_app_popular": "give you thought why this app popular"}}"##;

/// Tokens consumed by one or more completions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, other: Self) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
    }
}

/// A decoded analysis and what it cost.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub usage: TokenUsage,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    type_: &'static str,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: TokenUsage,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

pub struct Analyzer {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    api_base: String,
    api_key: String,
    model: GptModel,
    temperature: f32,
}

impl Analyzer {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        api_key: &str,
        model: GptModel,
        config: &AnalysisConfig,
    ) -> Self {
        Self {
            fetcher,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model,
            temperature: config.temperature,
        }
    }

    /// Analyzer over its own HTTP client, using the completion timeout.
    pub fn connect(
        api_key: &str,
        model: GptModel,
        config: &AnalysisConfig,
        http: &HttpConfig,
    ) -> Result<Self> {
        let http = HttpConfig {
            timeout_secs: config.request_timeout_secs,
            ..http.clone()
        };
        let fetcher = Arc::new(HttpFetcher::new(&http)?);
        Ok(Self::new(fetcher, api_key, model, config))
    }

    pub fn model(&self) -> GptModel {
        self.model
    }

    /// Summarize reviews into pros, cons and suggestions.
    ///
    /// A malformed reply is an error; nothing is retried.
    pub async fn process_reviews(
        &self,
        app_info: &Value,
        reviews: &[StrippedReview<'_>],
    ) -> Result<Analysis> {
        let payload = build_payload(app_info, reviews)?;

        let estimated = estimate_tokens(&payload);
        if estimated > self.model.context_window() {
            tracing::warn!(
                "Input of ~{} tokens exceeds the {} token window of {}",
                estimated,
                self.model.context_window(),
                self.model
            );
        }

        let request = ChatRequest {
            model: self.model.id(),
            temperature: self.temperature,
            response_format: ResponseFormat {
                type_: "json_object",
            },
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt(),
                },
                Message {
                    role: "user",
                    content: payload,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.api_base);
        let body = serde_json::to_value(&request)?;

        match self.fetcher.post_json(&url, &self.api_key, &body).await? {
            FetchResult::Content { body } => parse_response(&String::from_utf8_lossy(&body)),
            FetchResult::Failed { status } => Err(ReviewLensError::Analysis(format!(
                "{} answered {}",
                url, status
            ))),
        }
    }
}

/// Fixed instructions describing the expected `app_analysis` reply.
pub fn system_prompt() -> String {
    format!(
        "You are assistant for product manager of mobile apps. Please help analyze user reviews \
         of the app. Help find pros and cons with given description, title, update info. During \
         response give more attention to user review. App description for better context. Fields \
         'useful' and 'useless' has number of people votes for this review (not exist if value \
         equal 0). Input will be in JSON format from user. Please give output of result in JSON \
         format. Use english language for output. Template output format:\n{}",
        OUTPUT_TEMPLATE
    )
}

/// Compact `{"app": ..., "reviews": [...]}` user message.
pub fn build_payload(app_info: &Value, reviews: &[StrippedReview<'_>]) -> Result<String> {
    let payload = json!({ "app": app_info, "reviews": reviews });
    Ok(serde_json::to_string(&payload)?)
}

/// Rough token count: four characters per token.
fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

fn parse_response(text: &str) -> Result<Analysis> {
    let response: ChatResponse = serde_json::from_str(text)
        .map_err(|e| ReviewLensError::Analysis(format!("unexpected completion body: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ReviewLensError::Analysis("completion has no choices".into()))?;

    if let Some(refusal) = choice.message.refusal {
        return Err(ReviewLensError::Analysis(format!("model refused: {}", refusal)));
    }

    let content = choice.message.content.unwrap_or_default();
    if content.trim().is_empty() {
        let reason = choice.finish_reason.unwrap_or_else(|| "unknown".into());
        return Err(ReviewLensError::Analysis(format!(
            "empty completion (finish reason: {})",
            reason
        )));
    }

    Ok(Analysis {
        result: AnalysisResult::from_reply(&content)?,
        usage: response.usage,
    })
}
