pub mod http_fetcher;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::{Result, ReviewLensError};

#[derive(Debug, Clone)]
pub enum FetchResult {
    /// Response body of a successful request
    Content { body: Vec<u8> },
    /// The server answered with a non-success status
    Failed { status: u16 },
}

impl FetchResult {
    /// Body of a successful response, or a status error naming `url`.
    pub fn into_body(self, url: &str) -> Result<Vec<u8>> {
        match self {
            FetchResult::Content { body } => Ok(body),
            FetchResult::Failed { status } => Err(ReviewLensError::Status {
                url: url.to_string(),
                status,
            }),
        }
    }
}

#[async_trait]
pub trait Fetcher {
    async fn get(&self, url: &str) -> Result<FetchResult>;

    /// POST an `application/x-www-form-urlencoded` body.
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<FetchResult>;

    /// POST a JSON body with a bearer token.
    async fn post_json(&self, url: &str, bearer: &str, body: &Value) -> Result<FetchResult>;
}
