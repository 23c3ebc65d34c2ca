use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::Value;

use crate::app::Result;
use crate::config::HttpConfig;
use crate::fetcher::{FetchResult, Fetcher};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    async fn into_result(url: &str, response: Response) -> Result<FetchResult> {
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("{} answered {}", url, status);
            return Ok(FetchResult::Failed {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?.to_vec();
        Ok(FetchResult::Content { body })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchResult> {
        let response = self.client.get(url).send().await?;
        Self::into_result(url, response).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<FetchResult> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form.iter())
            .finish();

        let response = self
            .client
            .post(url)
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded;charset=UTF-8"),
            )
            .body(body)
            .send()
            .await?;

        Self::into_result(url, response).await
    }

    async fn post_json(&self, url: &str, bearer: &str, body: &Value) -> Result<FetchResult> {
        let response = self
            .client
            .post(url)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await?;

        Self::into_result(url, response).await
    }
}
