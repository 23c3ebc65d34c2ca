//! Canned-response fetcher for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::{Result, ReviewLensError};
use crate::fetcher::{FetchResult, Fetcher};

/// Answers requests from a list of `(url prefix, response)` routes.
///
/// The first route whose prefix matches is consumed, so repeated requests
/// to the same URL can be given different answers in order.
#[derive(Default)]
pub struct MockFetcher {
    routes: Mutex<Vec<(String, FetchResult)>>,
    requests: Mutex<Vec<String>>,
    json_posts: Mutex<Vec<JsonPost>>,
}

/// A recorded `post_json` call.
#[derive(Debug, Clone)]
pub struct JsonPost {
    pub url: String,
    pub bearer: String,
    pub body: Value,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, prefix: &str, body: &str) -> Self {
        self.route(
            prefix,
            FetchResult::Content {
                body: body.as_bytes().to_vec(),
            },
        )
    }

    pub fn fail(self, prefix: &str, status: u16) -> Self {
        self.route(prefix, FetchResult::Failed { status })
    }

    fn route(self, prefix: &str, result: FetchResult) -> Self {
        self.routes
            .lock()
            .unwrap()
            .push((prefix.to_string(), result));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Bodies sent through `post_json`, in order.
    pub fn json_posts(&self) -> Vec<JsonPost> {
        self.json_posts.lock().unwrap().clone()
    }

    fn answer(&self, url: &str) -> Result<FetchResult> {
        self.requests.lock().unwrap().push(url.to_string());

        let mut routes = self.routes.lock().unwrap();
        match routes.iter().position(|(prefix, _)| url.starts_with(prefix)) {
            Some(index) => Ok(routes.remove(index).1),
            None => Err(ReviewLensError::Other(format!("no route for {}", url))),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn get(&self, url: &str) -> Result<FetchResult> {
        self.answer(url)
    }

    async fn post_form(&self, url: &str, _form: &[(&str, &str)]) -> Result<FetchResult> {
        self.answer(url)
    }

    async fn post_json(&self, url: &str, bearer: &str, body: &Value) -> Result<FetchResult> {
        self.json_posts.lock().unwrap().push(JsonPost {
            url: url.to_string(),
            bearer: bearer.to_string(),
            body: body.clone(),
        });
        self.answer(url)
    }
}
