use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::env;

use crate::cli::error::{CliError, CliResult};

/// Environment variable consulted when no `--api-url` is given.
pub const API_URL_ENV: &str = "STOCKROOM_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:3737";

/// API client for the stockroom REST API
pub struct ApiClient {
    base_url: String,
    client: Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. STOCKROOM_API_URL environment variable
    /// 3. Default: http://localhost:3737
    pub fn new(api_url: Option<String>) -> Self {
        let base_url = api_url
            .or_else(|| env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.base_url, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(format!("{}{}", self.base_url, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.delete(format!("{}{}", self.base_url, path))
    }

    /// Deserialize a success body, or classify the failure.
    ///
    /// `item` is the ID the request was about, if any; it lets 404 and 409
    /// replies become `ItemNotFound` and `OutOfStock`.
    pub async fn handle_response<T: DeserializeOwned>(
        response: Response,
        item: Option<i64>,
    ) -> CliResult<T> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| CliError::UnreadableReply {
                    message: e.to_string(),
                })
        } else {
            Err(Self::error_from(response, item).await)
        }
    }

    /// Classify a non-success response, preferring the `error` field of the
    /// JSON body over the raw text.
    pub async fn error_from(response: Response, item: Option<i64>) -> CliError {
        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        CliError::from_reply(status, message, item)
    }
}
