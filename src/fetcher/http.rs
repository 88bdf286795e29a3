use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::errors::{GemcheckError, Result};

/// Thin wrapper over a shared `reqwest::Client` that turns non-200 responses
/// into errors.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        debug!(url, ?query, "GET");

        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        debug!(url, %status, "response");

        if status != reqwest::StatusCode::OK {
            return Err(GemcheckError::ApiError(format!(
                "HTTP {} from {}",
                status.as_u16(),
                url
            )));
        }

        Ok(response.text().await?)
    }
}
