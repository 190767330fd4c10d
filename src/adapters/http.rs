use crate::config::DomainConnectConfig;
use crate::domain::ports::{HttpClient, HttpResponse};
use crate::utils::error::{DomainConnectError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// [`HttpClient`] on top of a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &DomainConnectConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| DomainConnectError::ConfigValidationError {
                field: "http".to_string(),
                message: format!("Could not build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DomainConnectError::transport(url, e))?;

        let status = response.status().as_u16();
        tracing::debug!("Response status from {}: {}", url, status);

        let body = response
            .text()
            .await
            .map_err(|e| DomainConnectError::transport(url, e))?;

        Ok(HttpResponse { status, body })
    }
}
