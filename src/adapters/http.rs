use crate::domain::model::TransportResponse;
use crate::domain::ports::Transport;
use crate::utils::error::Result;
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 以 `reqwest::Client` 實作的傳輸層，綁定一個目標 host
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        validate_url("host", base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<TransportResponse> {
        let url = self.url_for(path);
        tracing::trace!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
