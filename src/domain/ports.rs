use crate::domain::model::{RequestEvent, TransportResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// HTTP 傳輸能力，由宿主提供
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<TransportResponse>;
}

pub trait EventSink: Send + Sync {
    fn fire(&self, event: RequestEvent);
}
