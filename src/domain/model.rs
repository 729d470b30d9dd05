use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 一筆隨機產生的訂單；每次任務執行建立一次，送出後即丟棄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub customer_id: u32,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Success,
    Failure(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome {
    pub classification: Classification,
    pub elapsed_ms: f64,
    pub response_length: usize,
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.classification, Classification::Success)
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.classification {
            Classification::Success => None,
            Classification::Failure(reason) => Some(reason),
        }
    }
}

/// 送往 event sink 的請求紀錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEvent {
    pub request_type: String,
    pub name: String,
    pub response_time: f64,
    pub response_length: usize,
    pub exception: Option<String>,
    pub context: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}
