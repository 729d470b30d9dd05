use crate::core::payload::OrderGenerator;
use crate::domain::model::{Classification, RequestEvent, RequestOutcome};
use crate::domain::ports::{EventSink, Transport};
use crate::utils::error::Result;
use rand::Rng;
use std::collections::HashMap;
use std::time::Instant;

pub const ORDERS_ASYNC_PATH: &str = "/orders/async";
pub const EXPECTED_STATUS: u16 = 202;
pub const REQUEST_TYPE: &str = "POST";

/// 單一虛擬使用者的下單任務：產生訂單、送出一次請求、分類結果
#[derive(Debug, Clone, Default)]
pub struct OrderTask {
    generator: OrderGenerator,
}

impl OrderTask {
    pub fn new(generator: OrderGenerator) -> Self {
        Self { generator }
    }

    /// 傳輸層錯誤以 `Err` 回傳，由呼叫端自行分類
    pub async fn execute<T, S, R>(&self, transport: &T, sink: &S, rng: &mut R) -> Result<RequestOutcome>
    where
        T: Transport + ?Sized,
        S: EventSink + ?Sized,
        R: Rng + ?Sized,
    {
        let order = self.generator.generate(rng);
        let body = serde_json::to_value(&order)?;

        let start = Instant::now();
        let response = transport.post_json(ORDERS_ASYNC_PATH, &body).await?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        let response_length = response.body.len();

        if response.status == EXPECTED_STATUS {
            tracing::debug!(
                "✅ {} {} accepted in {:.1}ms ({} bytes)",
                REQUEST_TYPE,
                ORDERS_ASYNC_PATH,
                elapsed_ms,
                response_length
            );
            sink.fire(RequestEvent {
                request_type: REQUEST_TYPE.to_string(),
                name: ORDERS_ASYNC_PATH.to_string(),
                response_time: elapsed_ms,
                response_length,
                exception: None,
                context: HashMap::new(),
            });

            Ok(RequestOutcome {
                classification: Classification::Success,
                elapsed_ms,
                response_length,
            })
        } else {
            let reason = format!("Got status code {}", response.status);
            tracing::debug!("❌ {} {}: {}", REQUEST_TYPE, ORDERS_ASYNC_PATH, reason);

            Ok(RequestOutcome {
                classification: Classification::Failure(reason),
                elapsed_ms,
                response_length,
            })
        }
    }
}
