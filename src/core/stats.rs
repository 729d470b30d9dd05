use crate::domain::model::RequestEvent;
use crate::domain::ports::EventSink;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointStats {
    pub successes: u64,
    pub failures: u64,
    pub total_response_time_ms: f64,
    pub min_response_time_ms: Option<f64>,
    pub max_response_time_ms: Option<f64>,
    pub total_bytes: u64,
    pub failure_messages: HashMap<String, u64>,
}

impl EndpointStats {
    fn record_success(&mut self, response_time_ms: f64, response_length: usize) {
        self.successes += 1;
        self.total_response_time_ms += response_time_ms;
        self.total_bytes += response_length as u64;
        self.min_response_time_ms = Some(
            self.min_response_time_ms
                .map_or(response_time_ms, |min| min.min(response_time_ms)),
        );
        self.max_response_time_ms = Some(
            self.max_response_time_ms
                .map_or(response_time_ms, |max| max.max(response_time_ms)),
        );
    }

    fn record_failure(&mut self, message: &str) {
        self.failures += 1;
        *self
            .failure_messages
            .entry(message.to_string())
            .or_insert(0) += 1;
    }

    pub fn requests(&self) -> u64 {
        self.successes + self.failures
    }

    /// 只以成功樣本計算平均回應時間
    pub fn mean_response_time_ms(&self) -> Option<f64> {
        if self.successes == 0 {
            None
        } else {
            Some(self.total_response_time_ms / self.successes as f64)
        }
    }

    pub fn failure_ratio(&self) -> f64 {
        match self.requests() {
            0 => 0.0,
            total => self.failures as f64 / total as f64,
        }
    }
}

/// 以 `(request_type, name)` 為鍵
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSnapshot {
    pub endpoints: BTreeMap<(String, String), EndpointStats>,
}

impl StatsSnapshot {
    pub fn get(&self, request_type: &str, name: &str) -> Option<&EndpointStats> {
        self.endpoints
            .get(&(request_type.to_string(), name.to_string()))
    }

    pub fn total_requests(&self) -> u64 {
        self.endpoints.values().map(EndpointStats::requests).sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.endpoints.values().map(|s| s.failures).sum()
    }
}

/// 執行緒安全的統計彙整，同時作為任務的 event sink
#[derive(Debug, Default)]
pub struct RequestStats {
    inner: Mutex<StatsSnapshot>,
}

impl RequestStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StatsSnapshot> {
        // 統計資料在 panic 後仍可讀取
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record_failure(&self, request_type: &str, name: &str, message: &str) {
        self.lock()
            .endpoints
            .entry((request_type.to_string(), name.to_string()))
            .or_default()
            .record_failure(message);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.lock().clone()
    }

    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        if snapshot.endpoints.is_empty() {
            tracing::info!("📊 No requests were recorded");
            return;
        }

        for ((request_type, name), stats) in &snapshot.endpoints {
            tracing::info!(
                "📊 {} {} - requests: {}, failures: {} ({:.1}%), avg: {}, min: {}, max: {}, bytes: {}",
                request_type,
                name,
                stats.requests(),
                stats.failures,
                stats.failure_ratio() * 100.0,
                format_ms(stats.mean_response_time_ms()),
                format_ms(stats.min_response_time_ms),
                format_ms(stats.max_response_time_ms),
                stats.total_bytes
            );
            for (message, count) in &stats.failure_messages {
                tracing::warn!("   ❌ {} x{}", message, count);
            }
        }
    }
}

fn format_ms(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |ms| format!("{:.1}ms", ms))
}

impl EventSink for RequestStats {
    fn fire(&self, event: RequestEvent) {
        let mut snapshot = self.lock();
        let entry = snapshot
            .endpoints
            .entry((event.request_type, event.name))
            .or_default();

        match event.exception {
            None => entry.record_success(event.response_time, event.response_length),
            Some(message) => entry.record_failure(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(response_time: f64, response_length: usize, exception: Option<&str>) -> RequestEvent {
        RequestEvent {
            request_type: "POST".to_string(),
            name: "/orders/async".to_string(),
            response_time,
            response_length,
            exception: exception.map(str::to_string),
            context: HashMap::new(),
        }
    }

    #[test]
    fn test_success_events_aggregate() {
        let stats = RequestStats::new();
        stats.fire(event(10.0, 2, None));
        stats.fire(event(30.0, 4, None));
        stats.fire(event(20.0, 2, None));

        let snapshot = stats.snapshot();
        let endpoint = snapshot.get("POST", "/orders/async").unwrap();
        assert_eq!(endpoint.successes, 3);
        assert_eq!(endpoint.failures, 0);
        assert_eq!(endpoint.min_response_time_ms, Some(10.0));
        assert_eq!(endpoint.max_response_time_ms, Some(30.0));
        assert_eq!(endpoint.mean_response_time_ms(), Some(20.0));
        assert_eq!(endpoint.total_bytes, 8);
    }

    #[test]
    fn test_failures_grouped_by_message() {
        let stats = RequestStats::new();
        stats.record_failure("POST", "/orders/async", "Got status code 503");
        stats.record_failure("POST", "/orders/async", "Got status code 503");
        stats.fire(event(5.0, 0, Some("Got status code 500")));
        stats.fire(event(5.0, 2, None));

        let snapshot = stats.snapshot();
        let endpoint = snapshot.get("POST", "/orders/async").unwrap();
        assert_eq!(endpoint.failures, 3);
        assert_eq!(endpoint.successes, 1);
        assert_eq!(endpoint.failure_messages["Got status code 503"], 2);
        assert_eq!(endpoint.failure_messages["Got status code 500"], 1);
        assert_eq!(endpoint.failure_ratio(), 0.75);
        assert_eq!(snapshot.total_requests(), 4);
        assert_eq!(snapshot.total_failures(), 3);
    }

    #[test]
    fn test_empty_stats() {
        let stats = RequestStats::new();
        let snapshot = stats.snapshot();
        assert!(snapshot.get("POST", "/orders/async").is_none());
        assert_eq!(snapshot.total_requests(), 0);
        assert_eq!(EndpointStats::default().mean_response_time_ms(), None);
        stats.log_summary();
    }
}
