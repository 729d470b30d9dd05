use crate::core::stats::RequestStats;
use crate::core::task::{OrderTask, ORDERS_ASYNC_PATH, REQUEST_TYPE};
use crate::domain::model::RequestOutcome;
use crate::domain::ports::Transport;
use crate::utils::error::{LoadTestError, Result};
use crate::utils::validation::{validate_bounds, validate_range};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// 等待時間上限（秒），CLI 與 TOML 設定共用
pub const MAX_WAIT_SECONDS: f64 = 3600.0;

/// 兩次任務之間的等待時間，於 `[min, max]` 內均勻取值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitTime {
    min: Duration,
    max: Duration,
}

impl WaitTime {
    pub fn between(min_secs: f64, max_secs: f64) -> Result<Self> {
        if !min_secs.is_finite() || !max_secs.is_finite() || min_secs < 0.0 {
            return Err(LoadTestError::InvalidConfigValueError {
                field: "wait_time".to_string(),
                value: format!("[{}, {}]", min_secs, max_secs),
                reason: "Wait time must be a finite, non-negative number of seconds".to_string(),
            });
        }
        validate_range("wait_time.min", min_secs, 0.0, MAX_WAIT_SECONDS)?;
        validate_range("wait_time.max", max_secs, 0.0, MAX_WAIT_SECONDS)?;
        validate_bounds("wait_time", min_secs, max_secs)?;

        Ok(Self {
            min: Duration::from_secs_f64(min_secs),
            max: Duration::from_secs_f64(max_secs),
        })
    }

    pub fn constant(wait: Duration) -> Self {
        Self {
            min: wait,
            max: wait,
        }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min >= self.max {
            return self.min;
        }
        let secs = rng.gen_range(self.min.as_secs_f64()..=self.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

impl Default for WaitTime {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(100),
            max: Duration::from_millis(500),
        }
    }
}

pub struct OrderUser<T: Transport + ?Sized> {
    id: usize,
    task: OrderTask,
    transport: Arc<T>,
    stats: Arc<RequestStats>,
    wait_time: WaitTime,
    rng: StdRng,
}

impl<T: Transport + ?Sized> OrderUser<T> {
    pub fn new(
        id: usize,
        task: OrderTask,
        transport: Arc<T>,
        stats: Arc<RequestStats>,
        wait_time: WaitTime,
        rng: StdRng,
    ) -> Self {
        Self {
            id,
            task,
            transport,
            stats,
            wait_time,
            rng,
        }
    }

    /// 執行一次任務；失敗與傳輸錯誤都記入統計，不中斷迴圈
    pub async fn run_once(&mut self) -> Option<RequestOutcome> {
        let result = self
            .task
            .execute(self.transport.as_ref(), self.stats.as_ref(), &mut self.rng)
            .await;

        match result {
            Ok(outcome) => {
                if let Some(reason) = outcome.failure_reason() {
                    self.stats
                        .record_failure(REQUEST_TYPE, ORDERS_ASYNC_PATH, reason);
                }
                Some(outcome)
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ user {}: {} {} failed: {}",
                    self.id,
                    REQUEST_TYPE,
                    ORDERS_ASYNC_PATH,
                    e
                );
                self.stats
                    .record_failure(REQUEST_TYPE, ORDERS_ASYNC_PATH, &e.to_string());
                None
            }
        }
    }

    /// 執行到 `stop` 變為 true 或 sender 被丟棄為止，回傳執行次數
    pub async fn run(mut self, mut stop: watch::Receiver<bool>) -> u64 {
        let mut iterations = 0;
        tracing::debug!("👤 user {} started", self.id);

        while !*stop.borrow() {
            self.run_once().await;
            iterations += 1;

            let wait = self.wait_time.sample(&mut self.rng);
            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                changed = stop.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::debug!("👤 user {} stopped after {} iterations", self.id, iterations);
        iterations
    }
}
