use crate::core::payload::{OrderGenerator, PayloadRanges};
use crate::core::stats::{RequestStats, StatsSnapshot};
use crate::core::task::OrderTask;
use crate::core::user::{OrderUser, WaitTime};
use crate::domain::ports::Transport;
use crate::utils::error::{LoadTestError, Result};
use crate::utils::validation::{validate_positive_number, Validate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub users: usize,
    pub run_time: Duration,
    pub wait_time: WaitTime,
    /// 設定後每個使用者以 `seed + user_id` 建立亂數源，可重現
    pub seed: Option<u64>,
    pub payload: PayloadRanges,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            users: 1,
            run_time: Duration::from_secs(10),
            wait_time: WaitTime::default(),
            seed: None,
            payload: PayloadRanges::default(),
        }
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validate_positive_number("users", self.users, 1)?;
        self.payload.validate()
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub iterations: u64,
    pub elapsed: Duration,
    pub stats: StatsSnapshot,
}

pub struct LoadTestRunner<T: Transport + ?Sized> {
    settings: RunSettings,
    transport: Arc<T>,
    stats: Arc<RequestStats>,
}

impl<T: Transport + ?Sized + 'static> LoadTestRunner<T> {
    pub fn new(settings: RunSettings, transport: Arc<T>) -> Self {
        Self {
            settings,
            transport,
            stats: Arc::new(RequestStats::new()),
        }
    }

    pub fn stats(&self) -> Arc<RequestStats> {
        self.stats.clone()
    }

    fn user_rng(&self, id: usize) -> StdRng {
        match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(id as u64)),
            None => StdRng::from_entropy(),
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        self.settings.validate()?;

        let task = OrderTask::new(OrderGenerator::new(self.settings.payload.clone())?);
        let (stop_tx, stop_rx) = watch::channel(false);
        let started = Instant::now();

        tracing::info!(
            "🚀 Spawning {} users for {:?} (wait {:?}..{:?})",
            self.settings.users,
            self.settings.run_time,
            self.settings.wait_time.min(),
            self.settings.wait_time.max()
        );

        let handles: Vec<_> = (0..self.settings.users)
            .map(|id| {
                let user = OrderUser::new(
                    id,
                    task.clone(),
                    self.transport.clone(),
                    self.stats.clone(),
                    self.settings.wait_time,
                    self.user_rng(id),
                );
                tokio::spawn(user.run(stop_rx.clone()))
            })
            .collect();
        drop(stop_rx);

        tokio::time::sleep(self.settings.run_time).await;
        tracing::info!("⏹️ Run time elapsed, stopping users");
        // 所有使用者都已結束時 send 會失敗，可忽略
        let _ = stop_tx.send(true);

        let mut iterations = 0;
        for handle in handles {
            iterations += handle.await.map_err(|e| LoadTestError::RunnerError {
                message: format!("user task failed: {}", e),
            })?;
        }

        let elapsed = started.elapsed();
        tracing::info!("🏁 {} iterations in {:?}", iterations, elapsed);

        Ok(RunReport {
            iterations,
            elapsed,
            stats: self.stats.snapshot(),
        })
    }
}
