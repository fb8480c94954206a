use crate::error::StoreError;
use crate::regime::{RegimeChange, RegimeChangeState};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Durable key-value storage for the regime tracking state.
#[async_trait]
pub trait RegimeStateStore: Send + Sync {
    async fn load(&self) -> Result<RegimeChangeState, StoreError>;
    async fn save(&self, state: &RegimeChangeState) -> Result<(), StoreError>;
}

/// Schedules a one-shot user notification for a regime transition.
#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    async fn schedule_regime_change(&self, change: &RegimeChange) -> Result<()>;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
