//! Notification scheduler for the command line.
//!
//! There is no platform notification center here, so a scheduled
//! notification is written to the log.

use anyhow::Result;
use async_trait::async_trait;
use market_signal_core::{NotificationScheduler, RegimeChange};
use market_signal_engine::Describe;

pub struct LogNotifier;

#[async_trait]
impl NotificationScheduler for LogNotifier {
    async fn schedule_regime_change(&self, change: &RegimeChange) -> Result<()> {
        tracing::info!(
            from = %change.from,
            to = %change.to,
            at = %change.detected_at,
            "NOTIFY: market regime shifted from {} to {}",
            change.from.label(),
            change.to.label()
        );
        Ok(())
    }
}
