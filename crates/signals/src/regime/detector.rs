//! Regime change detection.
//!
//! Tracks the last known macro regime in a persistent store and emits a
//! [`RegimeChange`] exactly once per genuine transition.
//!
//! # Example
//!
//! ```
//! use market_signal_core::MarketRegime;
//! use market_signal_engine::regime::{InMemoryRegimeStore, NoopNotifier, RegimeChangeDetector};
//! use std::sync::Arc;
//!
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let detector = RegimeChangeDetector::new(
//!     Arc::new(InMemoryRegimeStore::default()),
//!     Arc::new(NoopNotifier),
//! );
//!
//! // First observation is recorded, not reported
//! assert!(detector.check_regime_change(MarketRegime::RiskOff).await.is_none());
//!
//! let change = detector.check_regime_change(MarketRegime::Mixed).await.unwrap();
//! assert_eq!(change.from, MarketRegime::RiskOff);
//! assert_eq!(change.to, MarketRegime::Mixed);
//! # });
//! ```

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use market_signal_core::{
    Clock, MacroSnapshot, MarketRegime, NotificationScheduler, RegimeChange, RegimeChangeState,
    RegimeStateStore, StoreError, SystemClock,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::classify::{classify_regime, RegimeAssessment};

/// Notification scheduler that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl NotificationScheduler for NoopNotifier {
    async fn schedule_regime_change(&self, _change: &RegimeChange) -> Result<()> {
        Ok(())
    }
}

/// Serialized access point to the persisted regime state.
///
/// Every state read-modify-write happens under one async mutex, so
/// concurrent refreshes observing the same transition report it once.
///
/// The mutex also guards the last regime this detector recorded or
/// reported. It takes precedence over the store, so a transition whose
/// write failed is not reported again on the next refresh. The detector
/// assumes it is the only writer of its store while it is alive.
pub struct RegimeChangeDetector {
    store: Arc<dyn RegimeStateStore>,
    notifier: Arc<dyn NotificationScheduler>,
    clock: Arc<dyn Clock>,
    recorded: Mutex<Option<(MarketRegime, DateTime<Utc>)>>,
}

impl RegimeChangeDetector {
    /// Creates a detector using the system clock.
    #[must_use]
    pub fn new(store: Arc<dyn RegimeStateStore>, notifier: Arc<dyn NotificationScheduler>) -> Self {
        Self {
            store,
            notifier,
            clock: Arc::new(SystemClock),
            recorded: Mutex::new(None),
        }
    }

    /// Replaces the clock used for timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Records `new_regime` and reports a transition if it differs from the
    /// last known regime.
    ///
    /// - `NoData` never touches stored state.
    /// - The first regime ever observed is stored without an event.
    /// - If the store cannot be read, the call is treated as uninitialized:
    ///   no event is emitted and the unreadable state is left untouched.
    /// - A failed write is logged; the event is still returned and is not
    ///   repeated. The write is retried on the next refresh.
    pub async fn check_regime_change(&self, new_regime: MarketRegime) -> Option<RegimeChange> {
        if !new_regime.has_data() {
            debug!("regime has no data, leaving stored state untouched");
            return None;
        }

        let mut recorded = self.recorded.lock().await;

        let mut state = match self.store.load().await {
            Ok(state) => state,
            Err(e) => {
                warn!(
                    regime = %new_regime,
                    "failed to load regime state, skipping change detection: {e}"
                );
                return None;
            }
        };

        let now = self.clock.now();
        let previous = recorded.map(|(regime, _)| regime).or(state.last_known_regime);
        let change = match previous {
            None => {
                state.last_known_regime = Some(new_regime);
                state.last_regime_change = Some(now);
                *recorded = Some((new_regime, now));
                self.persist(&state).await;
                info!(regime = %new_regime, "recorded initial market regime");
                return None;
            }
            Some(previous) if previous == new_regime => {
                if let Some((regime, at)) = *recorded {
                    if state.last_known_regime != Some(regime) {
                        debug!(regime = %regime, "store is behind, retrying regime write");
                        state.last_known_regime = Some(regime);
                        state.last_regime_change = Some(at);
                        self.persist(&state).await;
                    }
                }
                return None;
            }
            Some(previous) => RegimeChange {
                from: previous,
                to: new_regime,
                detected_at: now,
            },
        };

        state.last_known_regime = Some(new_regime);
        state.last_regime_change = Some(now);
        *recorded = Some((new_regime, now));
        self.persist(&state).await;
        drop(recorded);

        info!(from = %change.from, to = %change.to, "market regime changed");

        if state.notifications_enabled {
            if let Err(e) = self.notifier.schedule_regime_change(&change).await {
                warn!(from = %change.from, to = %change.to, "failed to schedule regime notification: {e:#}");
            }
        }

        Some(change)
    }

    /// Classifies a snapshot and feeds the result through change detection.
    pub async fn observe(
        &self,
        snapshot: &MacroSnapshot,
    ) -> (RegimeAssessment, Option<RegimeChange>) {
        let assessment = classify_regime(snapshot);
        let change = self.check_regime_change(assessment.regime).await;
        (assessment, change)
    }

    /// Returns the stored state, or the default state if it cannot be read.
    pub async fn state(&self) -> RegimeChangeState {
        let _guard = self.recorded.lock().await;
        self.store.load().await.unwrap_or_else(|e| {
            warn!("failed to load regime state: {e}");
            RegimeChangeState::default()
        })
    }

    /// Enables or disables transition notifications.
    ///
    /// # Errors
    /// Returns error if the state cannot be read or written.
    pub async fn set_notifications_enabled(&self, enabled: bool) -> Result<(), StoreError> {
        let _guard = self.recorded.lock().await;
        let mut state = self.store.load().await?;
        state.notifications_enabled = enabled;
        self.store.save(&state).await
    }

    /// Forgets the tracked regime. The next observation starts tracking
    /// again without an event. The notification preference is kept.
    ///
    /// # Errors
    /// Returns error if the state cannot be written.
    pub async fn reset(&self) -> Result<(), StoreError> {
        let mut recorded = self.recorded.lock().await;
        let notifications_enabled = self
            .store
            .load()
            .await
            .map(|s| s.notifications_enabled)
            .unwrap_or_default();

        self.store
            .save(&RegimeChangeState {
                notifications_enabled,
                ..RegimeChangeState::default()
            })
            .await?;
        *recorded = None;
        info!("regime tracking reset");
        Ok(())
    }

    async fn persist(&self, state: &RegimeChangeState) {
        if let Err(e) = self.store.save(state).await {
            warn!(regime = ?state.last_known_regime, "failed to persist regime state: {e}");
        }
    }
}
