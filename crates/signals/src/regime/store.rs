//! Regime state stores.
//!
//! The persisted state is a flat mapping with three entries:
//!
//! ```json
//! {
//!   "last_known_regime": "risk_off",
//!   "last_regime_change": "2024-03-01T12:00:00Z",
//!   "notifications_enabled": true
//! }
//! ```

use async_trait::async_trait;
use market_signal_core::{RegimeChangeState, RegimeStateStore, StoreError};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

/// Keeps the state in memory. Useful for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryRegimeStore {
    state: RwLock<RegimeChangeState>,
}

impl InMemoryRegimeStore {
    #[must_use]
    pub fn new(state: RegimeChangeState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }
}

#[async_trait]
impl RegimeStateStore for InMemoryRegimeStore {
    async fn load(&self) -> Result<RegimeChangeState, StoreError> {
        Ok(*self.state.read().await)
    }

    async fn save(&self, state: &RegimeChangeState) -> Result<(), StoreError> {
        *self.state.write().await = *state;
        Ok(())
    }
}

/// Persists the state as a JSON file.
///
/// A missing file loads as the default (uninitialized) state. Writes go to a
/// sibling temporary file first and are then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileRegimeStore {
    path: PathBuf,
}

impl JsonFileRegimeStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl RegimeStateStore for JsonFileRegimeStore {
    async fn load(&self) -> Result<RegimeChangeState, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no regime state file, starting fresh");
                return Ok(RegimeChangeState::default());
            }
            Err(e) => return Err(e.into()),
        };

        let state = serde_json::from_str(&contents)?;
        Ok(state)
    }

    async fn save(&self, state: &RegimeChangeState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(state)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        debug!(
            path = %self.path.display(),
            regime = ?state.last_known_regime,
            "saved regime state"
        );
        Ok(())
    }
}
