pub mod config;
pub mod config_loader;
pub mod error;
pub mod regime;
pub mod series;
pub mod traits;

pub use config::{
    AppConfig, RegimeConfig, RiskWeights, StatisticsConfig, StrengthThresholds, ThresholdsConfig,
};
pub use config_loader::ConfigLoader;
pub use error::{ConfigError, SeriesError, StoreError};
pub use regime::{
    MacroIndicator, MacroSnapshot, MarketRegime, RegimeChange, RegimeChangeState, SignalVote,
};
pub use series::{TimeSeries, TimeSeriesPoint};
pub use traits::{Clock, NotificationScheduler, RegimeStateStore, SystemClock};
