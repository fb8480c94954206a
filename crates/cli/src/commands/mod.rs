//! CLI commands for the market signal engine.

pub mod regime;
pub mod risk;
pub mod summary;

pub use regime::{run_regime, RegimeArgs};
pub use risk::{run_risk, RiskArgs};
pub use summary::{run_summary, SummaryArgs};
