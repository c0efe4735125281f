//! Performance reporting over the trade history. Everything here is a pure
//! function of the trades passed in; an empty slice yields zero/empty results.

pub mod metrics;
pub mod period;

pub use metrics::{
    advanced_metrics, equity_curve, format_percent, max_consecutive_losses, max_drawdown,
    total_win_rate, win_rate, AdvancedMetrics, EquityPoint,
};
pub use period::{month_name, summarize, Grouping, Period, PeriodKey, PeriodSummary};

use serde::{Deserialize, Serialize};

use crate::models::Trade;

/// Everything the performance dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub monthly: Vec<PeriodSummary>,
    pub weekly: Vec<PeriodSummary>,
    pub yearly: Vec<PeriodSummary>,
    pub advanced: AdvancedMetrics,
}

/// Full breakdown per pair. `None` when there is nothing to analyze.
pub fn analyze(trades: &[Trade]) -> Option<Analysis> {
    if trades.is_empty() {
        return None;
    }
    Some(Analysis {
        monthly: summarize(trades, Grouping::new(Period::Monthly)),
        weekly: summarize(trades, Grouping::new(Period::Weekly)),
        yearly: summarize(trades, Grouping::new(Period::Yearly)),
        advanced: advanced_metrics(trades),
    })
}
