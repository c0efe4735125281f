use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::stats::{self, AdvancedMetrics, Analysis, EquityPoint, Grouping, Period, PeriodSummary};

/// Headline numbers for the whole journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub total_points: i32,
    pub win_rate: String,
    pub advanced: AdvancedMetrics,
}

pub fn get_dashboard_stats(state: &AppState) -> DashboardStats {
    let trades = state.journal.trades();
    let wins = trades.iter().filter(|t| t.is_profit()).count();
    DashboardStats {
        total_trades: trades.len(),
        wins,
        losses: trades.len() - wins,
        total_points: trades.iter().map(|t| t.points).sum(),
        win_rate: stats::total_win_rate(trades),
        advanced: stats::advanced_metrics(trades),
    }
}

pub fn get_period_report(state: &AppState, period: Period, by_pair: bool) -> Vec<PeriodSummary> {
    let grouping = if by_pair {
        Grouping::new(period)
    } else {
        Grouping::without_pair(period)
    };
    stats::summarize(state.journal.trades(), grouping)
}

pub fn get_analysis(state: &AppState) -> Option<Analysis> {
    stats::analyze(state.journal.trades())
}

pub fn get_equity_curve(state: &AppState) -> Vec<EquityPoint> {
    stats::equity_curve(state.journal.trades())
}
