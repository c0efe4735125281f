use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Outcome, Trade};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedMetrics {
    pub consecutive_losses: usize,
    pub max_drawdown: i32,
    pub total_win_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub daily_points: i32,
    pub trade_count: usize,
    pub cumulative_points: i32,
}

/// `0.6667` -> `"66.67%"`
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Longest run of losing trades. Expects trades in date order.
pub fn max_consecutive_losses<'a, I>(trades: I) -> usize
where
    I: IntoIterator<Item = &'a Trade>,
{
    let mut longest = 0;
    let mut current = 0;
    for trade in trades {
        if trade.outcome == Outcome::Loss {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Largest drop of the cumulative point total below its running peak.
/// The peak starts at the first cumulative value, not at zero.
pub fn max_drawdown<I>(points: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    let mut cumulative = 0;
    let mut peak: Option<i32> = None;
    let mut worst = 0;
    for p in points {
        cumulative += p;
        let running_peak = peak.map_or(cumulative, |pk| pk.max(cumulative));
        peak = Some(running_peak);
        worst = worst.max(running_peak - cumulative);
    }
    worst
}

/// Fraction of trades closed in profit; 0.0 for no trades
pub fn win_rate<'a, I>(trades: I) -> f64
where
    I: IntoIterator<Item = &'a Trade>,
{
    let (total, wins) = trades.into_iter().fold((0usize, 0usize), |(total, wins), t| {
        (total + 1, wins + usize::from(t.is_profit()))
    });
    if total == 0 {
        0.0
    } else {
        wins as f64 / total as f64
    }
}

pub fn total_win_rate(trades: &[Trade]) -> String {
    format_percent(win_rate(trades))
}

pub fn advanced_metrics(trades: &[Trade]) -> AdvancedMetrics {
    let ordered = in_date_order(trades);
    AdvancedMetrics {
        consecutive_losses: max_consecutive_losses(ordered.iter().copied()),
        max_drawdown: max_drawdown(ordered.iter().map(|t| t.points)),
        total_win_rate: total_win_rate(trades),
    }
}

/// Daily point totals with the running sum, oldest first
pub fn equity_curve(trades: &[Trade]) -> Vec<EquityPoint> {
    let mut daily: BTreeMap<NaiveDate, (i32, usize)> = BTreeMap::new();
    for trade in trades {
        let entry = daily.entry(trade.date).or_insert((0, 0));
        entry.0 += trade.points;
        entry.1 += 1;
    }

    let mut cumulative = 0;
    daily
        .into_iter()
        .map(|(date, (daily_points, trade_count))| {
            cumulative += daily_points;
            EquityPoint {
                date,
                daily_points,
                trade_count,
                cumulative_points: cumulative,
            }
        })
        .collect()
}

// Stable, so same-day trades keep journal order
fn in_date_order(trades: &[Trade]) -> Vec<&Trade> {
    let mut ordered: Vec<&Trade> = trades.iter().collect();
    ordered.sort_by_key(|t| t.date);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RiskReward, TradeInput, TradeType};

    fn trades_from(pattern: &str) -> Vec<Trade> {
        pattern
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let trade_type = if c == 'L' { TradeType::StopLoss } else { TradeType::TakeProfit };
                Trade::new(
                    i.to_string(),
                    TradeInput {
                        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                        pair: None,
                        trade_type,
                        ratio: RiskReward::OneToOne,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_max_consecutive_losses() {
        assert_eq!(max_consecutive_losses(&trades_from("LLWLLLW")), 3);
        assert_eq!(max_consecutive_losses(&trades_from("WWW")), 0);
        assert_eq!(max_consecutive_losses(&trades_from("")), 0);
    }

    #[test]
    fn test_max_drawdown() {
        assert_eq!(max_drawdown([1, -1, -1, 2]), 2);
        assert_eq!(max_drawdown([2, 2, 1]), 0);
        assert_eq!(max_drawdown(Vec::new()), 0);
        // Peak starts at the first cumulative value
        assert_eq!(max_drawdown([-1, -1]), 1);
    }

    #[test]
    fn test_win_rate_formatting() {
        assert_eq!(format_percent(2.0 / 3.0), "66.67%");
        assert_eq!(total_win_rate(&trades_from("WLW")), "66.67%");
        assert_eq!(total_win_rate(&[]), "0.00%");
    }

    #[test]
    fn test_advanced_metrics_sorts_by_date() {
        let mut trades = trades_from("LLWLLLW");
        trades.reverse();
        let metrics = advanced_metrics(&trades);
        assert_eq!(metrics.consecutive_losses, 3);
        // points 1:1 -> [-1,-1,1,-1,-1,-1,1], cumulative [-1,-2,-1,-2,-3,-4,-3]
        assert_eq!(metrics.max_drawdown, 3);
        assert_eq!(metrics.total_win_rate, "28.57%");
    }

    #[test]
    fn test_empty_advanced_metrics() {
        let metrics = advanced_metrics(&[]);
        assert_eq!(
            metrics,
            AdvancedMetrics {
                consecutive_losses: 0,
                max_drawdown: 0,
                total_win_rate: "0.00%".to_string(),
            }
        );
        assert!(equity_curve(&[]).is_empty());
    }

    #[test]
    fn test_equity_curve_groups_days() {
        let mut trades = trades_from("WLW");
        trades[1].date = trades[0].date;
        let curve = equity_curve(&trades);
        assert_eq!(curve.len(), 2);
        assert_eq!(curve[0].trade_count, 2);
        assert_eq!(curve[0].daily_points, 0);
        assert_eq!(curve[1].cumulative_points, 1);
    }
}
