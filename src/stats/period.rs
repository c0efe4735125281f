use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::metrics::format_percent;
use crate::models::{Trade, TradeType};

/// English month name for 1-based `month`
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Monthly,
    Weekly,
    Yearly,
}

impl Period {
    pub fn key(&self, date: NaiveDate) -> PeriodKey {
        match self {
            Period::Monthly => PeriodKey::Month {
                year: date.year(),
                month: date.month(),
            },
            Period::Weekly => {
                let week = date.iso_week();
                PeriodKey::Week {
                    year: week.year(),
                    week: week.week(),
                }
            }
            Period::Yearly => PeriodKey::Year { year: date.year() },
        }
    }
}

/// Calendar bucket a trade falls into. Weeks use the ISO year, so the first
/// days of January can belong to the previous year's last week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PeriodKey {
    Month { year: i32, month: u32 },
    Week { year: i32, week: u32 },
    Year { year: i32 },
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Month { year, month } => write!(f, "{} {}", month_name(*month), year),
            PeriodKey::Week { year, week } => write!(f, "{}-W{:02}", year, week),
            PeriodKey::Year { year } => write!(f, "{}", year),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grouping {
    pub period: Period,
    pub by_pair: bool,
}

impl Grouping {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            by_pair: true,
        }
    }

    pub fn without_pair(period: Period) -> Self {
        Self {
            period,
            by_pair: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: PeriodKey,
    pub pair: Option<String>,
    pub total_trades: usize,
    pub tp: usize,
    pub sl: usize,
    pub total_points: i32,
    pub win_rate: f64,
    pub win_rate_display: String,
}

#[derive(Default)]
struct Tally {
    total: usize,
    tp: usize,
    sl: usize,
    points: i32,
    profits: usize,
}

/// Group trades by period (and pair when `grouping.by_pair`), in key order.
pub fn summarize(trades: &[Trade], grouping: Grouping) -> Vec<PeriodSummary> {
    let mut groups: BTreeMap<(PeriodKey, Option<String>), Tally> = BTreeMap::new();

    for trade in trades {
        let pair = if grouping.by_pair { trade.pair.clone() } else { None };
        let tally = groups
            .entry((grouping.period.key(trade.date), pair))
            .or_default();
        tally.total += 1;
        match trade.trade_type {
            TradeType::TakeProfit => tally.tp += 1,
            TradeType::StopLoss => tally.sl += 1,
        }
        tally.points += trade.points;
        if trade.is_profit() {
            tally.profits += 1;
        }
    }

    groups
        .into_iter()
        .map(|((period, pair), tally)| {
            let win_rate = tally.profits as f64 / tally.total as f64;
            PeriodSummary {
                period,
                pair,
                total_trades: tally.total,
                tp: tally.tp,
                sl: tally.sl,
                total_points: tally.points,
                win_rate,
                win_rate_display: format_percent(win_rate),
            }
        })
        .collect()
}
