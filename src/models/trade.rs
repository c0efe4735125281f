use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::JournalError;

/// How the trade was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TradeType {
    #[serde(rename = "TP")]
    TakeProfit,
    #[serde(rename = "SL")]
    StopLoss,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::TakeProfit => "TP",
            TradeType::StopLoss => "SL",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TP" => Ok(TradeType::TakeProfit),
            "SL" => Ok(TradeType::StopLoss),
            _ => Err(JournalError::InvalidTradeType(s.to_string())),
        }
    }
}

/// Risk:reward ratio the trade was planned with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskReward {
    #[serde(rename = "1:1")]
    OneToOne,
    #[serde(rename = "1:2")]
    OneToTwo,
}

impl RiskReward {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskReward::OneToOne => "1:1",
            RiskReward::OneToTwo => "1:2",
        }
    }

    /// Points gained when the target is hit
    pub fn reward(&self) -> i32 {
        match self {
            RiskReward::OneToOne => 1,
            RiskReward::OneToTwo => 2,
        }
    }
}

impl fmt::Display for RiskReward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskReward {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1:1" => Ok(RiskReward::OneToOne),
            "1:2" => Ok(RiskReward::OneToTwo),
            _ => Err(JournalError::InvalidRatio(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Profit,
    Loss,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Profit => "Profit",
            Outcome::Loss => "Loss",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "profit" => Ok(Outcome::Profit),
            "loss" => Ok(Outcome::Loss),
            _ => Err(JournalError::InvalidOutcome(s.to_string())),
        }
    }
}

/// Points and outcome are fully determined by how the trade closed and its ratio.
/// A stop always costs one point regardless of the planned reward.
pub fn derive_result(trade_type: TradeType, ratio: RiskReward) -> (i32, Outcome) {
    match trade_type {
        TradeType::TakeProfit => (ratio.reward(), Outcome::Profit),
        TradeType::StopLoss => (-1, Outcome::Loss),
    }
}

/// A journal row. Field names on disk match the history table columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Date", with = "journal_date")]
    pub date: NaiveDate,
    #[serde(rename = "Pair", default)]
    pub pair: Option<String>,
    #[serde(rename = "Type")]
    pub trade_type: TradeType,
    #[serde(rename = "Ratio")]
    pub ratio: RiskReward,
    #[serde(rename = "Points", deserialize_with = "lenient_points")]
    pub points: i32,
    #[serde(rename = "P/L")]
    pub outcome: Outcome,
}

impl Trade {
    pub fn new(id: String, input: TradeInput) -> Self {
        let (points, outcome) = derive_result(input.trade_type, input.ratio);
        Self {
            id,
            date: input.date,
            pair: input.pair,
            trade_type: input.trade_type,
            ratio: input.ratio,
            points,
            outcome,
        }
    }

    /// Re-derive points and outcome. Returns true when the stored values were stale.
    pub fn rederive(&mut self) -> bool {
        let (points, outcome) = derive_result(self.trade_type, self.ratio);
        let stale = self.points != points || self.outcome != outcome;
        self.points = points;
        self.outcome = outcome;
        stale
    }

    pub fn is_profit(&self) -> bool {
        self.outcome == Outcome::Profit
    }

    pub fn pair_or_dash(&self) -> &str {
        self.pair.as_deref().unwrap_or("-")
    }

    /// Short label used when picking a trade to edit or delete
    pub fn label(&self) -> String {
        let short_id: String = self.id.chars().take(8).collect();
        format!(
            "Trade {}... ({}, {}, {}, {})",
            short_id,
            self.date,
            self.pair_or_dash(),
            self.trade_type,
            self.ratio
        )
    }
}

/// Full set of user-entered fields. Used for both add and edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeInput {
    pub date: NaiveDate,
    pub pair: Option<String>,
    pub trade_type: TradeType,
    pub ratio: RiskReward,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeFilters {
    pub pair: Option<String>,
    pub trade_type: Option<TradeType>,
    pub outcome: Option<Outcome>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl TradeFilters {
    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(pair) = &self.pair {
            match &trade.pair {
                Some(p) if p.eq_ignore_ascii_case(pair.trim()) => {}
                _ => return false,
            }
        }
        if let Some(trade_type) = self.trade_type {
            if trade.trade_type != trade_type {
                return false;
            }
        }
        if let Some(outcome) = self.outcome {
            if trade.outcome != outcome {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if trade.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if trade.date > end {
                return false;
            }
        }
        true
    }
}

/// Parse a calendar date, also accepting the timestamp forms older journal files contain
/// ("2024-01-05 00:00:00", "2024-01-05T00:00:00").
pub fn parse_date(s: &str) -> Result<NaiveDate, JournalError> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    s.get(..10)
        .filter(|_| matches!(s.as_bytes().get(10), Some(b' ') | Some(b'T')))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .ok_or_else(|| JournalError::InvalidDate(s.to_string()))
}

mod journal_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

// Points may have been written as floats by older tools
fn lenient_points<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.round() as i64))
        .map(|v| v as i32)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid points value: {}", value)))
}
