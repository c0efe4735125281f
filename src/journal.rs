//! In-memory journal state and the mutators that act on it.
//!
//! `Journal` is the whole application state: the trade history (always sorted
//! by date ascending) and the ordered set of known trading pairs. Mutators only
//! touch memory; persisting the result is the caller's job (see `commands`).

use log::{info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{JournalError, Result};
use crate::models::{Trade, TradeFilters, TradeInput};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journal {
    trades: Vec<Trade>,
    pairs: Vec<String>,
}

/// Result of `Journal::add_symbol`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolAdded {
    Added(String),
    AlreadyPresent(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub added: usize,
    pub replaced: usize,
    pub pairs_added: usize,
}

/// Trim and uppercase a pair name. Returns `None` for blank input.
pub fn normalize_symbol(name: &str) -> Option<String> {
    let normalized = name.trim().to_uppercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

impl Journal {
    /// Empty journal with the given starting pairs (normalized, deduplicated)
    pub fn with_pairs<S: AsRef<str>>(pairs: &[S]) -> Self {
        let mut journal = Self {
            trades: Vec::new(),
            pairs: Vec::new(),
        };
        for pair in pairs {
            if let Some(p) = normalize_symbol(pair.as_ref()) {
                if !journal.pairs.contains(&p) {
                    journal.pairs.push(p);
                }
            }
        }
        journal
    }

    /// Rebuild state from stored rows. Derived fields are recomputed and the
    /// history re-sorted, so a hand-edited file cannot break the invariants.
    pub fn from_parts<S: AsRef<str>>(trades: Vec<Trade>, pairs: &[S]) -> Self {
        let mut journal = Self::with_pairs(pairs);
        journal.trades = trades;
        for trade in journal.trades.iter_mut() {
            if trade.rederive() {
                warn!("Trade {} had stale points/outcome, recomputed", trade.id);
            }
            if let Some(pair) = trade.pair.as_deref() {
                trade.pair = normalize_symbol(pair);
            }
        }
        // Every pair a stored trade uses must stay selectable for edits
        let used: Vec<String> = journal.trades.iter().filter_map(|t| t.pair.clone()).collect();
        for pair in used {
            if !journal.pairs.contains(&pair) {
                warn!("Pair {} used by stored trades was missing from the pair list, added", pair);
                journal.pairs.push(pair);
            }
        }
        journal.sort();
        journal
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn pairs(&self) -> &[String] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn get(&self, id: &str) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }

    /// Trades matching `filters`, in date order, capped at `filters.limit`
    pub fn filter(&self, filters: &TradeFilters) -> Vec<&Trade> {
        let matching = self.trades.iter().filter(|t| filters.matches(t));
        match filters.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }

    /// Append a new trade with a fresh id
    pub fn add(&mut self, input: TradeInput) -> Result<Trade> {
        let input = self.validate(input)?;
        let trade = Trade::new(Uuid::new_v4().to_string(), input);
        info!(
            "Added {} trade with {} ratio for {} on {}",
            trade.trade_type,
            trade.ratio,
            trade.pair_or_dash(),
            trade.date
        );
        self.trades.push(trade.clone());
        self.sort();
        Ok(trade)
    }

    /// Replace every user-entered field of the first trade with `id`
    pub fn edit(&mut self, id: &str, input: TradeInput) -> Result<Trade> {
        let input = self.validate(input)?;
        let slot = self
            .trades
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| JournalError::TradeNotFound(id.to_string()))?;

        *slot = Trade::new(slot.id.clone(), input);
        let updated = slot.clone();
        self.sort();
        info!("Updated {}", updated.label());
        Ok(updated)
    }

    /// Remove every trade with `id`. Returns how many were removed.
    pub fn delete(&mut self, id: &str) -> Result<usize> {
        let before = self.trades.len();
        self.trades.retain(|t| t.id != id);
        let removed = before - self.trades.len();
        if removed == 0 {
            return Err(JournalError::TradeNotFound(id.to_string()));
        }
        info!("Deleted trade {} ({} row(s))", id, removed);
        Ok(removed)
    }

    pub fn add_symbol(&mut self, name: &str) -> Result<SymbolAdded> {
        let symbol = normalize_symbol(name).ok_or(JournalError::InvalidPair)?;
        if self.pairs.contains(&symbol) {
            warn!("Pair {} already exists.", symbol);
            return Ok(SymbolAdded::AlreadyPresent(symbol));
        }
        info!("Added new trading pair: {}", symbol);
        self.pairs.push(symbol.clone());
        Ok(SymbolAdded::Added(symbol))
    }

    /// Drop all trades and reset the pair list
    pub fn clear<S: AsRef<str>>(&mut self, default_pairs: &[S]) {
        *self = Self::with_pairs(default_pairs);
        info!("All data cleared.");
    }

    /// Merge trades from another journal document. Trades whose id already
    /// exists are replaced wholesale, the rest are appended; unseen pairs are added.
    pub fn merge<S: AsRef<str>>(&mut self, trades: Vec<Trade>, pairs: &[S]) -> MergeSummary {
        let mut summary = MergeSummary::default();

        let incoming = pairs
            .iter()
            .filter_map(|p| normalize_symbol(p.as_ref()))
            .chain(trades.iter().filter_map(|t| t.pair.as_deref().and_then(normalize_symbol)));
        for pair in incoming {
            if !self.pairs.contains(&pair) {
                self.pairs.push(pair);
                summary.pairs_added += 1;
            }
        }

        for mut trade in trades {
            trade.rederive();
            trade.pair = trade.pair.as_deref().and_then(normalize_symbol);
            match self.trades.iter_mut().find(|t| t.id == trade.id) {
                Some(existing) => {
                    *existing = trade;
                    summary.replaced += 1;
                }
                None => {
                    self.trades.push(trade);
                    summary.added += 1;
                }
            }
        }
        self.sort();
        info!(
            "Merged journal: {} added, {} replaced, {} new pair(s)",
            summary.added, summary.replaced, summary.pairs_added
        );
        summary
    }

    fn validate(&self, mut input: TradeInput) -> Result<TradeInput> {
        if let Some(raw) = input.pair.take() {
            let pair = normalize_symbol(&raw).ok_or(JournalError::InvalidPair)?;
            if !self.pairs.contains(&pair) {
                return Err(JournalError::UnknownPair(pair));
            }
            input.pair = Some(pair);
        }
        Ok(input)
    }

    fn sort(&mut self) {
        self.trades.sort_by_key(|t| t.date);
    }
}
