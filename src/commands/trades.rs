use std::path::PathBuf;

use crate::app::AppState;
use crate::error::{JournalError, Result};
use crate::models::{Trade, TradeFilters, TradeInput};

pub fn get_trades(state: &AppState, filters: Option<TradeFilters>) -> Vec<Trade> {
    let filters = filters.unwrap_or_default();
    state.journal.filter(&filters).into_iter().cloned().collect()
}

pub fn get_trade(state: &AppState, id: &str) -> Result<Trade> {
    state
        .journal
        .get(id)
        .cloned()
        .ok_or_else(|| JournalError::TradeNotFound(id.to_string()))
}

pub fn create_trade(state: &mut AppState, trade: TradeInput) -> Result<Trade> {
    let created = state.journal.add(trade)?;
    state.persist()?;
    Ok(created)
}

pub fn update_trade(state: &mut AppState, id: &str, trade: TradeInput) -> Result<Trade> {
    let updated = state.journal.edit(id, trade)?;
    state.persist()?;
    Ok(updated)
}

pub fn delete_trade(state: &mut AppState, id: &str) -> Result<usize> {
    let removed = state.journal.delete(id)?;
    state.persist()?;
    Ok(removed)
}

/// Wipe trades and pairs, remove the data file (a backup is kept), then
/// write the reset journal. Returns the backup path if a file existed.
pub fn delete_all_trades(state: &mut AppState) -> Result<Option<PathBuf>> {
    let defaults = state.settings.default_pairs.clone();
    state.journal.clear(defaults.as_slice());
    let backup = state.store.remove()?;
    state.persist()?;
    Ok(backup)
}
