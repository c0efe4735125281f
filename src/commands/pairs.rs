use crate::app::AppState;
use crate::error::Result;
use crate::journal::SymbolAdded;

pub fn get_trading_pairs(state: &AppState) -> Vec<String> {
    state.journal.pairs().to_vec()
}

/// Add a pair to the list. Duplicates are reported, not persisted.
pub fn add_trading_pair(state: &mut AppState, name: &str) -> Result<SymbolAdded> {
    let added = state.journal.add_symbol(name)?;
    if let SymbolAdded::Added(_) = added {
        state.persist()?;
    }
    Ok(added)
}
