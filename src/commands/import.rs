use log::info;

use crate::app::AppState;
use crate::db::JournalDocument;
use crate::error::Result;
use crate::journal::MergeSummary;

/// Serialize the whole journal in the same format as the data file
pub fn export_all_data(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JournalDocument::from_journal(&state.journal))?)
}

/// Merge a journal document into the current one (same-id trades are replaced)
pub fn import_all_data(state: &mut AppState, json_data: &str) -> Result<MergeSummary> {
    let backup: JournalDocument = serde_json::from_str(json_data)?;
    let pairs = backup.trading_pairs.unwrap_or_default();
    let summary = state.journal.merge(backup.trade_history, pairs.as_slice());
    state.persist()?;
    info!("Imported {} trade(s)", summary.added + summary.replaced);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JournalError;
    use crate::models::Settings;

    fn state_at(path: std::path::PathBuf) -> AppState {
        AppState::open(Settings {
            data_file: path,
            ..Settings::default()
        })
        .0
    }

    #[test]
    fn test_import_legacy_export() {
        // Written by the older journal: dates carry a midnight timestamp
        let legacy = r#"{
            "trade_history": [
                {"ID": "t-1", "Date": "2024-01-05 00:00:00", "Pair": "EURUSD", "Type": "TP", "Ratio": "1:2", "Points": 2, "P/L": "Profit"},
                {"ID": "t-2", "Date": "2024-01-03 00:00:00", "Pair": "GBPJPY", "Type": "SL", "Ratio": "1:1", "Points": -1, "P/L": "Loss"}
            ],
            "trading_pairs": ["USDJPY", "EURUSD", "GBPJPY"]
        }"#;

        let dir = tempfile::tempdir().unwrap();
        let mut state = state_at(dir.path().join("trade_data.json"));
        let summary = import_all_data(&mut state, legacy).unwrap();

        assert_eq!(summary.added, 2);
        assert_eq!(summary.replaced, 0);
        assert_eq!(summary.pairs_added, 1);
        assert_eq!(state.journal.trades()[0].id, "t-2");

        // Importing again replaces instead of duplicating
        let again = import_all_data(&mut state, legacy).unwrap();
        assert_eq!(again.replaced, 2);
        assert_eq!(state.journal.len(), 2);
    }

    #[test]
    fn test_export_then_import_into_fresh_journal() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = state_at(dir.path().join("a.json"));
        source.journal.add_symbol("XAUUSD").unwrap();
        let json = export_all_data(&source).unwrap();

        let mut target = state_at(dir.path().join("b.json"));
        import_all_data(&mut target, &json).unwrap();
        assert_eq!(target.journal.pairs(), source.journal.pairs());
    }

    #[test]
    fn test_import_rejects_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_at(dir.path().join("trade_data.json"));
        let result = import_all_data(&mut state, r#"{"trade_history": 5}"#);
        assert!(matches!(result, Err(JournalError::Parse(_))));
        assert!(!state.store.path().exists());
    }
}
