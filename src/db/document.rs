use serde::{Deserialize, Serialize};

use crate::journal::Journal;
use crate::models::Trade;

/// On-disk shape of the journal file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalDocument {
    #[serde(default)]
    pub trade_history: Vec<Trade>,
    // Missing in some older files; the configured defaults are used instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trading_pairs: Option<Vec<String>>,
}

impl JournalDocument {
    pub fn from_journal(journal: &Journal) -> Self {
        Self {
            trade_history: journal.trades().to_vec(),
            trading_pairs: Some(journal.pairs().to_vec()),
        }
    }

    pub fn into_journal<S: AsRef<str>>(self, default_pairs: &[S]) -> Journal {
        match self.trading_pairs {
            Some(pairs) => Journal::from_parts(self.trade_history, pairs.as_slice()),
            None => Journal::from_parts(self.trade_history, default_pairs),
        }
    }
}
