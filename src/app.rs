use log::{info, warn};

use crate::db::{JournalStore, LoadOutcome};
use crate::journal::Journal;
use crate::models::Settings;

/// Everything a command needs: effective settings, the backing file and the
/// in-memory journal loaded from it.
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,
    pub store: JournalStore,
    pub journal: Journal,
}

impl AppState {
    /// Load the journal named by `settings.data_file`. A broken file does not
    /// stop the app; the outcome tells the caller whether to show a notice.
    pub fn open(settings: Settings) -> (Self, LoadOutcome) {
        let store = JournalStore::new(settings.data_file.clone());
        let (journal, outcome) = store.load(settings.default_pairs.as_slice());

        match &outcome {
            LoadOutcome::Fresh => info!("Starting new journal at {}", store.path().display()),
            LoadOutcome::Loaded => info!(
                "Loaded {} trade(s) from {}",
                journal.len(),
                store.path().display()
            ),
            LoadOutcome::Recovered { reason, .. } => warn!(
                "Could not read {} ({}), starting from an empty journal",
                store.path().display(),
                reason
            ),
        }

        (
            Self {
                settings,
                store,
                journal,
            },
            outcome,
        )
    }

    /// Persist the current journal in full
    pub fn persist(&self) -> crate::error::Result<()> {
        self.store.save(&self.journal)
    }
}
