use chrono::Local;
use log::{debug, error, info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::document::JournalDocument;
use crate::error::Result;
use crate::journal::Journal;

const BACKUP_DIR: &str = "backups";
const BACKUP_PREFIX: &str = "pre_clear_";
const UNREADABLE_PREFIX: &str = "unreadable_";
const BACKUPS_TO_KEEP: usize = 5;

/// How the journal came to be in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file yet, started from defaults
    Fresh,
    Loaded,
    /// The file existed but could not be read; started from defaults.
    /// `backup` holds a copy of the unreadable file, since the next save
    /// replaces it.
    Recovered {
        reason: String,
        backup: Option<PathBuf>,
    },
}

/// Flat JSON file holding the whole journal. Every save rewrites it in full.
#[derive(Debug, Clone)]
pub struct JournalStore {
    path: PathBuf,
}

impl JournalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the journal. Never fails: an unreadable file is reported through
    /// `LoadOutcome::Recovered` and an empty journal is returned.
    pub fn load<S: AsRef<str>>(&self, default_pairs: &[S]) -> (Journal, LoadOutcome) {
        if !self.path.exists() {
            debug!("No data file found at {}, initializing defaults", self.path.display());
            return (Journal::with_pairs(default_pairs), LoadOutcome::Fresh);
        }

        match self.read_document() {
            Ok(doc) => {
                let journal = doc.into_journal(default_pairs);
                debug!(
                    "Loaded {} trades and {} pairs from {}",
                    journal.len(),
                    journal.pairs().len(),
                    self.path.display()
                );
                (journal, LoadOutcome::Loaded)
            }
            Err(e) => {
                error!("Error loading data from {}: {}", self.path.display(), e);
                let backup = match self.create_backup(UNREADABLE_PREFIX) {
                    Ok(path) => {
                        warn!("Unreadable journal copied to {}", path.display());
                        Some(path)
                    }
                    Err(backup_err) => {
                        error!("Failed to back up unreadable journal: {}", backup_err);
                        None
                    }
                };
                (
                    Journal::with_pairs(default_pairs),
                    LoadOutcome::Recovered {
                        reason: e.to_string(),
                        backup,
                    },
                )
            }
        }
    }

    fn read_document(&self) -> Result<JournalDocument> {
        let data = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Write the full journal. The document goes to a temp file next to the
    /// target and is renamed over it, so readers never see a partial file.
    pub fn save(&self, journal: &Journal) -> Result<()> {
        let data = serde_json::to_vec_pretty(&JournalDocument::from_journal(journal))?;

        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        debug!("Data saved to {} ({} trades)", self.path.display(), journal.len());
        Ok(())
    }

    /// Remove the data file, keeping a timestamped copy under `backups/`.
    /// Returns the backup path when there was a file to remove.
    pub fn remove(&self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let backup = self.create_backup(BACKUP_PREFIX)?;
        fs::remove_file(&self.path)?;
        info!("Removed {} (backup at {})", self.path.display(), backup.display());
        Ok(Some(backup))
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn backup_dir(&self) -> PathBuf {
        self.parent_dir().join(BACKUP_DIR)
    }

    fn create_backup(&self, prefix: &str) -> Result<PathBuf> {
        let backup_dir = self.backup_dir();
        fs::create_dir_all(&backup_dir)?;

        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("journal");
        let backup_name = format!(
            "{}{}_{}.json",
            prefix,
            stem,
            Local::now().format("%Y%m%d_%H%M%S_%3f")
        );
        let backup_path = backup_dir.join(backup_name);
        fs::copy(&self.path, &backup_path)?;

        self.cleanup_old_backups(&backup_dir, prefix);
        Ok(backup_path)
    }

    /// Keep the newest `BACKUPS_TO_KEEP` backups of one kind. Names sort
    /// chronologically within a prefix.
    fn cleanup_old_backups(&self, backup_dir: &Path, prefix: &str) {
        let entries = match fs::read_dir(backup_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read backup directory: {}", e);
                return;
            }
        };

        let mut backups: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension().and_then(|s| s.to_str()) == Some("json")
                    && path
                        .file_name()
                        .and_then(|s| s.to_str())
                        .map(|s| s.starts_with(prefix))
                        .unwrap_or(false)
            })
            .collect();
        backups.sort();

        if backups.len() > BACKUPS_TO_KEEP {
            for path in backups.iter().take(backups.len() - BACKUPS_TO_KEEP) {
                if let Err(e) = fs::remove_file(path) {
                    warn!("Failed to delete old backup: {}", e);
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn backups(&self) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = fs::read_dir(self.backup_dir())
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default();
        found.sort();
        found
    }
}
