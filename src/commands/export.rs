use chrono::NaiveDate;
use log::info;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::app::AppState;
use crate::error::Result;
use crate::export;

/// Write the monthly workbook to `output`, or to `<export_dir>/trade_history_<today>.xlsx`.
/// Returns `None` (and writes nothing) for an empty journal.
pub fn export_workbook(state: &AppState, output: Option<&Path>, today: NaiveDate) -> Result<Option<PathBuf>> {
    let Some(bytes) = export::build_workbook(state.journal.trades())? else {
        return Ok(None);
    };

    let path = target_path(state, output, || export::export_file_name(today));
    ensure_parent(&path)?;
    fs::write(&path, bytes)?;
    info!("Exported {} trade(s) to {}", state.journal.len(), path.display());
    Ok(Some(path))
}

pub fn export_csv(state: &AppState, output: Option<&Path>, today: NaiveDate) -> Result<Option<PathBuf>> {
    if state.journal.is_empty() {
        return Ok(None);
    }

    let path = target_path(state, output, || export::csv_file_name(today));
    ensure_parent(&path)?;
    let file = BufWriter::new(File::create(&path)?);
    export::write_csv(state.journal.trades(), file)?;
    info!("Exported {} trade(s) to {}", state.journal.len(), path.display());
    Ok(Some(path))
}

fn target_path(state: &AppState, output: Option<&Path>, default_name: impl FnOnce() -> String) -> PathBuf {
    match output {
        Some(p) => p.to_path_buf(),
        None => state.settings.export_dir.join(default_name()),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
