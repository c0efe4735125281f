use chrono::NaiveDate;
use std::io;

use crate::error::Result;
use crate::models::Trade;

pub fn csv_file_name(today: NaiveDate) -> String {
    format!("trade_history_{}.csv", today.format("%Y-%m-%d"))
}

/// Flat history with the same columns as the month sheets
pub fn write_csv<W: io::Write>(trades: &[Trade], writer: W) -> Result<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    for trade in trades {
        wtr.serialize(trade)?;
    }
    wtr.flush()?;
    Ok(())
}
