use chrono::{Datelike, NaiveDate};
use log::debug;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::Trade;
use crate::stats::{month_name, summarize, Grouping, Period, PeriodKey};

/// Excel refuses longer sheet names
pub const MAX_SHEET_NAME_LEN: usize = 31;
pub const SUMMARY_SHEET: &str = "Summary";

pub const HISTORY_HEADERS: [&str; 7] = ["ID", "Date", "Pair", "Type", "Ratio", "Points", "P/L"];
pub const SUMMARY_HEADERS: [&str; 7] = ["Year", "Month", "Pair", "Total_Trades", "TP", "SL", "Total_Points"];

/// `"<MonthName>_<Year>"`, cut to the sheet name limit
pub fn sheet_name(year: i32, month: u32) -> String {
    format!("{}_{}", month_name(month), year)
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .collect()
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("trade_history_{}.xlsx", today.format("%Y-%m-%d"))
}

/// Build the workbook in memory: one sheet per month, then `Summary`.
/// Returns `None` when there are no trades to export.
pub fn build_workbook(trades: &[Trade]) -> Result<Option<Vec<u8>>> {
    if trades.is_empty() {
        return Ok(None);
    }

    let mut by_month: BTreeMap<(i32, u32), Vec<&Trade>> = BTreeMap::new();
    for trade in trades {
        by_month
            .entry((trade.date.year(), trade.date.month()))
            .or_default()
            .push(trade);
    }

    let header = Format::new().set_bold();
    let mut workbook = Workbook::new();

    for ((year, month), rows) in &by_month {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(*year, *month))?;
        write_header(sheet, &HISTORY_HEADERS, &header)?;

        for (i, trade) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, &trade.id)?;
            sheet.write_string(row, 1, trade.date.format("%Y-%m-%d").to_string())?;
            sheet.write_string(row, 2, trade.pair.as_deref().unwrap_or(""))?;
            sheet.write_string(row, 3, trade.trade_type.as_str())?;
            sheet.write_string(row, 4, trade.ratio.as_str())?;
            sheet.write_number(row, 5, trade.points)?;
            sheet.write_string(row, 6, trade.outcome.as_str())?;
        }
        sheet.set_column_width(0, 38)?;
        sheet.set_column_width(1, 12)?;
    }

    let summary = workbook.add_worksheet();
    summary.set_name(SUMMARY_SHEET)?;
    write_header(summary, &SUMMARY_HEADERS, &header)?;

    let rows = summarize(trades, Grouping::new(Period::Monthly));
    for (i, row) in rows.iter().enumerate() {
        let PeriodKey::Month { year, month } = row.period else {
            continue;
        };
        let r = i as u32 + 1;
        summary.write_number(r, 0, year)?;
        summary.write_string(r, 1, month_name(month))?;
        summary.write_string(r, 2, row.pair.as_deref().unwrap_or(""))?;
        summary.write_number(r, 3, row.total_trades as f64)?;
        summary.write_number(r, 4, row.tp as f64)?;
        summary.write_number(r, 5, row.sl as f64)?;
        summary.write_number(r, 6, row.total_points)?;
    }

    let bytes = workbook.save_to_buffer()?;
    debug!(
        "Built workbook: {} month sheet(s), {} summary row(s), {} bytes",
        by_month.len(),
        rows.len(),
        bytes.len()
    );
    Ok(Some(bytes))
}

fn write_header(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<()> {
    for (col, title) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, format)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name() {
        assert_eq!(sheet_name(2024, 9), "September_2024");
        assert!(sheet_name(2024, 9).len() <= MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn test_export_file_name() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(export_file_name(today), "trade_history_2026-10-19.xlsx");
    }

    #[test]
    fn test_empty_journal_has_nothing_to_export() {
        assert!(build_workbook(&[]).unwrap().is_none());
    }
}
