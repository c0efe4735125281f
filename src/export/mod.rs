pub mod csv;
pub mod xlsx;

pub use self::csv::{csv_file_name, write_csv};
pub use self::xlsx::{build_workbook, export_file_name, sheet_name};
